//! Persisted-schema versioning.
//!
//! Version 1 stored every config and totals field under its own instance key.
//! Version 2 folds them into the `VaultConfig` and `VaultTotals` aggregates.
//! Stake records (`(STK, account)`) have the same shape in both versions.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::storage::{
    self, VaultConfig, VaultTotals, DEFAULT_LOCK_DURATION, DEFAULT_REQUIRED_STAKE_AMOUNT,
};
use crate::ContractError;

pub const CURRENT_SCHEMA_VERSION: u32 = 2;

// ── Legacy (v1) flat keys ────────────────────────────────────────────────────

pub const V1_TOKEN: Symbol = symbol_short!("TOKEN");
pub const V1_REQUIRED_AMOUNT: Symbol = symbol_short!("REQ_AMT");
pub const V1_LOCK_DURATION: Symbol = symbol_short!("LOCK_DUR");
pub const V1_PAUSED: Symbol = symbol_short!("PAUSED");
pub const V1_BAN_AUTHORITY: Symbol = symbol_short!("BAN_AUTH");
pub const V1_OWNER: Symbol = symbol_short!("OWNER");
pub const V1_TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
pub const V1_TOTAL_USERS: Symbol = symbol_short!("TOT_USR");
pub const V1_TOTAL_BANNED: Symbol = symbol_short!("TOT_BAN");
pub const V1_TOTAL_BANNED_USERS: Symbol = symbol_short!("TOT_BANU");

const V1_KEYS: [Symbol; 10] = [
    V1_TOKEN,
    V1_REQUIRED_AMOUNT,
    V1_LOCK_DURATION,
    V1_PAUSED,
    V1_BAN_AUTHORITY,
    V1_OWNER,
    V1_TOTAL_STAKED,
    V1_TOTAL_USERS,
    V1_TOTAL_BANNED,
    V1_TOTAL_BANNED_USERS,
];

/// In-memory view of the v1 flat layout.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LegacyState {
    pub token: Address,
    pub required_stake_amount: i128,
    pub lock_duration: u64,
    pub paused: bool,
    pub ban_authority: Address,
    pub owner: Address,
    pub total_staked: i128,
    pub total_users: u32,
    pub total_banned_amount: i128,
    pub total_banned_users: u32,
}

/// Pure v1 → v2 step; touches no storage so it can be run offline.
pub fn migrate_v1_to_v2(old: LegacyState) -> (VaultConfig, VaultTotals) {
    let config = VaultConfig {
        token: old.token,
        required_stake_amount: old.required_stake_amount,
        lock_duration: old.lock_duration,
        paused: old.paused,
        ban_authority: old.ban_authority,
        owner: old.owner,
    };
    let totals = VaultTotals {
        total_staked: old.total_staked,
        total_users: old.total_users,
        total_banned_amount: old.total_banned_amount,
        total_banned_users: old.total_banned_users,
    };
    (config, totals)
}

/// Reads the v1 layout. Missing identity keys mean the vault was never set up.
pub fn load_legacy(env: &Env) -> Result<LegacyState, ContractError> {
    let instance = env.storage().instance();
    let token: Address = instance
        .get(&V1_TOKEN)
        .ok_or(ContractError::NotInitialized)?;
    let ban_authority: Address = instance
        .get(&V1_BAN_AUTHORITY)
        .ok_or(ContractError::NotInitialized)?;
    let owner: Address = instance
        .get(&V1_OWNER)
        .ok_or(ContractError::NotInitialized)?;

    Ok(LegacyState {
        token,
        required_stake_amount: instance
            .get(&V1_REQUIRED_AMOUNT)
            .unwrap_or(DEFAULT_REQUIRED_STAKE_AMOUNT),
        lock_duration: instance
            .get(&V1_LOCK_DURATION)
            .unwrap_or(DEFAULT_LOCK_DURATION),
        paused: instance.get(&V1_PAUSED).unwrap_or(false),
        ban_authority,
        owner,
        total_staked: instance.get(&V1_TOTAL_STAKED).unwrap_or(0),
        total_users: instance.get(&V1_TOTAL_USERS).unwrap_or(0),
        total_banned_amount: instance.get(&V1_TOTAL_BANNED).unwrap_or(0),
        total_banned_users: instance.get(&V1_TOTAL_BANNED_USERS).unwrap_or(0),
    })
}

/// Owner recorded under whichever layout is currently stored.
pub fn stored_owner(env: &Env) -> Result<Address, ContractError> {
    if storage::has_config(env) {
        return storage::load_config(env).map(|c| c.owner);
    }
    env.storage()
        .instance()
        .get(&V1_OWNER)
        .ok_or(ContractError::NotInitialized)
}

/// Brings stored state up to `CURRENT_SCHEMA_VERSION`. Returns the version
/// stored before the call.
pub fn run(env: &Env) -> Result<u32, ContractError> {
    let from = storage::schema_version(env);
    if from > CURRENT_SCHEMA_VERSION {
        return Err(ContractError::UnsupportedSchema);
    }

    if from == 1 {
        let (config, totals) = migrate_v1_to_v2(load_legacy(env)?);
        for key in V1_KEYS.iter() {
            env.storage().instance().remove(key);
        }
        storage::save_config(env, &config);
        storage::save_totals(env, &totals);
        storage::set_schema_version(env, 2);
    }

    Ok(from)
}
