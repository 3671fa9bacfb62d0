use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

pub const CONFIG: Symbol = symbol_short!("CONFIG");
pub const TOTALS: Symbol = symbol_short!("TOTALS");
pub const SCHEMA: Symbol = symbol_short!("SCHEMA");
pub const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");

// Per-user persistent storage uses tuple keys:  (prefix, user_address)
const USER_STAKE: Symbol = symbol_short!("STK");

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const TTL_THRESHOLD: u32 = DAY_IN_LEDGERS * 30;
pub(crate) const TTL_EXTEND_TO: u32 = DAY_IN_LEDGERS * 60;

// ── Defaults ─────────────────────────────────────────────────────────────────

/// Four weeks, in seconds.
pub const DEFAULT_LOCK_DURATION: u64 = 4 * 7 * 24 * 60 * 60;

/// 100 whole tokens at 18 decimals.
pub const DEFAULT_REQUIRED_STAKE_AMOUNT: i128 = 100 * 1_000_000_000_000_000_000;

// ── Persisted types ──────────────────────────────────────────────────────────

/// A single account's staking position.
///
/// `principal == 0` means no active stake; such records are never stored.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakeRecord {
    pub principal: i128,
    pub start_time: u64,
}

impl StakeRecord {
    pub fn is_active(&self) -> bool {
        self.principal > 0
    }
}

/// Administrator-controlled vault parameters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub token: Address,
    pub required_stake_amount: i128,
    pub lock_duration: u64,
    pub paused: bool,
    pub ban_authority: Address,
    pub owner: Address,
}

/// Global counters maintained incrementally by the state transitions.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VaultTotals {
    pub total_staked: i128,
    pub total_users: u32,
    pub total_banned_amount: i128,
    pub total_banned_users: u32,
}

// ── TTL helpers ──────────────────────────────────────────────────────────────

fn extend_ttl_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_stake_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Config & totals ──────────────────────────────────────────────────────────

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load_config(env: &Env) -> Result<VaultConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_config(env: &Env, config: &VaultConfig) {
    env.storage().instance().set(&CONFIG, config);
    extend_ttl_instance(env);
}

pub fn load_totals(env: &Env) -> VaultTotals {
    env.storage().instance().get(&TOTALS).unwrap_or_default()
}

pub fn save_totals(env: &Env, totals: &VaultTotals) {
    env.storage().instance().set(&TOTALS, totals);
    extend_ttl_instance(env);
}

// ── Schema version ───────────────────────────────────────────────────────────

/// Deployments that predate the version key used the flat layout (v1).
pub fn schema_version(env: &Env) -> u32 {
    env.storage().instance().get(&SCHEMA).unwrap_or(1)
}

pub fn set_schema_version(env: &Env, version: u32) {
    env.storage().instance().set(&SCHEMA, &version);
}

// ── Pending owner ────────────────────────────────────────────────────────────

pub fn pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

pub fn set_pending_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&PENDING_OWNER, owner);
}

pub fn clear_pending_owner(env: &Env) {
    env.storage().instance().remove(&PENDING_OWNER);
}

// ── Stake records ────────────────────────────────────────────────────────────

pub(crate) fn stake_key(account: &Address) -> (Symbol, Address) {
    (USER_STAKE, account.clone())
}

/// Missing records read as the zero record. Reading a stored record keeps it
/// alive, so a position left untouched through its lock is not archived.
pub fn load_stake(env: &Env, account: &Address) -> StakeRecord {
    let key = stake_key(account);
    match env.storage().persistent().get(&key) {
        Some(record) => {
            extend_ttl_stake_key(env, &key);
            record
        }
        None => StakeRecord::default(),
    }
}

/// Whether a record is stored for `account`. The contract itself goes through
/// `load_stake`; this exists for tests that check zero records are never kept.
pub fn has_stake(env: &Env, account: &Address) -> bool {
    env.storage().persistent().has(&stake_key(account))
}

pub fn save_stake(env: &Env, account: &Address, record: &StakeRecord) {
    let key = stake_key(account);
    env.storage().persistent().set(&key, record);
    extend_ttl_stake_key(env, &key);
}

pub fn remove_stake(env: &Env, account: &Address) {
    env.storage().persistent().remove(&stake_key(account));
}
