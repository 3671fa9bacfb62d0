#![no_std]

pub mod events;
pub mod migration;
pub mod storage;

use soroban_sdk::{contract, contractimpl, contracttype, log, token, Address, BytesN, Env};

pub use storage::{
    StakeRecord, VaultConfig, VaultTotals, DEFAULT_LOCK_DURATION, DEFAULT_REQUIRED_STAKE_AMOUNT,
};

use migration::CURRENT_SCHEMA_VERSION;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidConfiguration = 4,
    InvalidAmount = 5,
    StakingPaused = 6,
    AmountMismatch = 7,
    NoActiveStake = 8,
    LockNotExpired = 9,
    InsufficientBannedBalance = 10,
    TransferFailed = 11,
    NoPendingOwner = 12,
    UnsupportedSchema = 13,
    Overflow = 14,
}

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Result of `check_stake`.
///
/// `meets_requirement` compares against the *current* required amount, which
/// may have changed since the account staked.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeStatus {
    pub meets_requirement: bool,
    pub principal: i128,
    pub start_time: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingVaultContract;

#[contractimpl]
impl StakingVaultContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the vault.
    ///
    /// * `owner`         – may change configuration and withdraw seized funds.
    /// * `token`         – SAC address of the token users stake.
    /// * `ban_authority` – the only address allowed to `slash`.
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        ban_authority: Address,
    ) -> Result<(), ContractError> {
        // Covers both the current and the legacy flat layout.
        if migration::stored_owner(&env).is_ok() {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        Self::require_valid_identity(&env, &token)?;
        Self::require_valid_identity(&env, &ban_authority)?;

        let config = VaultConfig {
            token: token.clone(),
            required_stake_amount: DEFAULT_REQUIRED_STAKE_AMOUNT,
            lock_duration: DEFAULT_LOCK_DURATION,
            paused: false,
            ban_authority: ban_authority.clone(),
            owner: owner.clone(),
        };
        storage::save_config(&env, &config);
        storage::save_totals(&env, &VaultTotals::default());
        storage::set_schema_version(&env, CURRENT_SCHEMA_VERSION);

        events::publish_initialized(
            &env,
            owner,
            token,
            ban_authority,
            config.required_stake_amount,
            config.lock_duration,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens.
    ///
    /// After the deposit the account's principal must equal the required
    /// amount exactly; a partial position may be topped up to it. A zero
    /// deposit on a position already at the required amount restarts its
    /// lock clock.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let config = storage::load_config(&env)?;
        staker.require_auth();

        if config.paused {
            return Err(ContractError::StakingPaused);
        }
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let existing = storage::load_stake(&env, &staker);
        let new_principal = existing
            .principal
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        if new_principal != config.required_stake_amount {
            return Err(ContractError::AmountMismatch);
        }

        let mut totals = storage::load_totals(&env);
        if !existing.is_active() {
            totals.total_users = totals
                .total_users
                .checked_add(1)
                .ok_or(ContractError::Overflow)?;
        }
        totals.total_staked = totals
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;

        // Pull tokens from the staker into custody.
        if amount > 0 {
            Self::transfer(
                &env,
                &config.token,
                &staker,
                &env.current_contract_address(),
                amount,
            )?;
        }

        let record = StakeRecord {
            principal: new_principal,
            start_time: env.ledger().timestamp(),
        };
        storage::save_stake(&env, &staker, &record);
        storage::save_totals(&env, &totals);

        events::publish_staked(&env, staker, amount);

        Ok(())
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Withdraw the caller's entire principal once the lock has elapsed.
    ///
    /// The lock is measured against the lock duration in force *now*, not the
    /// one in force when the stake was made.
    pub fn unstake(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = storage::load_config(&env)?;
        staker.require_auth();

        let record = storage::load_stake(&env, &staker);
        if !record.is_active() {
            return Err(ContractError::NoActiveStake);
        }

        let unlock_at = record.start_time.saturating_add(config.lock_duration);
        if env.ledger().timestamp() < unlock_at {
            return Err(ContractError::LockNotExpired);
        }

        let mut totals = storage::load_totals(&env);
        Self::release_position(&mut totals, record.principal)?;

        // Effects before the token call (checks-effects-interactions).
        storage::remove_stake(&env, &staker);
        storage::save_totals(&env, &totals);

        Self::transfer(
            &env,
            &config.token,
            &env.current_contract_address(),
            &staker,
            record.principal,
        )?;

        events::publish_unstaked(&env, staker, record.principal);

        Ok(record.principal)
    }

    // ── Slashing ────────────────────────────────────────────────────────────

    /// Seize `account`'s stake into the banned-funds pool.
    ///
    /// Tokens stay in custody; only `total_banned_amount` moves. Returns
    /// `false` without touching state when the account has nothing staked.
    pub fn slash(env: Env, caller: Address, account: Address) -> Result<bool, ContractError> {
        let config = storage::load_config(&env)?;
        caller.require_auth();
        if caller != config.ban_authority {
            return Err(ContractError::Unauthorized);
        }

        let record = storage::load_stake(&env, &account);
        if !record.is_active() {
            log!(&env, "slash skipped, no active stake", account);
            return Ok(false);
        }

        let mut totals = storage::load_totals(&env);
        Self::release_position(&mut totals, record.principal)?;
        totals.total_banned_amount = totals
            .total_banned_amount
            .checked_add(record.principal)
            .ok_or(ContractError::Overflow)?;
        totals.total_banned_users = totals
            .total_banned_users
            .checked_add(1)
            .ok_or(ContractError::Overflow)?;

        storage::remove_stake(&env, &account);
        storage::save_totals(&env, &totals);

        events::publish_slashed(&env, account, record.principal);

        Ok(true)
    }

    /// Move `amount` of seized funds out of custody to the owner.
    pub fn withdraw_banned_tokens(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let config = Self::require_owner(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut totals = storage::load_totals(&env);
        if amount > totals.total_banned_amount {
            return Err(ContractError::InsufficientBannedBalance);
        }
        totals.total_banned_amount -= amount;
        storage::save_totals(&env, &totals);

        Self::transfer(
            &env,
            &config.token,
            &env.current_contract_address(),
            &config.owner,
            amount,
        )?;

        events::publish_banned_withdrawal(&env, config.owner, amount, totals.total_banned_amount);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Return the account's stake record (the zero record if none).
    pub fn get_stake(env: Env, account: Address) -> StakeRecord {
        storage::load_stake(&env, &account)
    }

    /// Whether the account's principal is at or above the current required
    /// amount, together with the raw record.
    pub fn check_stake(env: Env, account: Address) -> StakeStatus {
        let record = storage::load_stake(&env, &account);
        let required = storage::load_config(&env)
            .map(|c| c.required_stake_amount)
            .unwrap_or(DEFAULT_REQUIRED_STAKE_AMOUNT);

        StakeStatus {
            meets_requirement: record.is_active() && record.principal >= required,
            principal: record.principal,
            start_time: record.start_time,
        }
    }

    /// Earliest timestamp at which `unstake` succeeds under the current lock
    /// duration, or `None` when the account has nothing staked.
    pub fn unlock_time(env: Env, account: Address) -> Option<u64> {
        let record = storage::load_stake(&env, &account);
        if !record.is_active() {
            return None;
        }
        let lock_duration = storage::load_config(&env)
            .map(|c| c.lock_duration)
            .unwrap_or(DEFAULT_LOCK_DURATION);
        Some(record.start_time.saturating_add(lock_duration))
    }

    pub fn get_totals(env: Env) -> VaultTotals {
        storage::load_totals(&env)
    }

    /// Return the sum of all active principals.
    pub fn get_total_staked(env: Env) -> i128 {
        storage::load_totals(&env).total_staked
    }

    /// Return the number of accounts with an active stake.
    pub fn get_total_users(env: Env) -> u32 {
        storage::load_totals(&env).total_users
    }

    /// Return seized funds still held in custody.
    pub fn get_total_banned_amount(env: Env) -> i128 {
        storage::load_totals(&env).total_banned_amount
    }

    /// Return the cumulative number of slash events.
    pub fn get_total_banned_users(env: Env) -> u32 {
        storage::load_totals(&env).total_banned_users
    }

    pub fn get_config(env: Env) -> Result<VaultConfig, ContractError> {
        storage::load_config(&env)
    }

    pub fn get_required_stake_amount(env: Env) -> Result<i128, ContractError> {
        storage::load_config(&env).map(|c| c.required_stake_amount)
    }

    pub fn get_lock_duration(env: Env) -> Result<u64, ContractError> {
        storage::load_config(&env).map(|c| c.lock_duration)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::load_config(&env)
            .map(|c| c.paused)
            .unwrap_or(false)
    }

    pub fn get_ban_authority(env: Env) -> Result<Address, ContractError> {
        storage::load_config(&env).map(|c| c.ban_authority)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        storage::load_config(&env).map(|c| c.owner)
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        storage::load_config(&env).map(|c| c.token)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::has_config(&env)
    }

    pub fn get_schema_version(env: Env) -> u32 {
        storage::schema_version(&env)
    }

    // ── Owner transfer (two-step) ──────────────────────────────────────────

    /// Propose a new owner. Only the current owner can call this.
    /// The new owner must call `accept_owner` to complete the transfer.
    pub fn propose_owner(
        env: Env,
        current_owner: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_owner(&env, &current_owner)?;

        storage::set_pending_owner(&env, &new_owner);

        events::publish_owner_proposed(&env, current_owner, new_owner);

        Ok(())
    }

    /// Accept the pending owner transfer. Only the proposed owner can call this.
    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        let mut config = storage::load_config(&env)?;
        new_owner.require_auth();

        let pending = storage::pending_owner(&env).ok_or(ContractError::NoPendingOwner)?;
        if new_owner != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_owner = config.owner.clone();
        config.owner = new_owner.clone();
        storage::save_config(&env, &config);
        storage::clear_pending_owner(&env);

        events::publish_owner_accepted(&env, old_owner, new_owner);

        Ok(())
    }

    /// Cancel a pending owner transfer. Only the current owner can call this.
    pub fn cancel_owner_transfer(env: Env, current_owner: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &current_owner)?;

        let pending = storage::pending_owner(&env).ok_or(ContractError::NoPendingOwner)?;
        storage::clear_pending_owner(&env);

        events::publish_owner_transfer_cancelled(&env, current_owner, pending);

        Ok(())
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        storage::pending_owner(&env)
    }

    // ── Owner configuration ──────────────────────────────────────────────────

    /// Stop (or resume) accepting new stakes. Unstake and slash are unaffected.
    pub fn set_paused(env: Env, caller: Address, paused: bool) -> Result<(), ContractError> {
        let mut config = Self::require_owner(&env, &caller)?;

        config.paused = paused;
        storage::save_config(&env, &config);

        events::publish_paused_set(&env, paused);

        Ok(())
    }

    /// Replace the lock duration. Applies to every active stake at the time
    /// it is unstaked, including stakes made before this call.
    pub fn set_lock_duration(
        env: Env,
        caller: Address,
        lock_duration: u64,
    ) -> Result<(), ContractError> {
        let mut config = Self::require_owner(&env, &caller)?;

        config.lock_duration = lock_duration;
        storage::save_config(&env, &config);

        events::publish_lock_duration_set(&env, lock_duration);

        Ok(())
    }

    pub fn set_required_stake_amount(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let mut config = Self::require_owner(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        config.required_stake_amount = amount;
        storage::save_config(&env, &config);

        events::publish_required_amount_set(&env, amount);

        Ok(())
    }

    pub fn set_ban_authority(
        env: Env,
        caller: Address,
        ban_authority: Address,
    ) -> Result<(), ContractError> {
        let mut config = Self::require_owner(&env, &caller)?;
        Self::require_valid_identity(&env, &ban_authority)?;

        config.ban_authority = ban_authority.clone();
        storage::save_config(&env, &config);

        events::publish_ban_authority_set(&env, ban_authority);

        Ok(())
    }

    // ── Upgrades ─────────────────────────────────────────────────────────────

    /// Replace the contract code in place. Storage is kept; call `migrate`
    /// afterwards if the new code expects a newer schema.
    pub fn upgrade(
        env: Env,
        caller: Address,
        new_wasm_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        let owner = migration::stored_owner(&env)?;
        caller.require_auth();
        if caller != owner {
            return Err(ContractError::Unauthorized);
        }

        env.deployer().update_current_contract_wasm(new_wasm_hash.clone());

        events::publish_upgraded(&env, new_wasm_hash);

        Ok(())
    }

    /// Rewrite stored state to the current schema. Safe to call repeatedly.
    /// Returns the schema version now in storage.
    pub fn migrate(env: Env, caller: Address) -> Result<u32, ContractError> {
        let owner = migration::stored_owner(&env)?;
        caller.require_auth();
        if caller != owner {
            return Err(ContractError::Unauthorized);
        }

        let from = migration::run(&env)?;
        if from != CURRENT_SCHEMA_VERSION {
            events::publish_migrated(&env, from, CURRENT_SCHEMA_VERSION);
        } else {
            log!(&env, "migrate: schema already current", from);
        }

        Ok(CURRENT_SCHEMA_VERSION)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert unless `caller` is the stored owner. Returns the config so
    /// callers do not read it twice.
    fn require_owner(env: &Env, caller: &Address) -> Result<VaultConfig, ContractError> {
        let config = storage::load_config(env)?;
        caller.require_auth();
        if *caller != config.owner {
            return Err(ContractError::Unauthorized);
        }
        Ok(config)
    }

    /// An `Address` cannot be null; the vault's own address plays that role.
    fn require_valid_identity(env: &Env, identity: &Address) -> Result<(), ContractError> {
        if *identity == env.current_contract_address() {
            return Err(ContractError::InvalidConfiguration);
        }
        Ok(())
    }

    /// Drop one active position of `principal` from the running totals.
    fn release_position(totals: &mut VaultTotals, principal: i128) -> Result<(), ContractError> {
        totals.total_staked = totals
            .total_staked
            .checked_sub(principal)
            .ok_or(ContractError::Overflow)?;
        totals.total_users = totals
            .total_users
            .checked_sub(1)
            .ok_or(ContractError::Overflow)?;
        Ok(())
    }

    fn transfer(
        env: &Env,
        token: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        match token::Client::new(env, token).try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::TransferFailed),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
