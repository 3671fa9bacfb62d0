#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the vault is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub ban_authority: Address,
    pub required_stake_amount: i128,
    pub lock_duration: u64,
    pub timestamp: u64,
}

/// Fired when an account deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when an account withdraws its whole principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the ban authority seizes an account's stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlashedEvent {
    pub account: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the owner pulls seized funds out of custody.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BannedWithdrawalEvent {
    pub owner: Address,
    pub amount: i128,
    pub remaining: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PausedSetEvent {
    pub paused: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockDurationSetEvent {
    pub lock_duration: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequiredAmountSetEvent {
    pub required_stake_amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BanAuthoritySetEvent {
    pub ban_authority: Address,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

/// Fired when a pending ownership transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

/// Fired when stored state is rewritten to a newer schema.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigratedEvent {
    pub from_version: u32,
    pub to_version: u32,
    pub timestamp: u64,
}

/// Fired after the contract code is swapped in place.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradedEvent {
    pub new_wasm_hash: BytesN<32>,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    token: Address,
    ban_authority: Address,
    required_stake_amount: i128,
    lock_duration: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            ban_authority,
            required_stake_amount,
            lock_duration,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        UnstakedEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_slashed(env: &Env, account: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("SLASHED"), account.clone()),
        SlashedEvent {
            account,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_banned_withdrawal(env: &Env, owner: Address, amount: i128, remaining: i128) {
    env.events().publish(
        (symbol_short!("BAN_WDRAW"), owner.clone()),
        BannedWithdrawalEvent {
            owner,
            amount,
            remaining,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused_set(env: &Env, paused: bool) {
    env.events().publish(
        (symbol_short!("PAUSED"),),
        PausedSetEvent {
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_lock_duration_set(env: &Env, lock_duration: u64) {
    env.events().publish(
        (symbol_short!("LOCK_SET"),),
        LockDurationSetEvent {
            lock_duration,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_required_amount_set(env: &Env, required_stake_amount: i128) {
    env.events().publish(
        (symbol_short!("REQ_SET"),),
        RequiredAmountSetEvent {
            required_stake_amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_ban_authority_set(env: &Env, ban_authority: Address) {
    env.events().publish(
        (symbol_short!("BAN_AUTH"),),
        BanAuthoritySetEvent {
            ban_authority,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"),),
        OwnerProposedEvent {
            current_owner,
            proposed_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACC"),),
        OwnerAcceptedEvent {
            old_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CANC"),),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_migrated(env: &Env, from_version: u32, to_version: u32) {
    env.events().publish(
        (symbol_short!("MIGRATED"),),
        MigratedEvent {
            from_version,
            to_version,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_upgraded(env: &Env, new_wasm_hash: BytesN<32>) {
    env.events().publish(
        (symbol_short!("UPGRADED"),),
        UpgradedEvent {
            new_wasm_hash,
            timestamp: env.ledger().timestamp(),
        },
    );
}
