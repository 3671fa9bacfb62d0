extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger as _},
    token::StellarAssetClient,
    Address, BytesN, Env, IntoVal, TryIntoVal, Val,
};

use crate::{events, ContractError, StakingVaultContract, StakingVaultContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (
    Env,
    StakingVaultContractClient<'static>,
    Address, // owner
    Address, // ban authority
    Address, // token
) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(StakingVaultContract, ());
    let client = StakingVaultContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let ban_authority = Address::generate(&env);
    client.initialize(&owner, &token.address(), &ban_authority);

    (env, client, owner, ban_authority, token.address())
}

// ── Owner-only setters ───────────────────────────────────────────────────────

#[test]
fn test_setters_reject_non_owner() {
    let (env, client, _owner, ban_authority, _token) = setup();
    let intruder = Address::generate(&env);

    assert_eq!(
        client.try_set_paused(&intruder, &true).unwrap_err().unwrap(),
        ContractError::Unauthorized
    );
    assert_eq!(
        client
            .try_set_lock_duration(&intruder, &1)
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );
    assert_eq!(
        client
            .try_set_required_stake_amount(&intruder, &1)
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );
    assert_eq!(
        client
            .try_set_ban_authority(&intruder, &intruder)
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );

    // The ban authority holds no configuration rights either.
    assert_eq!(
        client
            .try_set_paused(&ban_authority, &true)
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );
    assert!(!client.is_paused());
}

#[test]
fn test_set_lock_duration_by_owner() {
    let (_env, client, owner, _ban, _token) = setup();

    client.set_lock_duration(&owner, &172_800);
    assert_eq!(client.get_lock_duration(), 172_800);

    // Zero is allowed: stakes become withdrawable immediately.
    client.set_lock_duration(&owner, &0);
    assert_eq!(client.get_lock_duration(), 0);
}

#[test]
fn test_set_required_stake_amount_rejects_non_positive() {
    let (_env, client, owner, _ban, _token) = setup();

    let result = client.try_set_required_stake_amount(&owner, &0);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidAmount);

    let result = client.try_set_required_stake_amount(&owner, &-5);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidAmount);

    client.set_required_stake_amount(&owner, &250);
    assert_eq!(client.get_required_stake_amount(), 250);
}

#[test]
fn test_set_ban_authority_rejects_vault_address() {
    let (_env, client, owner, ban_authority, _token) = setup();

    let result = client.try_set_ban_authority(&owner, &client.address);
    assert_eq!(
        result.unwrap_err().unwrap(),
        ContractError::InvalidConfiguration
    );
    assert_eq!(client.get_ban_authority(), ban_authority);
}

#[test]
fn test_rotated_ban_authority_takes_over_slashing() {
    let (env, client, owner, old_authority, token) = setup();
    client.set_required_stake_amount(&owner, &100);

    let staker = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&staker, &100);
    client.stake(&staker, &100);

    let new_authority = Address::generate(&env);
    client.set_ban_authority(&owner, &new_authority);
    assert_eq!(client.get_ban_authority(), new_authority);

    let result = client.try_slash(&old_authority, &staker);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);

    assert!(client.slash(&new_authority, &staker));
    assert_eq!(client.get_total_banned_amount(), 100);
}

#[test]
fn test_get_config_reflects_setters() {
    let (_env, client, owner, ban_authority, token) = setup();

    client.set_paused(&owner, &true);
    client.set_lock_duration(&owner, &60);
    client.set_required_stake_amount(&owner, &7);

    let config = client.get_config();
    assert_eq!(config.owner, owner);
    assert_eq!(config.ban_authority, ban_authority);
    assert_eq!(config.token, token);
    assert!(config.paused);
    assert_eq!(config.lock_duration, 60);
    assert_eq!(config.required_stake_amount, 7);
}

// ── Owner transfer (two-step) ────────────────────────────────────────────────

#[test]
fn test_owner_transfer_two_step() {
    let (env, client, owner, _ban, _token) = setup();
    let next_owner = Address::generate(&env);

    client.propose_owner(&owner, &next_owner);
    assert_eq!(client.get_pending_owner(), Some(next_owner.clone()));
    // Nothing changes until the proposed owner accepts.
    assert_eq!(client.get_owner(), owner);

    client.accept_owner(&next_owner);
    assert_eq!(client.get_owner(), next_owner);
    assert_eq!(client.get_pending_owner(), None);

    // Old owner has lost configuration rights, new owner has them.
    assert_eq!(
        client.try_set_paused(&owner, &true).unwrap_err().unwrap(),
        ContractError::Unauthorized
    );
    client.set_paused(&next_owner, &true);
    assert!(client.is_paused());
}

#[test]
fn test_accept_owner_by_wrong_address_fails() {
    let (env, client, owner, _ban, _token) = setup();
    let next_owner = Address::generate(&env);
    let intruder = Address::generate(&env);

    client.propose_owner(&owner, &next_owner);

    let result = client.try_accept_owner(&intruder);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);
    assert_eq!(client.get_owner(), owner);
}

#[test]
fn test_accept_owner_without_proposal_fails() {
    let (env, client, _owner, _ban, _token) = setup();

    let result = client.try_accept_owner(&Address::generate(&env));
    assert_eq!(result.unwrap_err().unwrap(), ContractError::NoPendingOwner);
}

#[test]
fn test_propose_owner_by_non_owner_fails() {
    let (_env, client, _owner, ban_authority, _token) = setup();

    let result = client.try_propose_owner(&ban_authority, &ban_authority);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);
    assert_eq!(client.get_pending_owner(), None);
}

#[test]
fn test_cancel_owner_transfer() {
    let (env, client, owner, _ban, _token) = setup();
    let next_owner = Address::generate(&env);

    assert_eq!(
        client
            .try_cancel_owner_transfer(&owner)
            .unwrap_err()
            .unwrap(),
        ContractError::NoPendingOwner
    );

    client.propose_owner(&owner, &next_owner);
    client.cancel_owner_transfer(&owner);
    assert_eq!(client.get_pending_owner(), None);

    let result = client.try_accept_owner(&next_owner);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::NoPendingOwner);
}

// ── Upgrades ─────────────────────────────────────────────────────────────────

#[test]
fn test_upgrade_by_non_owner_fails() {
    let (env, client, _owner, ban_authority, _token) = setup();

    let hash = BytesN::from_array(&env, &[7u8; 32]);
    let result = client.try_upgrade(&ban_authority, &hash);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);

    let upgraded: soroban_sdk::Vec<Val> = (symbol_short!("UPGRADED"),).into_val(&env);
    let all_events = env.events().all();
    assert!(all_events.iter().all(|event| event.1 != upgraded));
}

#[test]
fn test_upgraded_event_carries_wasm_hash() {
    let (env, client, _owner, _ban, _token) = setup();
    env.ledger().set_timestamp(77);

    let hash = BytesN::from_array(&env, &[7u8; 32]);
    env.as_contract(&client.address, || {
        events::publish_upgraded(&env, hash.clone());
    });

    let our_events: soroban_sdk::Vec<(
        soroban_sdk::Address,
        soroban_sdk::Vec<soroban_sdk::Val>,
        soroban_sdk::Val,
    )> = env.events().all();
    assert!(!our_events.is_empty());

    let event = our_events.get(our_events.len() - 1).unwrap();
    assert_eq!(event.0, client.address);
    assert_eq!(event.1, (symbol_short!("UPGRADED"),).into_val(&env));
    let payload: events::UpgradedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.new_wasm_hash, hash);
    assert_eq!(payload.timestamp, 77);
}
