#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking_vault::{StakingVaultContract, StakingVaultContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { user: u8, amount: u64 },
    Unstake { user: u8 },
    Slash { user: u8 },
    WithdrawBanned { amount: u64 },
    SetRequired { amount: u64 },
    SetLock { seconds: u32 },
    SetPaused { paused: bool },
    Advance { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StakingVaultContract, ());
    let client = StakingVaultContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let ban_authority = Address::generate(&env);
    client.initialize(&owner, &token, &ban_authority);
    client.set_required_stake_amount(&owner, &1_000i128);

    let mut users = vec![];
    for _ in 0..5 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &token).mint(&user, &(u64::MAX as i128));
        users.push(user);
    }

    // Errors are expected; only panics and bookkeeping drift are findings.
    for action in actions {
        match action {
            FuzzAction::Stake { user, amount } => {
                let caller = &users[user as usize % users.len()];
                let _ = client.try_stake(caller, &(amount as i128));
            }
            FuzzAction::Unstake { user } => {
                let caller = &users[user as usize % users.len()];
                let _ = client.try_unstake(caller);
            }
            FuzzAction::Slash { user } => {
                let target = &users[user as usize % users.len()];
                let _ = client.try_slash(&ban_authority, target);
            }
            FuzzAction::WithdrawBanned { amount } => {
                let _ = client.try_withdraw_banned_tokens(&owner, &(amount as i128));
            }
            FuzzAction::SetRequired { amount } => {
                let _ = client.try_set_required_stake_amount(&owner, &(amount as i128));
            }
            FuzzAction::SetLock { seconds } => {
                let _ = client.try_set_lock_duration(&owner, &(seconds as u64));
            }
            FuzzAction::SetPaused { paused } => {
                let _ = client.try_set_paused(&owner, &paused);
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(seconds as u64));
            }
        }

        let totals = client.get_totals();
        let staked: i128 = users.iter().map(|u| client.get_stake(u).principal).sum();
        let active = users
            .iter()
            .filter(|u| client.get_stake(u).principal > 0)
            .count() as u32;
        assert_eq!(totals.total_staked, staked);
        assert_eq!(totals.total_users, active);
        assert!(totals.total_banned_amount >= 0);
        assert_eq!(
            TokenClient::new(&env, &token).balance(&contract_id),
            totals.total_staked + totals.total_banned_amount
        );
    }
});
