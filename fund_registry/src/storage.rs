use soroban_sdk::{Address, Env, Vec};
use types::{
    error::Error,
    storage::{DataKey, RegistryConfig},
};

use crate::types;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
pub(crate) const LIFETIME_THRESHOLD: u32 = BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

pub(crate) fn has_config(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Config)
}

pub(crate) fn get_config(e: &Env) -> Result<RegistryConfig, Error> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub(crate) fn put_config(e: &Env, config: &RegistryConfig) {
    e.storage().instance().set(&DataKey::Config, config);
}

pub(crate) fn get_fund_count(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get(&DataKey::FundCount)
        .unwrap_or(0)
}

/// Bumps the counter and returns the new value.
pub(crate) fn next_fund_number(e: &Env) -> u64 {
    let next = get_fund_count(e) + 1;
    e.storage().instance().set(&DataKey::FundCount, &next);
    next
}

pub(crate) fn get_funds_by_manager(e: &Env, manager: &Address) -> Vec<Address> {
    e.storage()
        .persistent()
        .get(&DataKey::FundsByManager(manager.clone()))
        .unwrap_or(Vec::new(e))
}

pub(crate) fn add_fund(e: &Env, manager: &Address, fund: &Address) {
    let key = DataKey::FundsByManager(manager.clone());
    let mut funds = get_funds_by_manager(e, manager);
    funds.push_back(fund.clone());
    e.storage().persistent().set(&key, &funds);
    e.storage()
        .persistent()
        .extend_ttl(&key, LIFETIME_THRESHOLD, BUMP_AMOUNT);
}
