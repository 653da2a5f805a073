use soroban_sdk::{Address, Env};
use types::{asset::Settlement, config::FundConfig, error::Error, storage::DataKey};

use crate::constants::{INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};
use crate::types;

pub(crate) fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub(crate) fn has_config(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Config)
}

pub(crate) fn get_config(e: &Env) -> Result<FundConfig, Error> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub(crate) fn put_config(e: &Env, config: &FundConfig) {
    e.storage().instance().set(&DataKey::Config, config);
}

pub(crate) fn get_total_value_locked(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::TotalValueLocked)
        .unwrap_or_default()
}

pub(crate) fn put_total_value_locked(e: &Env, amount: i128) {
    e.storage()
        .instance()
        .set(&DataKey::TotalValueLocked, &amount);
}

pub(crate) fn get_settlement(e: &Env) -> Option<Settlement> {
    e.storage().instance().get(&DataKey::Settlement)
}

pub(crate) fn put_settlement(e: &Env, settlement: &Settlement) {
    e.storage().instance().set(&DataKey::Settlement, settlement);
}

/// Set while an adapter redemption call is in flight.
pub(crate) fn is_redeeming(e: &Env) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::Redeeming)
        .unwrap_or(false)
}

pub(crate) fn put_redeeming(e: &Env, redeeming: bool) {
    e.storage().instance().set(&DataKey::Redeeming, &redeeming);
}

pub(crate) fn is_manager(config: &FundConfig, caller: &Address) -> bool {
    config.manager == *caller
}
