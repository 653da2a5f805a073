use soroban_sdk::{Address, Env, Vec};
use types::{error::Error, storage::DataKey};

use crate::constants::{MAX_DEPOSITOR_PAGE, PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};
use crate::types;

fn extend(e: &Env, key: &DataKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_deposited_amount(e: &Env, depositor: &Address) -> i128 {
    let key = DataKey::Deposited(depositor.clone());
    e.storage().persistent().get(&key).unwrap_or_default()
}

pub fn get_last_deposit_at(e: &Env, depositor: &Address) -> Option<u64> {
    let key = DataKey::DepositedAt(depositor.clone());
    e.storage().persistent().get(&key)
}

pub fn get_depositor_count(e: &Env) -> u32 {
    e.storage()
        .persistent()
        .get(&DataKey::DepositorCount)
        .unwrap_or(0)
}

/// Depositors in first-deposit order, at most `limit` entries from `start`.
pub fn get_depositors(e: &Env, start: u32, limit: u32) -> Vec<Address> {
    let limit = limit.min(MAX_DEPOSITOR_PAGE);
    let end = get_depositor_count(e).min(start.saturating_add(limit));
    let mut depositors = Vec::new(e);
    for index in start..end {
        if let Some(depositor) = e.storage().persistent().get(&DataKey::Depositor(index)) {
            depositors.push_back(depositor);
        }
    }
    depositors
}

fn append_depositor(e: &Env, depositor: &Address) {
    let index = get_depositor_count(e);
    let key = DataKey::Depositor(index);
    e.storage().persistent().set(&key, depositor);
    extend(e, &key);
    e.storage()
        .persistent()
        .set(&DataKey::DepositorCount, &(index + 1));
    extend(e, &DataKey::DepositorCount);
}

/// Adds `amount` to the depositor's entry and returns the new total.
/// First-time depositors are appended to the depositor list.
pub fn record_deposit(e: &Env, depositor: &Address, amount: i128) -> Result<i128, Error> {
    let key = DataKey::Deposited(depositor.clone());
    let previous: Option<i128> = e.storage().persistent().get(&key);
    if previous.is_none() {
        append_depositor(e, depositor);
    }

    let total = previous
        .unwrap_or_default()
        .checked_add(amount)
        .ok_or(Error::MathOverflow)?;
    e.storage().persistent().set(&key, &total);
    extend(e, &key);

    let at_key = DataKey::DepositedAt(depositor.clone());
    e.storage()
        .persistent()
        .set(&at_key, &e.ledger().timestamp());
    extend(e, &at_key);

    Ok(total)
}

/// Zeroes the depositor's entry and returns what it held.
pub fn clear_deposit(e: &Env, depositor: &Address) -> i128 {
    let key = DataKey::Deposited(depositor.clone());
    let amount = get_deposited_amount(e, depositor);
    e.storage().persistent().set(&key, &0i128);
    extend(e, &key);
    amount
}

/// In-kind payout owed to `depositor` whose transfer failed at withdrawal.
pub fn get_claimable(e: &Env, depositor: &Address, asset: &Address) -> i128 {
    let key = DataKey::Claimable(depositor.clone(), asset.clone());
    e.storage().persistent().get(&key).unwrap_or_default()
}

pub fn add_claimable(
    e: &Env,
    depositor: &Address,
    asset: &Address,
    amount: i128,
) -> Result<(), Error> {
    let key = DataKey::Claimable(depositor.clone(), asset.clone());
    let total = get_claimable(e, depositor, asset)
        .checked_add(amount)
        .ok_or(Error::MathOverflow)?;
    e.storage().persistent().set(&key, &total);
    extend(e, &key);
    Ok(())
}

/// Removes the claim and returns its amount.
pub fn take_claimable(e: &Env, depositor: &Address, asset: &Address) -> i128 {
    let amount = get_claimable(e, depositor, asset);
    e.storage()
        .persistent()
        .remove(&DataKey::Claimable(depositor.clone(), asset.clone()));
    amount
}
