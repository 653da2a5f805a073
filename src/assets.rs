use soroban_sdk::{token, Address, Env, Vec};
use types::{asset::AssetFlows, error::Error, storage::DataKey};

use crate::constants::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};
use crate::types;

/// Which counter of [`AssetFlows`] a movement is booked against.
#[derive(Copy, Clone)]
pub(crate) enum Flow {
    Deposited,
    SwappedIn,
    SwappedOut,
    Deployed,
    Collected,
    Redeemed,
    PaidOut,
}

fn extend(e: &Env, key: &DataKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub(crate) fn get_assets(e: &Env) -> Vec<Address> {
    e.storage()
        .persistent()
        .get(&DataKey::Assets)
        .unwrap_or(Vec::new(e))
}

pub(crate) fn track_asset(e: &Env, asset: &Address) {
    let mut assets = get_assets(e);
    if !assets.contains(asset) {
        assets.push_back(asset.clone());
        e.storage().persistent().set(&DataKey::Assets, &assets);
        extend(e, &DataKey::Assets);
    }
}

pub(crate) fn get_flows(e: &Env, asset: &Address) -> AssetFlows {
    e.storage()
        .persistent()
        .get(&DataKey::Flows(asset.clone()))
        .unwrap_or_default()
}

pub(crate) fn add_flow(e: &Env, asset: &Address, flow: Flow, amount: i128) {
    let mut flows = get_flows(e, asset);
    let counter = match flow {
        Flow::Deposited => &mut flows.deposited,
        Flow::SwappedIn => &mut flows.swapped_in,
        Flow::SwappedOut => &mut flows.swapped_out,
        Flow::Deployed => &mut flows.deployed,
        Flow::Collected => &mut flows.collected,
        Flow::Redeemed => &mut flows.redeemed,
        Flow::PaidOut => &mut flows.paid_out,
    };
    *counter = counter.saturating_add(amount);

    let key = DataKey::Flows(asset.clone());
    e.storage().persistent().set(&key, &flows);
    extend(e, &key);
}

/// Live balance the fund contract holds of `asset`.
pub(crate) fn balance_of(e: &Env, asset: &Address) -> i128 {
    token::Client::new(e, asset).balance(&e.current_contract_address())
}

/// Errors with `TransferFailure` unless the fund holds at least `amount`.
pub(crate) fn ensure_holds(e: &Env, asset: &Address, amount: i128) -> Result<(), Error> {
    if balance_of(e, asset) < amount {
        return Err(Error::TransferFailure);
    }
    Ok(())
}

/// Lets `spender` pull up to `amount` of `asset` from the fund within the
/// current ledger.
pub(crate) fn approve(e: &Env, asset: &Address, spender: &Address, amount: i128) -> Result<(), Error> {
    let expiration = e.ledger().sequence();
    token::Client::new(e, asset)
        .try_approve(&e.current_contract_address(), spender, &amount, &expiration)
        .map_err(|_| Error::TransferFailure)?
        .map_err(|_| Error::TransferFailure)
}

/// Sends `amount` of `asset` from the fund to `to`.
pub(crate) fn pay(e: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    token::Client::new(e, asset)
        .try_transfer(&e.current_contract_address(), to, &amount)
        .map_err(|_| Error::TransferFailure)?
        .map_err(|_| Error::TransferFailure)
}

/// Like [`pay`], but a refused transfer is reported instead of aborting
/// the caller. The token call's own effects are rolled back either way.
pub(crate) fn try_pay(e: &Env, asset: &Address, to: &Address, amount: i128) -> bool {
    pay(e, asset, to, amount).is_ok()
}

/// Pulls `amount` of `asset` from `from` into the fund.
pub(crate) fn collect(e: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), Error> {
    token::Client::new(e, asset)
        .try_transfer(from, &e.current_contract_address(), &amount)
        .map_err(|_| Error::TransferFailure)?
        .map_err(|_| Error::TransferFailure)
}
