use soroban_sdk::{symbol_short, Address, Env};

use crate::types::position::RedemptionFailure;

pub(crate) fn deposit(e: &Env, depositor: &Address, amount: i128) {
    let topics = (symbol_short!("deposit"), depositor.clone());
    e.events().publish(topics, (amount, e.ledger().timestamp()));
}

pub(crate) fn swap(e: &Env, token_in: &Address, token_out: &Address, amount_in: i128, amount_out: i128) {
    let topics = (symbol_short!("swap"), token_in.clone(), token_out.clone());
    e.events().publish(topics, (amount_in, amount_out));
}

pub(crate) fn position_opened(e: &Env, handle: u64, used_a: i128, used_b: i128) {
    let topics = (symbol_short!("pos_open"), handle);
    e.events().publish(topics, (used_a, used_b));
}

pub(crate) fn fees_collected(e: &Env, handle: u64, amount_a: i128, amount_b: i128) {
    let topics = (symbol_short!("fees"), handle);
    e.events().publish(topics, (amount_a, amount_b));
}

pub(crate) fn position_redeemed(e: &Env, handle: u64, amount_a: i128, amount_b: i128) {
    let topics = (symbol_short!("pos_close"), handle);
    e.events().publish(topics, (amount_a, amount_b));
}

pub(crate) fn redemption_failed(e: &Env, handle: u64, reason: RedemptionFailure) {
    let topics = (symbol_short!("pos_fail"), handle);
    e.events().publish(topics, reason);
}

pub(crate) fn withdrawal(e: &Env, depositor: &Address, amount: i128) {
    let topics = (symbol_short!("withdraw"), depositor.clone());
    e.events().publish(topics, amount);
}

pub(crate) fn in_kind_payout(e: &Env, depositor: &Address, asset: &Address, amount: i128) {
    let topics = (symbol_short!("payout"), depositor.clone(), asset.clone());
    e.events().publish(topics, amount);
}

pub(crate) fn payout_deferred(e: &Env, depositor: &Address, asset: &Address, amount: i128) {
    let topics = (symbol_short!("unpaid"), depositor.clone(), asset.clone());
    e.events().publish(topics, amount);
}
