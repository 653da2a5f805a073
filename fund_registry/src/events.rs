use soroban_sdk::{symbol_short, Address, Env};

pub(crate) fn fund_created(e: &Env, manager: &Address, fund: &Address) {
    let topics = (symbol_short!("fund_new"), manager.clone());
    e.events().publish(topics, fund.clone());
}
