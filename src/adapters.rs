//! Interfaces of the external services a fund deploys capital into.
//!
//! Both are called through the generated `try_*` client methods so that a
//! failing or misbehaving adapter surfaces as an [`Error`] instead of
//! aborting the fund's invocation.

use soroban_sdk::{contractclient, Address, Env};

use crate::types::{error::Error, position::MintedPosition};

#[contractclient(name = "ExchangeAdapterClient")]
pub trait ExchangeAdapter {
    /// Pulls `amount_in` of `token_in` from `from` (against an allowance)
    /// and pays the output back to `from`. Returns the output amount.
    fn swap(e: Env, from: Address, token_in: Address, token_out: Address, amount_in: i128) -> i128;
}

#[contractclient(name = "PositionAdapterClient")]
pub trait PositionAdapter {
    fn mint(
        e: Env,
        owner: Address,
        token_a: Address,
        amount_a: i128,
        token_b: Address,
        amount_b: i128,
        min_a: i128,
        min_b: i128,
        fee_tier: u32,
    ) -> MintedPosition;

    fn collect_fees(e: Env, owner: Address, handle: u64) -> (i128, i128);

    /// Burns the position and returns principal plus uncollected fees.
    fn redeem(e: Env, owner: Address, handle: u64) -> (i128, i128);
}

pub(crate) fn swap(
    e: &Env,
    exchange: &Address,
    token_in: &Address,
    token_out: &Address,
    amount_in: i128,
) -> Result<i128, Error> {
    ExchangeAdapterClient::new(e, exchange)
        .try_swap(&e.current_contract_address(), token_in, token_out, &amount_in)
        .map_err(|_| Error::ExternalCallFailure)?
        .map_err(|_| Error::ExternalCallFailure)
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn mint(
    e: &Env,
    position_manager: &Address,
    token_a: &Address,
    amount_a: i128,
    token_b: &Address,
    amount_b: i128,
    min_a: i128,
    min_b: i128,
    fee_tier: u32,
) -> Result<MintedPosition, Error> {
    PositionAdapterClient::new(e, position_manager)
        .try_mint(
            &e.current_contract_address(),
            token_a,
            &amount_a,
            token_b,
            &amount_b,
            &min_a,
            &min_b,
            &fee_tier,
        )
        .map_err(|_| Error::ExternalCallFailure)?
        .map_err(|_| Error::ExternalCallFailure)
}

pub(crate) fn collect_fees(
    e: &Env,
    position_manager: &Address,
    handle: u64,
) -> Result<(i128, i128), Error> {
    PositionAdapterClient::new(e, position_manager)
        .try_collect_fees(&e.current_contract_address(), &handle)
        .map_err(|_| Error::ExternalCallFailure)?
        .map_err(|_| Error::ExternalCallFailure)
}

pub(crate) fn redeem(
    e: &Env,
    position_manager: &Address,
    handle: u64,
) -> Result<(i128, i128), Error> {
    PositionAdapterClient::new(e, position_manager)
        .try_redeem(&e.current_contract_address(), &handle)
        .map_err(|_| Error::ExternalCallFailure)?
        .map_err(|_| Error::ExternalCallFailure)
}
