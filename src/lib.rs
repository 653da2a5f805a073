#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

mod adapters;
mod assets;
mod constants;
mod events;
mod ledger;
mod position;
pub mod settlement;
mod storage;
pub mod types;

use assets::{
    add_flow, approve, balance_of, ensure_holds, get_assets, get_flows, track_asset, try_pay, Flow,
};
use ledger::{
    add_claimable, clear_deposit, get_claimable, get_deposited_amount, get_depositor_count,
    get_depositors, get_last_deposit_at, record_deposit, take_claimable,
};
use position::{
    clear_redemption_failure, close_position, get_open_positions, get_position,
    get_redemption_failure, has_open_positions, is_open, open_position, put_redemption_failure,
    reopen_position,
};
use settlement::{settle, share_of};
use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Vec};
use storage::{
    extend_instance, get_config, get_settlement, get_total_value_locked, has_config, is_manager,
    is_redeeming, put_config, put_redeeming, put_total_value_locked,
};
use types::{
    asset::{AssetFlows, Settlement},
    config::FundConfig,
    error::Error,
    phase::Phase,
    position::{PositionRecord, RedemptionFailure, RedemptionOutcome},
};

fn current_phase(e: &Env, config: &FundConfig) -> Phase {
    Phase::at(
        e.ledger().timestamp(),
        config.open_until,
        config.matures_at,
        has_open_positions(e) || is_redeeming(e),
    )
}

fn require_phase(e: &Env, config: &FundConfig, allowed: &[Phase]) -> Result<Phase, Error> {
    let phase = current_phase(e, config);
    if !allowed.contains(&phase) {
        log!(e, "operation rejected in phase", phase);
        return Err(Error::PhaseViolation);
    }
    Ok(phase)
}

fn require_manager(config: &FundConfig, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if !is_manager(config, caller) {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// Redeems one handle. The handle leaves the open set before the adapter
/// is called and is put back if the call fails. The redeeming flag keeps
/// the fund out of `MaturedWithdrawable` while the call is in flight.
fn redeem_handle(
    e: &Env,
    config: &FundConfig,
    handle: u64,
) -> Result<(i128, i128), RedemptionFailure> {
    put_redeeming(e, true);
    close_position(e, handle);

    let returned = match adapters::redeem(e, &config.position_manager, handle) {
        Ok((amount_a, amount_b)) if amount_a >= 0 && amount_b >= 0 => Ok((amount_a, amount_b)),
        Ok(_) => Err(RedemptionFailure::InvalidAdapterResponse),
        Err(_) => Err(RedemptionFailure::AdapterCallFailed),
    };
    put_redeeming(e, false);

    match returned {
        Ok((amount_a, amount_b)) => {
            if let Some(record) = get_position(e, handle) {
                add_flow(e, &record.token_a, Flow::Redeemed, amount_a);
                add_flow(e, &record.token_b, Flow::Redeemed, amount_b);
            }
            clear_redemption_failure(e, handle);
            events::position_redeemed(e, handle, amount_a, amount_b);
            Ok((amount_a, amount_b))
        }
        Err(reason) => {
            log!(e, "redemption failed", handle, reason);
            reopen_position(e, handle);
            put_redemption_failure(e, handle, reason);
            events::redemption_failed(e, handle, reason);
            Err(reason)
        }
    }
}

pub trait FundTrait {
    // Sets up the fund. Can only be called once.
    //
    // # Arguments
    //
    // * `manager` - Address allowed to swap, open, collect and redeem positions
    // * `denomination` - Token accepted for deposits
    // * `exchange` - Exchange adapter contract
    // * `position_manager` - Position adapter contract
    // * `open_until` - Deposits are accepted strictly before this timestamp
    // * `matures_at` - Redemption and withdrawals open at this timestamp
    // * `name` - Display name
    #[allow(clippy::too_many_arguments)]
    fn initialize(
        e: Env,
        manager: Address,
        denomination: Address,
        exchange: Address,
        position_manager: Address,
        open_until: u64,
        matures_at: u64,
        name: String,
    ) -> Result<(), Error>;

    // Deposits `amount` of the denomination token. Raising phase only.
    //
    // # Returns
    //
    // The depositor's total deposited amount
    fn deposit(e: Env, depositor: Address, amount: i128) -> Result<i128, Error>;

    // Swaps `amount_in` of a token the fund holds through the exchange adapter.
    // Manager only, Deploying phase only.
    //
    // # Returns
    //
    // Amount of `token_out` received
    fn swap_tokens(
        e: Env,
        manager: Address,
        token_in: Address,
        token_out: Address,
        amount_in: i128,
    ) -> Result<i128, Error>;

    // Opens a liquidity position through the position adapter.
    // Manager only, Deploying phase only.
    //
    // # Returns
    //
    // The recorded position, with the amounts the adapter actually used
    #[allow(clippy::too_many_arguments)]
    fn create_lp_position(
        e: Env,
        manager: Address,
        token_a: Address,
        token_b: Address,
        amount_a: i128,
        amount_b: i128,
        min_a: i128,
        min_b: i128,
        fee_tier: u32,
    ) -> Result<PositionRecord, Error>;

    // Collects accrued fees of an open position without closing it.
    // The reported amounts must have arrived in the fund's balance.
    //
    // # Returns
    //
    // Fee amounts of token A and token B
    fn collect_fees(e: Env, manager: Address, handle: u64) -> Result<(i128, i128), Error>;

    // Redeems every open position. Each handle is handled independently;
    // failed handles stay open. Only at or after maturity.
    fn redeem_all_lp_positions(e: Env, manager: Address) -> Result<RedemptionOutcome, Error>;

    // Redeems a single open position. Only at or after maturity.
    //
    // # Returns
    //
    // Amounts of token A and token B returned
    fn redeem_lp_position(e: Env, manager: Address, handle: u64) -> Result<(i128, i128), Error>;

    // Pays the depositor's share of the settled balances and clears their entry.
    // Only once matured and every position is redeemed. The denomination share
    // is paid first; an in-kind share whose transfer is refused is kept as a
    // claim instead of failing the withdrawal.
    //
    // # Returns
    //
    // Amount of the denomination token paid out
    fn withdraw(e: Env, depositor: Address) -> Result<i128, Error>;

    // Pays out an in-kind share that could not be transferred at withdrawal.
    //
    // # Returns
    //
    // Amount of `asset` paid
    fn claim(e: Env, depositor: Address, asset: Address) -> Result<i128, Error>;

    fn claimable(e: Env, depositor: Address, asset: Address) -> i128;

    fn total_value_locked(e: Env) -> i128;

    fn deposited_amount(e: Env, depositor: Address) -> i128;

    fn last_deposit_at(e: Env, depositor: Address) -> Option<u64>;

    fn depositor_count(e: Env) -> u32;

    // At most 200 depositors, in first-deposit order, starting at `start`.
    fn depositors(e: Env, start: u32, limit: u32) -> Vec<Address>;

    fn phase(e: Env) -> Result<Phase, Error>;

    fn config(e: Env) -> Result<FundConfig, Error>;

    fn open_positions(e: Env) -> Vec<u64>;

    fn position(e: Env, handle: u64) -> Option<PositionRecord>;

    fn redemption_failure(e: Env, handle: u64) -> Option<RedemptionFailure>;

    fn assets(e: Env) -> Vec<Address>;

    fn asset_flows(e: Env, asset: Address) -> AssetFlows;

    fn settlement(e: Env) -> Option<Settlement>;
}

#[contract]
pub struct Fund;

#[contractimpl]
impl FundTrait for Fund {
    fn initialize(
        e: Env,
        manager: Address,
        denomination: Address,
        exchange: Address,
        position_manager: Address,
        open_until: u64,
        matures_at: u64,
        name: String,
    ) -> Result<(), Error> {
        if has_config(&e) {
            return Err(Error::AlreadyInitialized);
        }
        if open_until <= e.ledger().timestamp() || open_until >= matures_at {
            return Err(Error::InvalidSchedule);
        }

        put_config(
            &e,
            &FundConfig {
                manager,
                denomination: denomination.clone(),
                exchange,
                position_manager,
                open_until,
                matures_at,
                name,
            },
        );
        put_total_value_locked(&e, 0);
        track_asset(&e, &denomination);
        extend_instance(&e);
        Ok(())
    }

    fn deposit(e: Env, depositor: Address, amount: i128) -> Result<i128, Error> {
        depositor.require_auth();
        let config = get_config(&e)?;
        require_phase(&e, &config, &[Phase::Raising])?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let total = record_deposit(&e, &depositor, amount)?;
        let tvl = get_total_value_locked(&e)
            .checked_add(amount)
            .ok_or(Error::MathOverflow)?;
        put_total_value_locked(&e, tvl);
        add_flow(&e, &config.denomination, Flow::Deposited, amount);

        assets::collect(&e, &config.denomination, &depositor, amount)?;

        events::deposit(&e, &depositor, amount);
        extend_instance(&e);
        Ok(total)
    }

    fn swap_tokens(
        e: Env,
        manager: Address,
        token_in: Address,
        token_out: Address,
        amount_in: i128,
    ) -> Result<i128, Error> {
        let config = get_config(&e)?;
        require_manager(&config, &manager)?;
        require_phase(&e, &config, &[Phase::Deploying])?;
        if amount_in <= 0 || token_in == token_out {
            return Err(Error::InvalidAmount);
        }
        ensure_holds(&e, &token_in, amount_in)?;

        let out_before = balance_of(&e, &token_out);
        approve(&e, &token_in, &config.exchange, amount_in)?;
        let amount_out = adapters::swap(&e, &config.exchange, &token_in, &token_out, amount_in)?;
        if amount_out <= 0 {
            return Err(Error::ExternalCallFailure);
        }
        let received = balance_of(&e, &token_out) - out_before;
        if received < amount_out {
            log!(&e, "exchange under-delivered", amount_out, received);
            return Err(Error::ExternalCallFailure);
        }

        track_asset(&e, &token_in);
        track_asset(&e, &token_out);
        add_flow(&e, &token_in, Flow::SwappedOut, amount_in);
        add_flow(&e, &token_out, Flow::SwappedIn, amount_out);

        events::swap(&e, &token_in, &token_out, amount_in, amount_out);
        extend_instance(&e);
        Ok(amount_out)
    }

    fn create_lp_position(
        e: Env,
        manager: Address,
        token_a: Address,
        token_b: Address,
        amount_a: i128,
        amount_b: i128,
        min_a: i128,
        min_b: i128,
        fee_tier: u32,
    ) -> Result<PositionRecord, Error> {
        let config = get_config(&e)?;
        require_manager(&config, &manager)?;
        require_phase(&e, &config, &[Phase::Deploying])?;
        if token_a == token_b
            || amount_a < 0
            || amount_b < 0
            || (amount_a == 0 && amount_b == 0)
            || min_a < 0
            || min_b < 0
            || min_a > amount_a
            || min_b > amount_b
        {
            return Err(Error::InvalidAmount);
        }
        ensure_holds(&e, &token_a, amount_a)?;
        ensure_holds(&e, &token_b, amount_b)?;

        let a_before = balance_of(&e, &token_a);
        let b_before = balance_of(&e, &token_b);
        approve(&e, &token_a, &config.position_manager, amount_a)?;
        approve(&e, &token_b, &config.position_manager, amount_b)?;
        let minted = adapters::mint(
            &e,
            &config.position_manager,
            &token_a,
            amount_a,
            &token_b,
            amount_b,
            min_a,
            min_b,
            fee_tier,
        )?;

        if minted.used_a < min_a
            || minted.used_b < min_b
            || minted.used_a > amount_a
            || minted.used_b > amount_b
            || is_open(&e, minted.handle)
            || get_position(&e, minted.handle).is_some()
        {
            return Err(Error::ExternalCallFailure);
        }
        let spent_a = a_before - balance_of(&e, &token_a);
        let spent_b = b_before - balance_of(&e, &token_b);
        if spent_a != minted.used_a || spent_b != minted.used_b {
            log!(&e, "position adapter misreported usage", spent_a, spent_b);
            return Err(Error::ExternalCallFailure);
        }

        let record = PositionRecord {
            handle: minted.handle,
            token_a: token_a.clone(),
            token_b: token_b.clone(),
            used_a: minted.used_a,
            used_b: minted.used_b,
            fee_tier,
            opened_at: e.ledger().timestamp(),
        };
        open_position(&e, &record);
        track_asset(&e, &token_a);
        track_asset(&e, &token_b);
        add_flow(&e, &token_a, Flow::Deployed, minted.used_a);
        add_flow(&e, &token_b, Flow::Deployed, minted.used_b);

        events::position_opened(&e, record.handle, record.used_a, record.used_b);
        extend_instance(&e);
        Ok(record)
    }

    fn collect_fees(e: Env, manager: Address, handle: u64) -> Result<(i128, i128), Error> {
        let config = get_config(&e)?;
        require_manager(&config, &manager)?;
        if !is_open(&e, handle) {
            return Err(Error::UnknownPosition);
        }
        let record = get_position(&e, handle).ok_or(Error::UnknownPosition)?;

        let a_before = balance_of(&e, &record.token_a);
        let b_before = balance_of(&e, &record.token_b);
        let (amount_a, amount_b) = adapters::collect_fees(&e, &config.position_manager, handle)?;
        if amount_a < 0 || amount_b < 0 {
            return Err(Error::ExternalCallFailure);
        }
        let received_a = balance_of(&e, &record.token_a) - a_before;
        let received_b = balance_of(&e, &record.token_b) - b_before;
        if received_a < amount_a || received_b < amount_b {
            log!(&e, "position adapter over-reported fees", received_a, received_b);
            return Err(Error::ExternalCallFailure);
        }

        add_flow(&e, &record.token_a, Flow::Collected, amount_a);
        add_flow(&e, &record.token_b, Flow::Collected, amount_b);

        events::fees_collected(&e, handle, amount_a, amount_b);
        extend_instance(&e);
        Ok((amount_a, amount_b))
    }

    fn redeem_all_lp_positions(e: Env, manager: Address) -> Result<RedemptionOutcome, Error> {
        let config = get_config(&e)?;
        require_manager(&config, &manager)?;
        require_phase(
            &e,
            &config,
            &[Phase::MaturedPendingRedemption, Phase::MaturedWithdrawable],
        )?;

        let mut redeemed = Vec::new(&e);
        let mut failed = Vec::new(&e);
        for handle in get_open_positions(&e).iter() {
            match redeem_handle(&e, &config, handle) {
                Ok(_) => redeemed.push_back(handle),
                Err(_) => failed.push_back(handle),
            }
        }

        extend_instance(&e);
        if failed.is_empty() {
            Ok(RedemptionOutcome::Complete(redeemed))
        } else {
            Ok(RedemptionOutcome::PartialRedemptionFailure(failed))
        }
    }

    fn redeem_lp_position(e: Env, manager: Address, handle: u64) -> Result<(i128, i128), Error> {
        let config = get_config(&e)?;
        require_manager(&config, &manager)?;
        require_phase(
            &e,
            &config,
            &[Phase::MaturedPendingRedemption, Phase::MaturedWithdrawable],
        )?;
        if !is_open(&e, handle) {
            return Err(Error::UnknownPosition);
        }

        let returned =
            redeem_handle(&e, &config, handle).map_err(|_| Error::ExternalCallFailure)?;
        extend_instance(&e);
        Ok(returned)
    }

    fn withdraw(e: Env, depositor: Address) -> Result<i128, Error> {
        depositor.require_auth();
        let config = get_config(&e)?;
        require_phase(&e, &config, &[Phase::MaturedWithdrawable])?;

        let entry = get_deposited_amount(&e, &depositor);
        if entry <= 0 {
            return Err(Error::NothingToWithdraw);
        }

        let settlement = settle(&e);

        // Clear the entry before any value leaves the fund.
        clear_deposit(&e, &depositor);
        let tvl = get_total_value_locked(&e)
            .checked_sub(entry)
            .ok_or(Error::MathOverflow)?;
        put_total_value_locked(&e, tvl);

        let denomination_balance = settlement
            .balances
            .get(config.denomination.clone())
            .unwrap_or(0);
        let paid = share_of(
            &e,
            entry,
            denomination_balance,
            settlement.total_value_locked,
        )?;
        if paid > 0 {
            assets::pay(&e, &config.denomination, &depositor, paid)?;
            add_flow(&e, &config.denomination, Flow::PaidOut, paid);
        }

        for (asset, balance) in settlement.balances.iter() {
            if asset == config.denomination {
                continue;
            }
            let amount = share_of(&e, entry, balance, settlement.total_value_locked)?;
            if amount == 0 {
                continue;
            }
            if try_pay(&e, &asset, &depositor, amount) {
                add_flow(&e, &asset, Flow::PaidOut, amount);
                events::in_kind_payout(&e, &depositor, &asset, amount);
            } else {
                log!(&e, "in-kind payout refused", asset, amount);
                add_claimable(&e, &depositor, &asset, amount)?;
                events::payout_deferred(&e, &depositor, &asset, amount);
            }
        }

        events::withdrawal(&e, &depositor, paid);
        extend_instance(&e);
        Ok(paid)
    }

    fn claim(e: Env, depositor: Address, asset: Address) -> Result<i128, Error> {
        depositor.require_auth();
        get_config(&e)?;

        let amount = take_claimable(&e, &depositor, &asset);
        if amount <= 0 {
            return Err(Error::NothingToWithdraw);
        }
        assets::pay(&e, &asset, &depositor, amount)?;
        add_flow(&e, &asset, Flow::PaidOut, amount);

        events::in_kind_payout(&e, &depositor, &asset, amount);
        extend_instance(&e);
        Ok(amount)
    }

    fn claimable(e: Env, depositor: Address, asset: Address) -> i128 {
        get_claimable(&e, &depositor, &asset)
    }

    fn total_value_locked(e: Env) -> i128 {
        get_total_value_locked(&e)
    }

    fn deposited_amount(e: Env, depositor: Address) -> i128 {
        get_deposited_amount(&e, &depositor)
    }

    fn last_deposit_at(e: Env, depositor: Address) -> Option<u64> {
        get_last_deposit_at(&e, &depositor)
    }

    fn depositor_count(e: Env) -> u32 {
        get_depositor_count(&e)
    }

    fn depositors(e: Env, start: u32, limit: u32) -> Vec<Address> {
        get_depositors(&e, start, limit)
    }

    fn phase(e: Env) -> Result<Phase, Error> {
        let config = get_config(&e)?;
        Ok(current_phase(&e, &config))
    }

    fn config(e: Env) -> Result<FundConfig, Error> {
        get_config(&e)
    }

    fn open_positions(e: Env) -> Vec<u64> {
        get_open_positions(&e)
    }

    fn position(e: Env, handle: u64) -> Option<PositionRecord> {
        get_position(&e, handle)
    }

    fn redemption_failure(e: Env, handle: u64) -> Option<RedemptionFailure> {
        get_redemption_failure(&e, handle)
    }

    fn assets(e: Env) -> Vec<Address> {
        get_assets(&e)
    }

    fn asset_flows(e: Env, asset: Address) -> AssetFlows {
        get_flows(&e, &asset)
    }

    fn settlement(e: Env) -> Option<Settlement> {
        get_settlement(&e)
    }
}
