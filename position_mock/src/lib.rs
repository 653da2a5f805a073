#![no_std]
use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, contracttype, panic_with_error,
    symbol_short, token,
    xdr::{ScErrorCode, ScErrorType},
    Address, Env, Symbol,
};

const NEXT_HANDLE: Symbol = symbol_short!("NEXT");
const FILL_BPS: Symbol = symbol_short!("FILL");
const REENTRY: Symbol = symbol_short!("REENTRY");
const REENTERED: Symbol = symbol_short!("REENTERED");
const REJECTED: Symbol = symbol_short!("REJECTED");
const OVER_FEES: Symbol = symbol_short!("OVERFEES");

/// What the host returns to a contract calling back into one already on the stack.
const REENTRY_BLOCKED: soroban_sdk::Error =
    soroban_sdk::Error::from_type_and_code(ScErrorType::Context, ScErrorCode::InvalidAction);

const FULL_FILL_BPS: i128 = 10_000;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockError {
    Slippage = 1,
    NoSuchPosition = 2,
    NotOwner = 3,
    RedeemFailed = 4,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Position(u64),
    FailRedeem(u64),
}

/// Mirrors the fund's view of a mint.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintedPosition {
    pub handle: u64,
    pub used_a: i128,
    pub used_b: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MockPosition {
    pub owner: Address,
    pub token_a: Address,
    pub token_b: Address,
    pub amount_a: i128,
    pub amount_b: i128,
    pub fees_a: i128,
    pub fees_b: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reentry {
    pub fund: Address,
    pub depositor: Address,
}

#[contractclient(name = "FundEntryClient")]
pub trait FundEntry {
    fn withdraw(e: Env, depositor: Address) -> i128;
}

pub trait MockPositionManagerTrait {
    // Share of the offered amounts taken on mint, in basis points.
    fn set_fill(e: Env, fill_bps: u32);

    fn set_redeem_failure(e: Env, handle: u64, failing: bool);

    fn set_reentry(e: Env, fund: Address, depositor: Address);

    fn reentered(e: Env) -> bool;

    // Whether the host refused the call back into the fund as re-entry.
    fn reentry_rejected(e: Env) -> bool;

    // Makes `collect_fees` report twice what it pays.
    fn set_fee_over_report(e: Env, over_report: bool);

    // Books fees on a position. The tokens must already be held by this contract.
    fn accrue_fees(e: Env, handle: u64, fees_a: i128, fees_b: i128);

    fn get_position(e: Env, handle: u64) -> Option<MockPosition>;

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

    fn redeem(e: Env, owner: Address, handle: u64) -> (i128, i128);
}

#[contract]
pub struct MockPositionManager;

fn load(e: &Env, handle: u64, owner: &Address) -> MockPosition {
    let position: MockPosition = match e.storage().instance().get(&DataKey::Position(handle)) {
        Some(position) => position,
        None => panic_with_error!(e, MockError::NoSuchPosition),
    };
    if position.owner != *owner {
        panic_with_error!(e, MockError::NotOwner);
    }
    position
}

fn pay(e: &Env, asset: &Address, to: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(e, asset).transfer(&e.current_contract_address(), to, &amount);
    }
}

fn pull(e: &Env, asset: &Address, from: &Address, amount: i128) {
    if amount > 0 {
        let this = e.current_contract_address();
        token::Client::new(e, asset).transfer_from(&this, from, &this, &amount);
    }
}

#[contractimpl]
impl MockPositionManagerTrait for MockPositionManager {
    fn set_fill(e: Env, fill_bps: u32) {
        e.storage().instance().set(&FILL_BPS, &fill_bps);
    }

    fn set_redeem_failure(e: Env, handle: u64, failing: bool) {
        e.storage()
            .instance()
            .set(&DataKey::FailRedeem(handle), &failing);
    }

    fn set_reentry(e: Env, fund: Address, depositor: Address) {
        e.storage()
            .instance()
            .set(&REENTRY, &Reentry { fund, depositor });
    }

    fn reentered(e: Env) -> bool {
        e.storage().instance().get(&REENTERED).unwrap_or(false)
    }

    fn reentry_rejected(e: Env) -> bool {
        e.storage().instance().get(&REJECTED).unwrap_or(false)
    }

    fn set_fee_over_report(e: Env, over_report: bool) {
        e.storage().instance().set(&OVER_FEES, &over_report);
    }

    fn accrue_fees(e: Env, handle: u64, fees_a: i128, fees_b: i128) {
        let key = DataKey::Position(handle);
        let mut position: MockPosition = match e.storage().instance().get(&key) {
            Some(position) => position,
            None => panic_with_error!(&e, MockError::NoSuchPosition),
        };
        position.fees_a += fees_a;
        position.fees_b += fees_b;
        e.storage().instance().set(&key, &position);
    }

    fn get_position(e: Env, handle: u64) -> Option<MockPosition> {
        e.storage().instance().get(&DataKey::Position(handle))
    }

    fn mint(
        e: Env,
        owner: Address,
        token_a: Address,
        amount_a: i128,
        token_b: Address,
        amount_b: i128,
        min_a: i128,
        min_b: i128,
        _fee_tier: u32,
    ) -> MintedPosition {
        owner.require_auth();
        let fill: u32 = e.storage().instance().get(&FILL_BPS).unwrap_or(10_000);
        let used_a = amount_a * fill as i128 / FULL_FILL_BPS;
        let used_b = amount_b * fill as i128 / FULL_FILL_BPS;
        if used_a < min_a || used_b < min_b {
            panic_with_error!(&e, MockError::Slippage);
        }

        pull(&e, &token_a, &owner, used_a);
        pull(&e, &token_b, &owner, used_b);

        let handle: u64 = e.storage().instance().get(&NEXT_HANDLE).unwrap_or(1);
        e.storage().instance().set(&NEXT_HANDLE, &(handle + 1));
        e.storage().instance().set(
            &DataKey::Position(handle),
            &MockPosition {
                owner,
                token_a,
                token_b,
                amount_a: used_a,
                amount_b: used_b,
                fees_a: 0,
                fees_b: 0,
            },
        );

        MintedPosition {
            handle,
            used_a,
            used_b,
        }
    }

    fn collect_fees(e: Env, owner: Address, handle: u64) -> (i128, i128) {
        owner.require_auth();
        let mut position = load(&e, handle, &owner);
        let fees = (position.fees_a, position.fees_b);
        position.fees_a = 0;
        position.fees_b = 0;
        e.storage()
            .instance()
            .set(&DataKey::Position(handle), &position);

        pay(&e, &position.token_a, &owner, fees.0);
        pay(&e, &position.token_b, &owner, fees.1);
        if e.storage().instance().get(&OVER_FEES).unwrap_or(false) {
            (fees.0 * 2, fees.1 * 2)
        } else {
            fees
        }
    }

    fn redeem(e: Env, owner: Address, handle: u64) -> (i128, i128) {
        owner.require_auth();
        let failing: bool = e
            .storage()
            .instance()
            .get(&DataKey::FailRedeem(handle))
            .unwrap_or(false);
        if failing {
            panic_with_error!(&e, MockError::RedeemFailed);
        }
        let position = load(&e, handle, &owner);
        e.storage().instance().remove(&DataKey::Position(handle));

        if let Some(reentry) = e.storage().instance().get::<_, Reentry>(&REENTRY) {
            let fund = FundEntryClient::new(&e, &reentry.fund);
            let withdrawn = fund.try_withdraw(&reentry.depositor);
            if matches!(withdrawn, Ok(Ok(_))) {
                e.storage().instance().set(&REENTERED, &true);
            }
            let rejected = matches!(withdrawn, Err(Ok(err)) if err == REENTRY_BLOCKED);
            e.storage().instance().set(&REJECTED, &rejected);
        }

        let amount_a = position.amount_a + position.fees_a;
        let amount_b = position.amount_b + position.fees_b;
        pay(&e, &position.token_a, &owner, amount_a);
        pay(&e, &position.token_b, &owner, amount_b);
        (amount_a, amount_b)
    }
}
