#![no_std]
use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, contracttype, panic_with_error,
    symbol_short, token,
    xdr::{ScErrorCode, ScErrorType},
    Address, Env, Symbol,
};

const RATE: Symbol = symbol_short!("RATE");
const MODE: Symbol = symbol_short!("MODE");
const REENTRY: Symbol = symbol_short!("REENTRY");
const REENTERED: Symbol = symbol_short!("REENTERED");
const REJECTED: Symbol = symbol_short!("REJECTED");

/// What the host returns to a contract calling back into one already on the stack.
const REENTRY_BLOCKED: soroban_sdk::Error =
    soroban_sdk::Error::from_type_and_code(ScErrorType::Context, ScErrorCode::InvalidAction);

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockError {
    Unavailable = 1,
}

/// How the next swaps behave.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Mode {
    Honest = 0,
    /// Every swap panics.
    Fail = 1,
    /// Takes the input and reports zero output.
    ZeroOutput = 2,
    /// Pays the quoted output but reports twice as much.
    OverReport = 3,
    /// Calls back into the fund before paying out.
    Reenter = 4,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reentry {
    pub fund: Address,
    pub depositor: Address,
}

#[contractclient(name = "FundEntryClient")]
pub trait FundEntry {
    fn deposit(e: Env, depositor: Address, amount: i128) -> i128;

    fn withdraw(e: Env, depositor: Address) -> i128;
}

pub trait MockExchangeTrait {
    // Output is `amount_in * numerator / denominator`.
    fn set_rate(e: Env, numerator: i128, denominator: i128);

    fn set_mode(e: Env, mode: Mode);

    fn set_reentry(e: Env, fund: Address, depositor: Address);

    // Whether any call back into the fund went through.
    fn reentered(e: Env) -> bool;

    // Whether the host refused every call back into the fund as re-entry.
    fn reentry_rejected(e: Env) -> bool;

    fn swap(e: Env, from: Address, token_in: Address, token_out: Address, amount_in: i128) -> i128;
}

#[contract]
pub struct MockExchange;

fn try_reenter(e: &Env) {
    let Some(reentry) = e.storage().instance().get::<_, Reentry>(&REENTRY) else {
        return;
    };
    let fund = FundEntryClient::new(e, &reentry.fund);
    let deposited = fund.try_deposit(&reentry.depositor, &1);
    let withdrawn = fund.try_withdraw(&reentry.depositor);
    if matches!(deposited, Ok(Ok(_))) || matches!(withdrawn, Ok(Ok(_))) {
        e.storage().instance().set(&REENTERED, &true);
    }
    let rejected = matches!(deposited, Err(Ok(err)) if err == REENTRY_BLOCKED)
        && matches!(withdrawn, Err(Ok(err)) if err == REENTRY_BLOCKED);
    e.storage().instance().set(&REJECTED, &rejected);
}

#[contractimpl]
impl MockExchangeTrait for MockExchange {
    fn set_rate(e: Env, numerator: i128, denominator: i128) {
        e.storage().instance().set(&RATE, &(numerator, denominator));
    }

    fn set_mode(e: Env, mode: Mode) {
        e.storage().instance().set(&MODE, &mode);
    }

    fn set_reentry(e: Env, fund: Address, depositor: Address) {
        e.storage()
            .instance()
            .set(&REENTRY, &Reentry { fund, depositor });
        e.storage().instance().set(&MODE, &Mode::Reenter);
    }

    fn reentered(e: Env) -> bool {
        e.storage().instance().get(&REENTERED).unwrap_or(false)
    }

    fn reentry_rejected(e: Env) -> bool {
        e.storage().instance().get(&REJECTED).unwrap_or(false)
    }

    fn swap(e: Env, from: Address, token_in: Address, token_out: Address, amount_in: i128) -> i128 {
        let mode: Mode = e.storage().instance().get(&MODE).unwrap_or(Mode::Honest);
        if mode == Mode::Fail {
            panic_with_error!(&e, MockError::Unavailable);
        }

        let this = e.current_contract_address();
        token::Client::new(&e, &token_in).transfer_from(&this, &from, &this, &amount_in);

        if mode == Mode::ZeroOutput {
            return 0;
        }
        if mode == Mode::Reenter {
            try_reenter(&e);
        }

        let (numerator, denominator): (i128, i128) =
            e.storage().instance().get(&RATE).unwrap_or((1, 1));
        let amount_out = amount_in * numerator / denominator;
        token::Client::new(&e, &token_out).transfer(&this, &from, &amount_out);

        if mode == Mode::OverReport {
            amount_out * 2
        } else {
            amount_out
        }
    }
}
