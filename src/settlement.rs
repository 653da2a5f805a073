use soroban_sdk::{log, Env, Map, I256};
use types::{asset::Settlement, error::Error};

use crate::assets::{balance_of, get_assets};
use crate::storage::{get_settlement, get_total_value_locked, put_settlement};
use crate::types;

/// `floor(entry * balance / total)`. The remainder stays in the fund.
///
/// The product is taken in 256 bits; only the final share has to fit in
/// an `i128`.
pub fn share_of(e: &Env, entry: i128, balance: i128, total: i128) -> Result<i128, Error> {
    if entry <= 0 || balance <= 0 {
        return Ok(0);
    }
    if total < entry {
        return Err(Error::MathOverflow);
    }
    I256::from_i128(e, entry)
        .mul(&I256::from_i128(e, balance))
        .div(&I256::from_i128(e, total))
        .to_i128()
        .ok_or(Error::MathOverflow)
}

/// Returns the settlement, taking the snapshot on first use.
///
/// No deposit is accepted after `open_until` and the snapshot is taken
/// before the first ledger entry is cleared, so the stored total equals the
/// value locked when raising closed.
pub(crate) fn settle(e: &Env) -> Settlement {
    if let Some(settlement) = get_settlement(e) {
        return settlement;
    }

    let mut balances = Map::new(e);
    for asset in get_assets(e).iter() {
        let balance = balance_of(e, &asset);
        balances.set(asset, balance);
    }

    let settlement = Settlement {
        total_value_locked: get_total_value_locked(e),
        balances,
        settled_at: e.ledger().timestamp(),
    };
    log!(e, "fund settled", settlement.total_value_locked);
    put_settlement(e, &settlement);
    settlement
}
