use soroban_sdk::contracttype;

/// Lifecycle phase of a fund. Never stored; see [`Phase::at`].
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Phase {
    Raising = 1,
    Deploying = 2,
    MaturedPendingRedemption = 3,
    MaturedWithdrawable = 4,
}

impl Phase {
    pub fn at(now: u64, open_until: u64, matures_at: u64, has_open_positions: bool) -> Phase {
        if now < open_until {
            Phase::Raising
        } else if now < matures_at {
            Phase::Deploying
        } else if has_open_positions {
            Phase::MaturedPendingRedemption
        } else {
            Phase::MaturedWithdrawable
        }
    }
}
