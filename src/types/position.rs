use soroban_sdk::{contracttype, Address, Vec};

/// What the position adapter reports back from a mint.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct MintedPosition {
    pub handle: u64,
    pub used_a: i128,
    pub used_b: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PositionRecord {
    pub handle: u64,
    pub token_a: Address,
    pub token_b: Address,
    pub used_a: i128,
    pub used_b: i128,
    pub fee_tier: u32,
    pub opened_at: u64,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RedemptionFailure {
    AdapterCallFailed = 1,
    InvalidAdapterResponse = 2,
}

/// Result of a batch redemption. Handles that failed stay open and can be
/// retried one by one with `redeem_lp_position`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum RedemptionOutcome {
    /// Every open handle was redeemed; carries the redeemed handles.
    Complete(Vec<u64>),
    /// Carries the handles that are still open.
    PartialRedemptionFailure(Vec<u64>),
}
