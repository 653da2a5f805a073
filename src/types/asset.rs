use soroban_sdk::{contracttype, Address, Map};

/// Cumulative movements of one asset through the fund.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[contracttype]
pub struct AssetFlows {
    pub deposited: i128,
    pub swapped_in: i128,
    pub swapped_out: i128,
    pub deployed: i128,
    pub collected: i128,
    pub redeemed: i128,
    pub paid_out: i128,
}

/// Frozen at the first withdrawal. Every payout is computed against these
/// figures, so the order in which depositors withdraw does not matter.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Settlement {
    pub total_value_locked: i128,
    pub balances: Map<Address, i128>,
    pub settled_at: u64,
}
