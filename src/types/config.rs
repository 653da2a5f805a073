use soroban_sdk::{contracttype, Address, String};

/// Immutable fund configuration, written once by `initialize`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct FundConfig {
    pub manager: Address,
    /// The only token accepted for deposits.
    pub denomination: Address,
    pub exchange: Address,
    pub position_manager: Address,
    /// Deposits are accepted strictly before this timestamp.
    pub open_until: u64,
    /// Redemption and withdrawal open at this timestamp.
    pub matures_at: u64,
    pub name: String,
}
