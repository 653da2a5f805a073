use soroban_sdk::{contracttype, Address};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    // instance
    Config,
    TotalValueLocked,
    Settlement,
    Redeeming,
    // persistent
    DepositorCount,
    Depositor(u32),
    OpenPositions,
    Assets,
    Deposited(Address),
    DepositedAt(Address),
    Position(u64),
    RedemptionFailure(u64),
    Flows(Address),
    Claimable(Address, Address),
}
