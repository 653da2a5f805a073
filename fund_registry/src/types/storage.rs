use soroban_sdk::{contracttype, Address, BytesN};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    // instance
    Config,
    FundCount,
    // persistent
    FundsByManager(Address),
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RegistryConfig {
    pub admin: Address,
    pub fund_wasm_hash: BytesN<32>,
    pub exchange: Address,
    pub position_manager: Address,
}
