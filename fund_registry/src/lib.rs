#![no_std]

mod events;
mod storage;
pub mod types;

use soroban_sdk::{contract, contractclient, contractimpl, log, Address, BytesN, Env, String, Vec};
use storage::{
    add_fund, extend_instance, get_config, get_fund_count, get_funds_by_manager, has_config,
    next_fund_number, put_config,
};
use types::{error::Error, storage::RegistryConfig};

/// The part of the fund's interface the registry needs.
#[contractclient(name = "FundInitClient")]
pub trait FundInit {
    fn initialize(
        e: Env,
        manager: Address,
        denomination: Address,
        exchange: Address,
        position_manager: Address,
        open_until: u64,
        matures_at: u64,
        name: String,
    );
}

fn salt_for(e: &Env, fund_number: u64) -> BytesN<32> {
    let mut salt = [0u8; 32];
    salt[24..].copy_from_slice(&fund_number.to_be_bytes());
    BytesN::from_array(e, &salt)
}

pub trait FundRegistryTrait {
    // Sets the admin, the fund wasm and the adapters every new fund is wired to.
    fn initialize(
        e: Env,
        admin: Address,
        fund_wasm_hash: BytesN<32>,
        exchange: Address,
        position_manager: Address,
    ) -> Result<(), Error>;

    // Deploys and initializes a fund managed by `manager`.
    //
    // # Returns
    //
    // Address of the new fund
    fn create_new_fund(
        e: Env,
        manager: Address,
        denomination: Address,
        open_until: u64,
        matures_at: u64,
        name: String,
    ) -> Result<Address, Error>;

    // Replaces the wasm used for funds created from now on.
    fn set_fund_wasm(e: Env, admin: Address, fund_wasm_hash: BytesN<32>) -> Result<(), Error>;

    fn funds_by_manager(e: Env, manager: Address) -> Vec<Address>;

    fn fund_count(e: Env) -> u64;

    fn config(e: Env) -> Result<RegistryConfig, Error>;
}

#[contract]
pub struct FundRegistry;

#[contractimpl]
impl FundRegistryTrait for FundRegistry {
    fn initialize(
        e: Env,
        admin: Address,
        fund_wasm_hash: BytesN<32>,
        exchange: Address,
        position_manager: Address,
    ) -> Result<(), Error> {
        if has_config(&e) {
            return Err(Error::AlreadyInitialized);
        }
        put_config(
            &e,
            &RegistryConfig {
                admin,
                fund_wasm_hash,
                exchange,
                position_manager,
            },
        );
        extend_instance(&e);
        Ok(())
    }

    fn create_new_fund(
        e: Env,
        manager: Address,
        denomination: Address,
        open_until: u64,
        matures_at: u64,
        name: String,
    ) -> Result<Address, Error> {
        manager.require_auth();
        let config = get_config(&e)?;
        if open_until <= e.ledger().timestamp() || open_until >= matures_at {
            return Err(Error::InvalidSchedule);
        }

        let fund_number = next_fund_number(&e);
        let fund = e
            .deployer()
            .with_current_contract(salt_for(&e, fund_number))
            .deploy_v2(config.fund_wasm_hash, ());

        FundInitClient::new(&e, &fund)
            .try_initialize(
                &manager,
                &denomination,
                &config.exchange,
                &config.position_manager,
                &open_until,
                &matures_at,
                &name,
            )
            .map_err(|_| Error::ExternalCallFailure)?
            .map_err(|_| Error::ExternalCallFailure)?;

        add_fund(&e, &manager, &fund);
        log!(&e, "fund deployed", fund_number, fund);
        events::fund_created(&e, &manager, &fund);
        extend_instance(&e);
        Ok(fund)
    }

    fn set_fund_wasm(e: Env, admin: Address, fund_wasm_hash: BytesN<32>) -> Result<(), Error> {
        admin.require_auth();
        let mut config = get_config(&e)?;
        if config.admin != admin {
            return Err(Error::Unauthorized);
        }
        config.fund_wasm_hash = fund_wasm_hash;
        put_config(&e, &config);
        extend_instance(&e);
        Ok(())
    }

    fn funds_by_manager(e: Env, manager: Address) -> Vec<Address> {
        get_funds_by_manager(&e, &manager)
    }

    fn fund_count(e: Env) -> u64 {
        get_fund_count(&e)
    }

    fn config(e: Env) -> Result<RegistryConfig, Error> {
        get_config(&e)
    }
}
