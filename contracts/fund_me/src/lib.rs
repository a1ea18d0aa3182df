#![no_std]

mod errors;
mod events;
mod price;
mod storage;
mod token;

pub use errors::FundMeError;
use events::{FundedEvent, InitializedEvent, WithdrawnEvent};
pub use price::{MINIMUM_USD, USD_DECIMALS};
use soroban_sdk::{contract, contractimpl, log, Address, Env, Vec};
use storage::DataKey;

#[contract]
pub struct FundMeContract;

#[contractimpl]
impl FundMeContract {
    fn read_address(env: &Env, key: &DataKey) -> Result<Address, FundMeError> {
        env.storage()
            .instance()
            .get(key)
            .ok_or(FundMeError::NotInitialized)
    }

    fn read_epoch(env: &Env) -> u32 {
        env.storage().instance().get(&DataKey::Epoch).unwrap_or(0)
    }

    fn read_funder_count(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::FunderCount)
            .unwrap_or(0)
    }

    /// Initialize the contract with its owner, price feed and native token
    pub fn initialize(
        env: Env,
        owner: Address,
        price_feed: Address,
        native_token: Address,
    ) -> Result<(), FundMeError> {
        // Check if already initialized
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(FundMeError::AlreadyInitialized);
        }

        // Require owner authorization
        owner.require_auth();

        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::PriceFeed, &price_feed);
        env.storage()
            .instance()
            .set(&DataKey::NativeToken, &native_token);
        env.storage().instance().set(&DataKey::Epoch, &0u32);
        env.storage().instance().set(&DataKey::FunderCount, &0u32);

        InitializedEvent {
            owner,
            price_feed,
            native_token,
        }
        .publish(&env);

        Ok(())
    }

    /// Contribute `amount` of the native token. The contribution must be
    /// worth at least [`MINIMUM_USD`] at the current oracle price.
    pub fn fund(env: Env, funder: Address, amount: i128) -> Result<(), FundMeError> {
        let price_feed = Self::read_address(&env, &DataKey::PriceFeed)?;
        let native_token = Self::read_address(&env, &DataKey::NativeToken)?;

        // Require funder authorization
        funder.require_auth();

        if amount < 0 {
            return Err(FundMeError::InvalidAmount);
        }

        let usd_value = price::get_conversion_rate(&env, &price_feed, &native_token, amount)?;
        if usd_value < MINIMUM_USD {
            return Err(FundMeError::InsufficientContribution);
        }

        let epoch = Self::read_epoch(&env);
        let funded_key = DataKey::Funded(epoch, funder.clone());
        let funded: Option<i128> = env.storage().persistent().get(&funded_key);
        let total = funded
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(FundMeError::ArithmeticOverflow)?;

        // Pull the contribution into the contract
        let contract_address = env.current_contract_address();
        token::transfer(&env, &native_token, &funder, &contract_address, &amount);

        if funded.is_none() {
            let count = Self::read_funder_count(&env);
            env.storage()
                .persistent()
                .set(&DataKey::Funder(epoch, count), &funder);
            env.storage()
                .instance()
                .set(&DataKey::FunderCount, &(count + 1));
        }
        env.storage().persistent().set(&funded_key, &total);

        log!(&env, "funded", funder, amount, usd_value);
        FundedEvent {
            funder,
            amount,
            usd_value,
        }
        .publish(&env);

        Ok(())
    }

    /// Pay the whole balance out to the owner and reset the ledger (owner only)
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, FundMeError> {
        let owner = Self::read_address(&env, &DataKey::Owner)?;

        // Verify owner identity
        if caller != owner {
            return Err(FundMeError::NotOwner);
        }

        // Require owner authorization
        caller.require_auth();

        let native_token = Self::read_address(&env, &DataKey::NativeToken)?;
        let contract_address = env.current_contract_address();
        let amount = token::balance(&env, &native_token, &contract_address);

        // Nothing is reset unless the payout went through
        if amount > 0 {
            token::try_transfer(&env, &native_token, &contract_address, &owner, &amount)?;
        }

        // Mapping and list are both dropped by moving to the next epoch
        let funders_cleared = Self::read_funder_count(&env);
        let epoch = Self::read_epoch(&env);
        env.storage().instance().set(&DataKey::Epoch, &(epoch + 1));
        env.storage().instance().set(&DataKey::FunderCount, &0u32);

        log!(&env, "withdrawn", owner, amount, funders_cleared);
        WithdrawnEvent {
            owner,
            amount,
            funders_cleared,
        }
        .publish(&env);

        Ok(amount)
    }

    /// Get the price feed address
    pub fn get_price_feed(env: Env) -> Result<Address, FundMeError> {
        Self::read_address(&env, &DataKey::PriceFeed)
    }

    /// Get the cumulative amount contributed by `funder` since the last withdrawal
    pub fn get_address_to_amount_funded(env: Env, funder: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Funded(Self::read_epoch(&env), funder))
            .unwrap_or(0)
    }

    /// Get the funder at `index`, in first-contribution order
    pub fn get_funder(env: Env, index: u32) -> Result<Address, FundMeError> {
        if index >= Self::read_funder_count(&env) {
            return Err(FundMeError::FunderNotFound);
        }

        env.storage()
            .persistent()
            .get(&DataKey::Funder(Self::read_epoch(&env), index))
            .ok_or(FundMeError::FunderNotFound)
    }

    /// Get every funder since the last withdrawal, in first-contribution order
    pub fn get_funders(env: Env) -> Vec<Address> {
        let epoch = Self::read_epoch(&env);
        let mut funders: Vec<Address> = Vec::new(&env);
        for index in 0..Self::read_funder_count(&env) {
            if let Some(funder) = env
                .storage()
                .persistent()
                .get(&DataKey::Funder(epoch, index))
            {
                funders.push_back(funder);
            }
        }
        funders
    }

    /// Get the number of funders since the last withdrawal
    pub fn get_funders_count(env: Env) -> u32 {
        Self::read_funder_count(&env)
    }

    /// Get owner address
    pub fn get_owner(env: Env) -> Result<Address, FundMeError> {
        Self::read_address(&env, &DataKey::Owner)
    }

    /// Get the token contributions are made in
    pub fn get_native_token(env: Env) -> Result<Address, FundMeError> {
        Self::read_address(&env, &DataKey::NativeToken)
    }

    /// Version reported by the price feed
    pub fn get_version(env: Env) -> Result<u32, FundMeError> {
        let price_feed = Self::read_address(&env, &DataKey::PriceFeed)?;
        Ok(price_feed_interface::PriceFeedClient::new(&env, &price_feed).version())
    }

    /// Get the minimum contribution in USD (18 decimals)
    pub fn get_minimum_usd(_env: Env) -> i128 {
        MINIMUM_USD
    }

    /// USD value (18 decimals) of `amount` at the current oracle price
    pub fn get_conversion_rate(env: Env, amount: i128) -> Result<i128, FundMeError> {
        let price_feed = Self::read_address(&env, &DataKey::PriceFeed)?;
        let native_token = Self::read_address(&env, &DataKey::NativeToken)?;
        price::get_conversion_rate(&env, &price_feed, &native_token, amount)
    }
}
