#![no_std]

mod errors;
mod events;
mod storage;

pub use errors::PriceFeedError;
use events::AnswerUpdatedEvent;
pub use price_feed_interface::RoundData;
use soroban_sdk::{contract, contractimpl, Env, String};
use storage::DataKey;

const VERSION: u32 = 0;

#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    fn write_round(env: &Env, round: &RoundData) {
        env.storage()
            .persistent()
            .set(&DataKey::Round(round.round_id), round);
        env.storage()
            .instance()
            .set(&DataKey::LatestRound, &round.round_id);

        AnswerUpdatedEvent {
            round_id: round.round_id,
            answer: round.answer,
            updated_at: round.updated_at,
        }
        .publish(env);
    }

    /// Initialize the feed with its decimals and a first answer
    pub fn initialize(env: Env, decimals: u32, initial_answer: i128) -> Result<(), PriceFeedError> {
        if env.storage().instance().has(&DataKey::Decimals) {
            return Err(PriceFeedError::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Decimals, &decimals);
        env.storage().instance().set(&DataKey::LatestRound, &0u64);

        Self::update_answer(env, initial_answer)
    }

    /// Record a new round carrying `answer`, stamped with the ledger time
    pub fn update_answer(env: Env, answer: i128) -> Result<(), PriceFeedError> {
        let latest: u64 = env
            .storage()
            .instance()
            .get(&DataKey::LatestRound)
            .ok_or(PriceFeedError::NotInitialized)?;

        let round_id = latest + 1;
        let now = env.ledger().timestamp();
        let round = RoundData {
            round_id,
            answer,
            started_at: now,
            updated_at: now,
            answered_in_round: round_id,
        };
        Self::write_round(&env, &round);

        Ok(())
    }

    /// Overwrite a specific round and make it the latest one
    pub fn update_round_data(
        env: Env,
        round_id: u64,
        answer: i128,
        timestamp: u64,
        started_at: u64,
    ) -> Result<(), PriceFeedError> {
        if !env.storage().instance().has(&DataKey::Decimals) {
            return Err(PriceFeedError::NotInitialized);
        }

        let round = RoundData {
            round_id,
            answer,
            started_at,
            updated_at: timestamp,
            answered_in_round: round_id,
        };
        Self::write_round(&env, &round);

        Ok(())
    }

    pub fn decimals(env: Env) -> Result<u32, PriceFeedError> {
        env.storage()
            .instance()
            .get(&DataKey::Decimals)
            .ok_or(PriceFeedError::NotInitialized)
    }

    pub fn description(env: Env) -> String {
        String::from_str(&env, "MockPriceFeed")
    }

    pub fn version(_env: Env) -> u32 {
        VERSION
    }

    /// Get the most recent round
    pub fn latest_round_data(env: Env) -> Result<RoundData, PriceFeedError> {
        let latest: u64 = env
            .storage()
            .instance()
            .get(&DataKey::LatestRound)
            .ok_or(PriceFeedError::NotInitialized)?;

        Self::get_round_data(env, latest)
    }

    /// Get a round by id
    pub fn get_round_data(env: Env, round_id: u64) -> Result<RoundData, PriceFeedError> {
        env.storage()
            .persistent()
            .get(&DataKey::Round(round_id))
            .ok_or(PriceFeedError::RoundNotFound)
    }
}
