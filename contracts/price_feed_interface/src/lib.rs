#![no_std]

use soroban_sdk::{contractclient, contracttype, Env, String};

/// One price observation reported by an aggregator.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub round_id: u64,
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

/// Read-only aggregator interface consumed by contracts that need a
/// native-currency to USD rate.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeedInterface {
    /// Number of decimals `RoundData::answer` is expressed in.
    fn decimals(env: Env) -> u32;

    fn description(env: Env) -> String;

    fn version(env: Env) -> u32;

    /// Most recent round reported by the feed.
    fn latest_round_data(env: Env) -> RoundData;
}
