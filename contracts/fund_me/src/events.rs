use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub price_feed: Address,
    pub native_token: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundedEvent {
    #[topic]
    pub funder: Address,
    pub amount: i128,
    pub usd_value: i128,
}

/// Emitted once the owner has been paid and the ledger reset.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    #[topic]
    pub owner: Address,
    pub amount: i128,
    pub funders_cleared: u32,
}
