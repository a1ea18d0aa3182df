use soroban_sdk::{contracttype, Address};

/// Ledger entries are keyed by withdrawal epoch; a withdrawal starts a new
/// epoch instead of deleting the previous one entry by entry.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,                // -> Address
    PriceFeed,            // -> Address
    NativeToken,          // -> Address
    Epoch,                // -> u32
    FunderCount,          // -> u32, funders in the current epoch
    Funded(u32, Address), // (epoch, funder) -> i128
    Funder(u32, u32),     // (epoch, index) -> Address, first-contribution order
}
