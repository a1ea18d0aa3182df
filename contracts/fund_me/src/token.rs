use crate::errors::FundMeError;
use soroban_sdk::{token::TokenClient, Address, Env};

pub fn transfer(env: &Env, token: &Address, from: &Address, to: &Address, amount: &i128) {
    TokenClient::new(env, token).transfer(from, to, amount);
}

/// Like [`transfer`], but a rejected transfer comes back as
/// `TransferFailed` instead of aborting the invocation.
pub fn try_transfer(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: &i128,
) -> Result<(), FundMeError> {
    match TokenClient::new(env, token).try_transfer(from, to, amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(FundMeError::TransferFailed),
    }
}

pub fn balance(env: &Env, token: &Address, id: &Address) -> i128 {
    TokenClient::new(env, token).balance(id)
}

pub fn decimals(env: &Env, token: &Address) -> u32 {
    TokenClient::new(env, token).decimals()
}
