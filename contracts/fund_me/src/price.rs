use crate::errors::FundMeError;
use crate::token;
use price_feed_interface::PriceFeedClient;
use soroban_sdk::{Address, Env};

/// USD amounts are fixed-point with this many decimals.
pub const USD_DECIMALS: u32 = 18;

/// Smallest accepted contribution, $50.
pub const MINIMUM_USD: i128 = 50 * 10i128.pow(USD_DECIMALS);

fn rescale(value: i128, from_decimals: u32, to_decimals: u32) -> Result<i128, FundMeError> {
    if from_decimals <= to_decimals {
        10i128
            .checked_pow(to_decimals - from_decimals)
            .and_then(|factor| value.checked_mul(factor))
            .ok_or(FundMeError::ArithmeticOverflow)
    } else {
        10i128
            .checked_pow(from_decimals - to_decimals)
            .map(|factor| value / factor)
            .ok_or(FundMeError::ArithmeticOverflow)
    }
}

/// `value * factor / divisor` without forming the full product, so large
/// amounts of wide-decimal tokens stay in range.
fn mul_div(value: i128, factor: i128, divisor: i128) -> Result<i128, FundMeError> {
    let whole = (value / divisor).checked_mul(factor);
    let part = (value % divisor)
        .checked_mul(factor)
        .map(|product| product / divisor);

    whole
        .zip(part)
        .and_then(|(whole, part)| whole.checked_add(part))
        .ok_or(FundMeError::ArithmeticOverflow)
}

/// Latest positive oracle answer together with the feed's decimals.
fn latest_answer(env: &Env, price_feed: &Address) -> Result<(i128, u32), FundMeError> {
    let feed = PriceFeedClient::new(env, price_feed);
    match feed.try_latest_round_data() {
        Ok(Ok(round)) if round.answer > 0 => Ok((round.answer, feed.decimals())),
        _ => Err(FundMeError::InvalidPrice),
    }
}

/// USD value of `amount` base units of `native_token`, with
/// [`USD_DECIMALS`] decimals.
pub fn get_conversion_rate(
    env: &Env,
    price_feed: &Address,
    native_token: &Address,
    amount: i128,
) -> Result<i128, FundMeError> {
    let (answer, feed_decimals) = latest_answer(env, price_feed)?;
    let unit = 10i128
        .checked_pow(token::decimals(env, native_token))
        .ok_or(FundMeError::ArithmeticOverflow)?;

    // Convert at the feed's precision, widen afterwards
    let value = mul_div(amount, answer, unit)?;
    rescale(value, feed_decimals, USD_DECIMALS)
}
