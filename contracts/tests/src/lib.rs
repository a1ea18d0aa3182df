#![cfg(test)]
extern crate std;

use soroban_sdk::{testutils::Address as _, token::StellarAssetClient, Address, Env, Vec};

use fund_me::{FundMeContract, FundMeContractClient as FundMeClient, FundMeError};
use mock_price_feed::{MockPriceFeed, MockPriceFeedClient as FeedClient};
use price_feed_interface::PriceFeedClient;

const DECIMALS: u32 = 8;
const INITIAL_ANSWER: i128 = 2_000_0000_0000;
const ONE_UNIT: i128 = 10_000_000;

struct Protocol<'a> {
    fund_me: FundMeClient<'a>,
    feed: FeedClient<'a>,
    token: soroban_sdk::token::TokenClient<'a>,
    token_admin: StellarAssetClient<'a>,
    deployer: Address,
}

fn deploy<'a>(env: &Env) -> Protocol<'a> {
    let deployer = Address::generate(env);
    let issuer = Address::generate(env);

    // Local network: deploy the aggregator mock first
    let feed_id = env.register(MockPriceFeed, ());
    let feed = FeedClient::new(env, &feed_id);
    feed.initialize(&DECIMALS, &INITIAL_ANSWER);

    let asset = env.register_stellar_asset_contract_v2(issuer);
    let token = soroban_sdk::token::TokenClient::new(env, &asset.address());
    let token_admin = StellarAssetClient::new(env, &asset.address());

    let fund_me_id = env.register(FundMeContract, ());
    let fund_me = FundMeClient::new(env, &fund_me_id);
    fund_me.initialize(&deployer, &feed_id, &asset.address());

    Protocol {
        fund_me,
        feed,
        token,
        token_admin,
        deployer,
    }
}

#[test]
fn test_price_feed_interface_matches_mock() {
    let env = Env::default();
    env.mock_all_auths();

    let p = deploy(&env);

    // The ledger only sees the feed through the shared interface
    let feed = PriceFeedClient::new(&env, &p.feed.address);
    assert_eq!(feed.decimals(), DECIMALS);
    assert_eq!(feed.latest_round_data().answer, INITIAL_ANSWER);
    assert_eq!(p.fund_me.get_price_feed(), p.feed.address);
}

#[test]
fn test_fund_and_withdraw_e2e() {
    let env = Env::default();
    env.mock_all_auths();

    let p = deploy(&env);

    let mut accounts = Vec::new(&env);
    for _ in 0..5 {
        let account = Address::generate(&env);
        p.token_admin.mint(&account, &(10 * ONE_UNIT));
        accounts.push_back(account);
    }

    for account in accounts.iter() {
        p.fund_me.fund(&account, &ONE_UNIT);
    }
    assert_eq!(p.token.balance(&p.fund_me.address), 5 * ONE_UNIT);
    assert_eq!(p.fund_me.get_funders_count(), 5);

    // A funder cannot drain the contract
    let intruder = accounts.get(1).unwrap();
    assert_eq!(
        p.fund_me.try_withdraw(&intruder),
        Err(Ok(FundMeError::NotOwner))
    );

    let starting_deployer_balance = p.token.balance(&p.deployer);
    p.fund_me.withdraw(&p.deployer);

    assert_eq!(p.token.balance(&p.fund_me.address), 0);
    assert_eq!(
        p.token.balance(&p.deployer),
        starting_deployer_balance + 5 * ONE_UNIT
    );
    for account in accounts.iter() {
        assert_eq!(p.fund_me.get_address_to_amount_funded(&account), 0);
        assert_eq!(p.token.balance(&account), 9 * ONE_UNIT);
    }
    assert_eq!(p.fund_me.get_funders_count(), 0);

    std::println!("fund -> withdraw flow settled {} funders", accounts.len());
}

#[test]
fn test_small_fund_then_withdraw() {
    let env = Env::default();
    env.mock_all_auths();

    let p = deploy(&env);

    // 0.1 unit is $200 at the initial answer
    let funder = Address::generate(&env);
    p.token_admin.mint(&funder, &ONE_UNIT);
    p.fund_me.fund(&funder, &(ONE_UNIT / 10));

    p.fund_me.withdraw(&p.deployer);

    assert_eq!(p.token.balance(&p.fund_me.address), 0);
    assert_eq!(p.token.balance(&p.deployer), ONE_UNIT / 10);
}
