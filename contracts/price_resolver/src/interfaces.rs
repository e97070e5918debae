use soroban_sdk::{contractclient, Address, Env};

use crate::types::FeedKey;

/// Lending market registry deciding which wrapped assets may be priced.
#[contractclient(name = "MarketRegistryClient")]
pub trait MarketRegistry {
    fn is_listed(env: Env, asset: Address) -> bool;
}

/// Pre-existing price source. Returns `0` when it has no data for `key`.
#[contractclient(name = "LegacyPriceFeedClient")]
pub trait LegacyPriceFeed {
    fn quote(env: Env, key: FeedKey) -> u128;
}

/// Implemented by every wrapped asset token.
#[contractclient(name = "WrappedAssetClient")]
pub trait WrappedAsset {
    fn underlying(env: Env) -> Address;
}
