#![no_std]
use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env, Map};

pub mod interfaces;
pub mod math;
mod storage;
pub mod types;

pub use interfaces::{LegacyPriceFeedClient, MarketRegistryClient, WrappedAssetClient};
use storage::Storage;
use types::{AssetRole, FeedKey, ResolverConfig, ResolverError, ResolverEvent};

contractmeta!(
    key = "Description",
    val = "Price resolver for wrapped lending assets backed by a legacy price feed"
);

#[contract]
pub struct PriceResolver;

#[contractimpl]
impl PriceResolver {
    /// One-time setup. Every distinguished asset is optional; leaving out
    /// `stablecoin_a` leaves the USD base key unset.
    pub fn initialize(
        env: Env,
        registry: Address,
        legacy_feed: Address,
        native_asset: Option<Address>,
        stablecoin_a: Option<Address>,
        stablecoin_b: Option<Address>,
        floating_peg_1: Option<Address>,
        floating_peg_2: Option<Address>,
    ) -> Result<(), ResolverError> {
        if Storage::has_config(&env) {
            return Err(ResolverError::AlreadyInitialized);
        }

        let base_usd_underlying = match &stablecoin_a {
            Some(asset) => Some(Self::underlying_of(&env, asset)?),
            None => None,
        };

        let config = ResolverConfig {
            registry,
            legacy_feed,
            native_asset,
            stablecoin_a,
            stablecoin_b,
            floating_peg_1,
            floating_peg_2,
            base_usd_underlying,
        };
        Storage::set_config(&env, &config, &Self::role_table(&env, &config));

        env.events().publish((ResolverEvent::Initialized,), config);

        Ok(())
    }

    /// Price of one unit of `asset` in base units, scaled by 1e18.
    /// `Ok(0)` means the asset is not listed and must not be priced.
    pub fn resolve_price(env: Env, asset: Address) -> Result<u128, ResolverError> {
        let config = Storage::get_config(&env)?;

        if !Self::is_listed(&env, &config.registry, &asset) {
            log!(&env, "asset not listed", asset);
            return Ok(0);
        }

        let role = Self::role_of(&env, &asset)?;
        log!(&env, "resolving price", asset, role);

        match role {
            AssetRole::Native => Ok(math::NATIVE_PRICE),
            AssetRole::StablecoinPeg => Self::base_usd_price(&env, &config),
            AssetRole::FloatingPeg => Self::blended_price(&env, &config),
            AssetRole::Generic => {
                let underlying = Self::underlying_of(&env, &asset)?;
                Self::quote(&env, &config, &FeedKey::Underlying(underlying))
            }
        }
    }

    /// Alias of `resolve_price` under the name lending markets call.
    pub fn get_underlying_price(env: Env, asset: Address) -> Result<u128, ResolverError> {
        Self::resolve_price(env, asset)
    }

    pub fn config(env: Env) -> Result<ResolverConfig, ResolverError> {
        Storage::get_config(&env)
    }

    pub fn base_usd_feed_key(env: Env) -> Result<Option<FeedKey>, ResolverError> {
        Ok(Storage::get_config(&env)?
            .base_usd_underlying
            .map(FeedKey::Underlying))
    }

    pub fn asset_role(env: Env, asset: Address) -> Result<AssetRole, ResolverError> {
        Self::role_of(&env, &asset)
    }

    pub fn is_price_oracle(_env: Env) -> bool {
        true
    }

    // Helper functions
    fn role_table(env: &Env, config: &ResolverConfig) -> Map<Address, AssetRole> {
        // Lowest precedence first: later assignments overwrite earlier ones.
        let assignments = [
            (&config.floating_peg_2, AssetRole::FloatingPeg),
            (&config.floating_peg_1, AssetRole::FloatingPeg),
            (&config.stablecoin_b, AssetRole::StablecoinPeg),
            (&config.stablecoin_a, AssetRole::StablecoinPeg),
            (&config.native_asset, AssetRole::Native),
        ];

        let mut roles = Map::new(env);
        for (asset, role) in assignments {
            if let Some(asset) = asset {
                roles.set(asset.clone(), role);
            }
        }
        roles
    }

    fn role_of(env: &Env, asset: &Address) -> Result<AssetRole, ResolverError> {
        Ok(Storage::get_roles(env)?
            .get(asset.clone())
            .unwrap_or(AssetRole::Generic))
    }

    // A registry that fails to answer is indistinguishable from "not listed".
    fn is_listed(env: &Env, registry: &Address, asset: &Address) -> bool {
        matches!(
            MarketRegistryClient::new(env, registry).try_is_listed(asset),
            Ok(Ok(true))
        )
    }

    fn underlying_of(env: &Env, asset: &Address) -> Result<Address, ResolverError> {
        match WrappedAssetClient::new(env, asset).try_underlying() {
            Ok(Ok(underlying)) => Ok(underlying),
            _ => Err(ResolverError::UnderlyingUnavailable),
        }
    }

    fn quote(env: &Env, config: &ResolverConfig, key: &FeedKey) -> Result<u128, ResolverError> {
        match LegacyPriceFeedClient::new(env, &config.legacy_feed).try_quote(key) {
            Ok(Ok(value)) => Ok(value),
            _ => Err(ResolverError::FeedUnavailable),
        }
    }

    fn stable_quote(
        env: &Env,
        config: &ResolverConfig,
        key: &FeedKey,
    ) -> Result<u128, ResolverError> {
        math::to_wad(
            Self::quote(env, config, key)?,
            math::STABLE_FEED_DECIMALS,
        )
    }

    fn base_usd_price(env: &Env, config: &ResolverConfig) -> Result<u128, ResolverError> {
        let underlying = config
            .base_usd_underlying
            .clone()
            .ok_or(ResolverError::BaseKeyNotSet)?;
        Self::stable_quote(env, config, &FeedKey::Underlying(underlying))
    }

    // Three independent feed reads; they are not taken from one snapshot.
    fn blended_price(env: &Env, config: &ResolverConfig) -> Result<u128, ResolverError> {
        let base = Self::base_usd_price(env, config)?;
        let quote_a = Self::stable_quote(env, config, &FeedKey::StableA)?;
        let quote_b = Self::stable_quote(env, config, &FeedKey::StableB)?;

        let ratio = math::stable_ratio(quote_a, quote_b)?;
        log!(env, "blend ratio", base, ratio);
        math::apply_bounded_ratio(base, ratio)
    }
}
