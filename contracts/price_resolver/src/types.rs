use soroban_sdk::{contracterror, contracttype, Address};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ResolverError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    BaseKeyNotSet = 3,
    DivisionByZero = 4,
    ArithmeticOverflow = 5,
    QuoteUnavailable = 6,
    FeedUnavailable = 7,
    UnderlyingUnavailable = 8,
}

/// Lookup key understood by the legacy price feed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FeedKey {
    /// Reserved USD reference key. Owned by other feed consumers; the
    /// resolver derives its USD key from `stablecoin_a` instead.
    UsdBase,
    /// Reserved key quoting the first reference stablecoin (6 decimals).
    StableA,
    /// Reserved key quoting the second reference stablecoin (6 decimals).
    StableB,
    /// Underlying asset of a wrapped token.
    Underlying(Address),
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssetRole {
    Native = 1,
    StablecoinPeg = 2,
    FloatingPeg = 3,
    Generic = 4,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolverConfig {
    pub registry: Address,
    pub legacy_feed: Address,
    pub native_asset: Option<Address>,
    pub stablecoin_a: Option<Address>,
    pub stablecoin_b: Option<Address>,
    pub floating_peg_1: Option<Address>,
    pub floating_peg_2: Option<Address>,
    /// Underlying of `stablecoin_a`, `None` when it is unset. Quoted on the
    /// feed as `FeedKey::Underlying`.
    pub base_usd_underlying: Option<Address>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResolverEvent {
    Initialized,
}
