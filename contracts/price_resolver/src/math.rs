//! Unsigned 18-decimal fixed-point helpers used by the resolver.
//!
//! A value of `0` is the "no price" sentinel everywhere; none of these helpers
//! ever produce `0` from a failed division.

use core::cmp::Ordering;

use crate::types::ResolverError;

/// 1.0 at 18 decimals. Represents one unit of the base asset.
pub const WAD: u128 = 1_000_000_000_000_000_000;
pub const WAD_DECIMALS: u32 = 18;

/// Precision of the reserved stablecoin keys on the legacy feed.
pub const STABLE_FEED_DECIMALS: u32 = 6;

pub const NATIVE_PRICE: u128 = WAD;

/// 0.95, lower edge of the accepted stablecoin ratio band.
pub const RATIO_FLOOR: u128 = 950_000_000_000_000_000;
/// 1.05, upper edge of the accepted stablecoin ratio band.
pub const RATIO_CEILING: u128 = 1_050_000_000_000_000_000;

/// Rescales a feed value carrying `decimals` decimals to 18 decimals.
pub fn to_wad(value: u128, decimals: u32) -> Result<u128, ResolverError> {
    let factor = 10u128
        .checked_pow(decimals.abs_diff(WAD_DECIMALS))
        .ok_or(ResolverError::ArithmeticOverflow)?;

    match decimals.cmp(&WAD_DECIMALS) {
        Ordering::Equal => Ok(value),
        Ordering::Less => value
            .checked_mul(factor)
            .ok_or(ResolverError::ArithmeticOverflow),
        Ordering::Greater => Ok(value / factor),
    }
}

/// Floor of `a * b / denominator`.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128, ResolverError> {
    if denominator == 0 {
        return Err(ResolverError::DivisionByZero);
    }
    a.checked_mul(b)
        .map(|product| product / denominator)
        .ok_or(ResolverError::ArithmeticOverflow)
}

pub fn clamp_ratio(ratio: u128) -> u128 {
    if ratio < RATIO_FLOOR {
        RATIO_FLOOR
    } else if ratio > RATIO_CEILING {
        RATIO_CEILING
    } else {
        ratio
    }
}

/// `quote_b / quote_a` at 18 decimals. Both quotes are 18-decimal values.
pub fn stable_ratio(quote_a: u128, quote_b: u128) -> Result<u128, ResolverError> {
    let ratio = mul_div(quote_b, WAD, quote_a)?;
    // A missing numerator would otherwise be clamped up to a plausible price.
    if quote_b == 0 {
        return Err(ResolverError::QuoteUnavailable);
    }
    Ok(ratio)
}

/// Scales `base` by `ratio` held inside `[RATIO_FLOOR, RATIO_CEILING]`.
pub fn apply_bounded_ratio(base: u128, ratio: u128) -> Result<u128, ResolverError> {
    mul_div(base, clamp_ratio(ratio), WAD)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::vec::Vec;

    fn bounded_blend(base: u128, quote_a: u128, quote_b: u128) -> Result<u128, ResolverError> {
        apply_bounded_ratio(base, stable_ratio(quote_a, quote_b)?)
    }

    #[test]
    fn test_to_wad_rescales_stable_quotes() {
        assert_eq!(to_wad(1_000_000, STABLE_FEED_DECIMALS), Ok(WAD));
        assert_eq!(
            to_wad(999_500, STABLE_FEED_DECIMALS),
            Ok(999_500_000_000_000_000)
        );
        assert_eq!(to_wad(0, STABLE_FEED_DECIMALS), Ok(0));
    }

    #[test]
    fn test_to_wad_other_precisions() {
        assert_eq!(to_wad(42, WAD_DECIMALS), Ok(42));
        assert_eq!(to_wad(12_345, 20), Ok(123));
        assert_eq!(to_wad(7, 0), Ok(7 * WAD));
    }

    #[test]
    fn test_to_wad_overflow() {
        assert_eq!(
            to_wad(u128::MAX, STABLE_FEED_DECIMALS),
            Err(ResolverError::ArithmeticOverflow)
        );
        assert_eq!(to_wad(1, 60), Err(ResolverError::ArithmeticOverflow));
    }

    #[test]
    fn test_mul_div() {
        assert_eq!(mul_div(3, 5, 2), Ok(7));
        assert_eq!(mul_div(0, 5, 2), Ok(0));
        assert_eq!(mul_div(1, 1, 0), Err(ResolverError::DivisionByZero));
        assert_eq!(
            mul_div(u128::MAX, 2, 1),
            Err(ResolverError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_stable_ratio() {
        assert_eq!(
            stable_ratio(WAD, 1_030_000_000_000_000_000),
            Ok(1_030_000_000_000_000_000)
        );
        assert_eq!(stable_ratio(2 * WAD, WAD), Ok(WAD / 2));
        assert_eq!(stable_ratio(0, WAD), Err(ResolverError::DivisionByZero));
        assert_eq!(stable_ratio(WAD, 0), Err(ResolverError::QuoteUnavailable));
    }

    #[test]
    fn test_blend_inside_band() {
        assert_eq!(
            bounded_blend(WAD, WAD, 1_030_000_000_000_000_000),
            Ok(1_030_000_000_000_000_000)
        );
        assert_eq!(
            bounded_blend(2 * WAD, WAD, 990_000_000_000_000_000),
            Ok(1_980_000_000_000_000_000)
        );
    }

    #[test]
    fn test_blend_clamps_outside_band() {
        assert_eq!(
            bounded_blend(WAD, WAD, 1_100_000_000_000_000_000),
            Ok(RATIO_CEILING)
        );
        assert_eq!(
            bounded_blend(WAD, WAD, 500_000_000_000_000_000),
            Ok(RATIO_FLOOR)
        );
        // Band edges themselves are not clamped but land on the same value.
        assert_eq!(bounded_blend(WAD, WAD, RATIO_FLOOR), Ok(RATIO_FLOOR));
        assert_eq!(bounded_blend(WAD, WAD, RATIO_CEILING), Ok(RATIO_CEILING));
    }

    #[test]
    fn test_blend_zero_inputs() {
        assert_eq!(bounded_blend(WAD, 0, WAD), Err(ResolverError::DivisionByZero));
        assert_eq!(bounded_blend(WAD, 0, 0), Err(ResolverError::DivisionByZero));
        assert_eq!(bounded_blend(WAD, WAD, 0), Err(ResolverError::QuoteUnavailable));
        assert_eq!(bounded_blend(0, WAD, WAD), Ok(0));
    }

    #[test]
    fn test_blend_is_monotonic_in_ratio() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..32 {
            let base: u128 = rng.gen_range(1..=100 * WAD);
            let quote_a: u128 = rng.gen_range(WAD / 2..=2 * WAD);
            let mut quotes_b: Vec<u128> = (0..64)
                .map(|_| rng.gen_range(1..=3 * WAD))
                .collect();
            quotes_b.sort_unstable();

            let low = mul_div(base, RATIO_FLOOR, WAD).unwrap();
            let high = mul_div(base, RATIO_CEILING, WAD).unwrap();

            let mut previous = 0;
            for quote_b in quotes_b {
                let price = bounded_blend(base, quote_a, quote_b).unwrap();
                assert!(price >= previous);
                assert!(price >= low && price <= high);
                previous = price;
            }
        }
    }
}
