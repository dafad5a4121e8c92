//! Fixed-point price representation.
//!
//! ## Overview
//!
//! The book keys its price levels on `u64` values scaled by 10^8. The
//! public API exchanges prices as `f64` (with NaN as the "no such
//! level" sentinel), so the two conversions here form the boundary:
//! incoming prices are snapped to the nearest 8-decimal-place value
//! and used as exact map keys from then on.
//!
//! ## Why Fixed-Point Keys?
//!
//! `f64` is not usable as an ordered map key: it is not `Ord`, and
//! values produced by arithmetic may differ in the last bits from the
//! literal the caller supplied. Converting once at ingress makes key
//! equality exact for any price quoted to 8 decimal places or fewer.
//!
//! ## Examples
//!
//! ```
//! use limitbook::types::price::{f64_to_fixed, fixed_to_f64};
//!
//! let key = f64_to_fixed(95.7).unwrap();
//! assert_eq!(key, 9_570_000_000);
//! assert_eq!(fixed_to_f64(key), 95.7);
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point prices: 10^8
///
/// This provides 8 decimal places of precision.
pub const SCALE: u64 = 100_000_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a boundary `f64` price to a fixed-point key.
///
/// Returns `None` for NaN, infinite, negative, or out-of-range values.
///
/// # Example
///
/// ```
/// use limitbook::types::price::f64_to_fixed;
///
/// assert_eq!(f64_to_fixed(1.0), Some(100_000_000));
/// assert_eq!(f64_to_fixed(95.5), Some(9_550_000_000));
/// assert_eq!(f64_to_fixed(f64::NAN), None);
/// assert_eq!(f64_to_fixed(-1.0), None);
/// ```
pub fn f64_to_fixed(price: f64) -> Option<u64> {
    let decimal = Decimal::from_f64(price)?;
    decimal_to_fixed(decimal)
}

/// Convert a fixed-point key back to the boundary `f64` price.
///
/// Exact round-trip for any value that entered through
/// [`f64_to_fixed`]: the division lands on the same double the caller
/// supplied.
pub fn fixed_to_f64(value: u64) -> f64 {
    value as f64 / SCALE as f64
}

/// Convert a decimal string to a fixed-point key.
///
/// # Example
///
/// ```
/// use limitbook::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("95.70"), Some(9_570_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a `Decimal` to a fixed-point key.
///
/// Returns `None` if the value is negative or out of range. Values
/// with more than 8 decimal places are rounded to the nearest key.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    let rounded = scaled.round_dp(0);
    rounded.to_u64()
}

/// Convert a fixed-point key to a `Decimal`.
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Render a fixed-point key with all 8 decimal places.
///
/// # Example
///
/// ```
/// use limitbook::types::price::from_fixed;
///
/// assert_eq!(from_fixed(100_000_000), "1.00000000");
/// assert_eq!(from_fixed(9_550_000_000), "95.50000000");
/// ```
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_round_trip() {
        // Prices from the boundary must survive f64 -> key -> f64 intact
        for price in [95.5, 95.7, 96.0, 96.3, 96.5, 96.7, 50_000.12345678, 0.00000001] {
            let key = f64_to_fixed(price).unwrap();
            assert_eq!(fixed_to_f64(key), price, "round trip failed for {price}");
        }
    }

    #[test]
    fn test_f64_rejects_unrepresentable() {
        assert_eq!(f64_to_fixed(f64::NAN), None);
        assert_eq!(f64_to_fixed(f64::INFINITY), None);
        assert_eq!(f64_to_fixed(f64::NEG_INFINITY), None);
        assert_eq!(f64_to_fixed(-0.01), None);
        assert_eq!(f64_to_fixed(1e30), None);
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(to_fixed("95.7"), Some(9_570_000_000));
        assert_eq!(to_fixed("0"), Some(0));
        assert_eq!(to_fixed("not a price"), None);
        assert_eq!(to_fixed("-3"), None);
        assert_eq!(from_fixed(9_570_000_000), "95.70000000");
    }

    #[test]
    fn test_equal_keys_for_equal_literals() {
        // The same literal always maps to the same key, so map lookups
        // with the price used at add time always hit.
        assert_eq!(f64_to_fixed(95.7), to_fixed("95.7"));
        assert_eq!(f64_to_fixed(96.0), to_fixed("96"));
    }

    #[test]
    fn test_rounding_beyond_scale() {
        // More than 8 decimal places snaps to the nearest key
        assert_eq!(to_fixed("1.000000004"), Some(100_000_000));
        assert_eq!(to_fixed("1.000000006"), Some(100_000_001));
    }
}
