//! Human-readable byte-size formatting.
//!
//! This module converts raw byte counts into display strings like `"1.5 GiB"`
//! or `"2.0 MB"` using one of three unit styles. Scaling is done with exact
//! integer arithmetic so that the rounding-carry step (promoting a mantissa
//! that rounds to 1000 into the next unit) can never misfire the way a binary
//! floating-point division can.

use anyhow::Result;
use clap::ValueEnum;

/// Suffixes for the Windows style: base 1024 with legacy decimal-looking labels.
const WINDOWS_SUFFIXES: [&str; 9] = [
    "bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB",
];

/// Suffixes for the binary (IEC) style: base 1024.
const BINARY_SUFFIXES: [&str; 9] = [
    "bytes", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB",
];

/// Suffixes for the metric (SI) style: base 1000.
const METRIC_SUFFIXES: [&str; 9] = [
    "bytes", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB",
];

/// Upper bound on fractional digits; keeps the scaled mantissa inside `u128`.
const MAX_DECIMAL_PLACES: i32 = 30;

/// Enumeration of supported size-unit styles.
///
/// The Windows and Binary styles both scale by 1024 but differ in labelling
/// (`KB` vs `KiB`); the Metric style scales and labels consistently in base
/// 1000.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum UnitStyle {
    /// Base 1024 with `KB`/`MB`/... labels (Explorer-style)
    Windows,

    /// Base 1024 with IEC `KiB`/`MiB`/... labels
    #[default]
    Binary,

    /// Base 1000 with SI `kB`/`MB`/... labels
    Metric,
}

impl UnitStyle {
    /// The numeric base a value is scaled by in this style.
    #[must_use]
    pub const fn base(self) -> u64 {
        match self {
            Self::Windows | Self::Binary => 1024,
            Self::Metric => 1000,
        }
    }

    /// The nine unit labels for this style, indexed by magnitude 0..=8.
    #[must_use]
    pub const fn suffixes(self) -> &'static [&'static str; 9] {
        match self {
            Self::Windows => &WINDOWS_SUFFIXES,
            Self::Binary => &BINARY_SUFFIXES,
            Self::Metric => &METRIC_SUFFIXES,
        }
    }
}

/// Format a byte count as a human-readable string in the given unit style.
///
/// The value is scaled down by the style's base until the quotient drops below
/// the base, rounded to `decimal_places` fractional digits, and suffixed with
/// the label for the resulting magnitude. When rounding pushes the mantissa to
/// 1000 or above (e.g. `999.96` at one decimal place), the value is promoted
/// to the next unit so the output reads `"1.0 GiB"` rather than `"1000.0 MiB"`.
///
/// A zero value always formats as `"0.0 bytes"` (with `decimal_places` zeros),
/// independent of style.
///
/// # Errors
///
/// Returns an error if `decimal_places` is negative, or exceeds the supported
/// maximum of 30 fractional digits.
///
/// # Examples
///
/// ```
/// # use dirstat::format::{UnitStyle, format_size};
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// assert_eq!(format_size(1024, UnitStyle::Binary, 1)?, "1.0 KiB");
/// assert_eq!(format_size(1000, UnitStyle::Metric, 1)?, "1.0 kB");
/// assert_eq!(format_size(999, UnitStyle::Metric, 0)?, "999 bytes");
/// # Ok(())
/// # }
/// ```
pub fn format_size(value: u64, style: UnitStyle, decimal_places: i32) -> Result<String> {
    if decimal_places < 0 {
        return Err(anyhow::anyhow!(
            "decimal places must be non-negative, got {decimal_places}"
        ));
    }
    if decimal_places > MAX_DECIMAL_PLACES {
        return Err(anyhow::anyhow!(
            "too many decimal places: {decimal_places} (maximum {MAX_DECIMAL_PLACES})"
        ));
    }

    let places = decimal_places.unsigned_abs();

    if value == 0 {
        return Ok(format!("{} bytes", render_mantissa(0, places)));
    }

    let base = style.base();
    let mut mag = magnitude(value, base);
    let mut mantissa = scale_rounded(value, base, mag, places);

    // Rounding can carry the mantissa up to the base of the next unit.
    if mantissa >= 1000 * 10u128.pow(places) {
        mag += 1;
        mantissa = scale_rounded(value, base, mag, places);
    }

    Ok(format!(
        "{} {}",
        render_mantissa(mantissa, places),
        style.suffixes()[mag]
    ))
}

/// Number of times `base` divides `value` before the quotient drops below `base`.
///
/// For a `u64` input this is at most 6 in either base, well inside the 0..=8
/// label range even after a rounding carry.
fn magnitude(value: u64, base: u64) -> usize {
    let mut mag = 0;
    let mut v = value;
    while v >= base {
        v /= base;
        mag += 1;
    }
    mag
}

/// Compute `round(value / base^mag * 10^places)` exactly.
///
/// Long division digit by digit, rounding the final digit half away from zero.
/// All intermediate values fit in `u128`: the divisor is at most `1024^8` and
/// the accumulated mantissa at most `1024 * 10^places`.
fn scale_rounded(value: u64, base: u64, mag: usize, places: u32) -> u128 {
    #[allow(clippy::cast_possible_truncation)]
    let divisor = u128::from(base).pow(mag as u32);

    let mut out = u128::from(value) / divisor;
    let mut rem = u128::from(value) % divisor;

    for _ in 0..places {
        rem *= 10;
        out = out * 10 + rem / divisor;
        rem %= divisor;
    }

    if rem * 2 >= divisor {
        out += 1;
    }

    out
}

/// Render a mantissa scaled by `10^places` as a plain decimal string.
fn render_mantissa(mantissa: u128, places: u32) -> String {
    if places == 0 {
        return mantissa.to_string();
    }

    let pow = 10u128.pow(places);
    format!(
        "{}.{:0width$}",
        mantissa / pow,
        mantissa % pow,
        width = places as usize
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STYLES: [UnitStyle; 3] = [UnitStyle::Windows, UnitStyle::Binary, UnitStyle::Metric];

    #[test]
    fn test_zero_is_style_independent() {
        for style in ALL_STYLES {
            assert_eq!(format_size(0, style, 0).unwrap(), "0 bytes");
            assert_eq!(format_size(0, style, 1).unwrap(), "0.0 bytes");
            assert_eq!(format_size(0, style, 3).unwrap(), "0.000 bytes");
        }
    }

    #[test]
    fn test_negative_decimal_places_rejected() {
        for style in ALL_STYLES {
            assert!(format_size(1024, style, -1).is_err());
            assert!(format_size(0, style, -5).is_err());
            assert!(format_size(123, style, i32::MIN).is_err());
        }
    }

    #[test]
    fn test_excessive_decimal_places_rejected() {
        assert!(format_size(1024, UnitStyle::Binary, 31).is_err());
        assert!(format_size(1024, UnitStyle::Binary, 30).is_ok());
    }

    #[test]
    fn test_bytes_range() {
        assert_eq!(format_size(1, UnitStyle::Binary, 1).unwrap(), "1.0 bytes");
        assert_eq!(format_size(512, UnitStyle::Binary, 1).unwrap(), "512.0 bytes");
        assert_eq!(format_size(999, UnitStyle::Metric, 0).unwrap(), "999 bytes");
        assert_eq!(format_size(1023, UnitStyle::Windows, 0).unwrap(), "1023 bytes");
    }

    #[test]
    fn test_binary_style() {
        assert_eq!(format_size(1024, UnitStyle::Binary, 1).unwrap(), "1.0 KiB");
        assert_eq!(
            format_size(1024 * 1024, UnitStyle::Binary, 1).unwrap(),
            "1.0 MiB"
        );
        assert_eq!(
            format_size(1024 * 1024 * 1024, UnitStyle::Binary, 2).unwrap(),
            "1.00 GiB"
        );
        assert_eq!(format_size(1536, UnitStyle::Binary, 1).unwrap(), "1.5 KiB");
    }

    #[test]
    fn test_windows_style() {
        // Same scaling as Binary, legacy labels.
        assert_eq!(format_size(1024, UnitStyle::Windows, 1).unwrap(), "1.0 KB");
        assert_eq!(
            format_size(1024 * 1024, UnitStyle::Windows, 1).unwrap(),
            "1.0 MB"
        );
        assert_eq!(format_size(1536, UnitStyle::Windows, 0).unwrap(), "2 KB");
    }

    #[test]
    fn test_metric_style() {
        assert_eq!(format_size(1000, UnitStyle::Metric, 1).unwrap(), "1.0 kB");
        assert_eq!(
            format_size(1_000_000, UnitStyle::Metric, 1).unwrap(),
            "1.0 MB"
        );
        assert_eq!(
            format_size(1_500_000, UnitStyle::Metric, 2).unwrap(),
            "1.50 MB"
        );
        assert_eq!(format_size(1024, UnitStyle::Metric, 2).unwrap(), "1.02 kB");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 1075 / 1024 = 1.0498... -> 1.0; 1127 / 1024 = 1.1005... -> 1.1
        assert_eq!(format_size(1075, UnitStyle::Binary, 1).unwrap(), "1.0 KiB");
        assert_eq!(format_size(1127, UnitStyle::Binary, 1).unwrap(), "1.1 KiB");
        // 1536 / 1024 = 1.5 exactly -> rounds up at 0 places
        assert_eq!(format_size(1536, UnitStyle::Binary, 0).unwrap(), "2 KiB");
        assert_eq!(format_size(1500, UnitStyle::Metric, 0).unwrap(), "2 kB");
    }

    #[test]
    fn test_rounding_carry_base_1024() {
        // 1_023_959 bytes = 999.96 KiB, which rounds to 1000.0 KiB at one
        // decimal and must display as the next unit instead.
        let value = 1_023_959;
        assert_eq!(format_size(value, UnitStyle::Binary, 1).unwrap(), "1.0 MiB");
        assert_eq!(format_size(value, UnitStyle::Windows, 1).unwrap(), "1.0 MB");
    }

    #[test]
    fn test_rounding_carry_base_1000() {
        // 999_960 bytes = 999.96 kB -> rounds to 1000.0 kB -> carries to 1.0 MB.
        assert_eq!(
            format_size(999_960, UnitStyle::Metric, 1).unwrap(),
            "1.0 MB"
        );
        // At two decimals no carry happens and the mantissa stays put.
        assert_eq!(
            format_size(999_960, UnitStyle::Metric, 2).unwrap(),
            "999.96 kB"
        );
    }

    #[test]
    fn test_carry_at_zero_decimal_places() {
        // 999.6 kB rounds to 1000 kB at zero decimals and must carry.
        assert_eq!(format_size(999_600, UnitStyle::Metric, 0).unwrap(), "1 MB");
        // 999.4 kB rounds to 999 kB and must not.
        assert_eq!(format_size(999_400, UnitStyle::Metric, 0).unwrap(), "999 kB");
    }

    #[test]
    fn test_no_spurious_carry() {
        // 1_023_939 bytes = 999.94 KiB: just below the rounding threshold,
        // so the mantissa stays in its unit.
        let value = 1_023_939;
        assert_eq!(
            format_size(value, UnitStyle::Binary, 1).unwrap(),
            "999.9 KiB"
        );
    }

    #[test]
    fn test_large_values() {
        let one_tib = 1024u64.pow(4);
        assert_eq!(format_size(one_tib, UnitStyle::Binary, 1).unwrap(), "1.0 TiB");

        let one_pb = 1000u64.pow(5);
        assert_eq!(format_size(one_pb, UnitStyle::Metric, 1).unwrap(), "1.0 PB");

        // u64::MAX is ~18.4 EB / 16 EiB; magnitude stays inside the label table.
        assert_eq!(
            format_size(u64::MAX, UnitStyle::Binary, 1).unwrap(),
            "16.0 EiB"
        );
        assert_eq!(
            format_size(u64::MAX, UnitStyle::Metric, 1).unwrap(),
            "18.4 EB"
        );
    }

    #[test]
    fn test_exact_division_beats_floats() {
        // 10^15 + 1 bytes in metric at 14 places needs every digit exact;
        // an f64 division would have run out of mantissa bits long before.
        let formatted = format_size(1_000_000_000_000_001, UnitStyle::Metric, 14).unwrap();
        assert_eq!(formatted, "1.00000000000000 PB");
    }

    #[test]
    fn test_monotonic_within_unit() {
        // Formatting is order-preserving modulo unit change: spot-check a
        // ladder of increasing values inside one unit.
        let mut last = String::new();
        for kib in [1u64, 2, 10, 100, 500, 999] {
            let s = format_size(kib * 1024, UnitStyle::Binary, 1).unwrap();
            assert!(s.ends_with("KiB"));
            let numeric: f64 = s.trim_end_matches(" KiB").parse().unwrap();
            if let Some(prev) = last.strip_suffix(" KiB") {
                assert!(numeric >= prev.parse::<f64>().unwrap());
            }
            last = s;
        }
    }

    #[test]
    fn test_suffix_tables_have_nine_entries() {
        for style in ALL_STYLES {
            assert_eq!(style.suffixes().len(), 9);
            assert_eq!(style.suffixes()[0], "bytes");
        }
    }

    #[test]
    fn test_base_per_style() {
        assert_eq!(UnitStyle::Windows.base(), 1024);
        assert_eq!(UnitStyle::Binary.base(), 1024);
        assert_eq!(UnitStyle::Metric.base(), 1000);
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(magnitude(1, 1024), 0);
        assert_eq!(magnitude(1023, 1024), 0);
        assert_eq!(magnitude(1024, 1024), 1);
        assert_eq!(magnitude(1024 * 1024, 1024), 2);
        assert_eq!(magnitude(999, 1000), 0);
        assert_eq!(magnitude(1000, 1000), 1);
        assert_eq!(magnitude(u64::MAX, 1024), 6);
        assert_eq!(magnitude(u64::MAX, 1000), 6);
    }

    #[test]
    fn test_scale_rounded() {
        assert_eq!(scale_rounded(1536, 1024, 1, 1), 15); // 1.5
        assert_eq!(scale_rounded(1536, 1024, 1, 0), 2); // 1.5 -> 2
        assert_eq!(scale_rounded(999_960, 1000, 1, 1), 10000); // 1000.0
        assert_eq!(scale_rounded(999_960, 1000, 2, 1), 10); // 1.0
    }

    #[test]
    fn test_render_mantissa() {
        assert_eq!(render_mantissa(0, 0), "0");
        assert_eq!(render_mantissa(0, 2), "0.00");
        assert_eq!(render_mantissa(15, 1), "1.5");
        assert_eq!(render_mantissa(10000, 1), "1000.0");
        assert_eq!(render_mantissa(102, 2), "1.02");
    }
}
