//! Conversion between base units and decimal token amounts

use alloy_primitives::U256;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitsError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Too many fractional digits: {digits} > {decimals}")]
    TooPrecise { digits: usize, decimals: u8 },
    #[error("Amount out of range")]
    Overflow,
}

/// Render `amount` base units as a decimal string, trimming trailing zeros
pub fn format_units(amount: U256, decimals: u8) -> String {
    let digits = amount.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return digits;
    }

    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// Parse a decimal token amount (e.g. "1.5") into base units
pub fn parse_units(text: &str, decimals: u8) -> Result<U256, UnitsError> {
    let text = text.trim();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(UnitsError::InvalidAmount(text.to_string()));
    }

    if fraction.len() > decimals as usize {
        return Err(UnitsError::TooPrecise {
            digits: fraction.len(),
            decimals,
        });
    }

    let combined = format!("{}{:0<width$}", whole, fraction, width = decimals as usize);
    let combined = combined.trim_start_matches('0');
    if combined.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(combined, 10).map_err(|_| UnitsError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(1), 18), "0.000000000000000001");
        assert_eq!(
            format_units(U256::from(1_500_000_000_000_000_000u128), 18),
            "1.5"
        );
        assert_eq!(format_units(U256::from(100), 2), "1");
        assert_eq!(format_units(U256::from(42), 0), "42");
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(
            parse_units("1.5", 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(parse_units("100", 2).unwrap(), U256::from(10_000));
        assert_eq!(parse_units(".25", 2).unwrap(), U256::from(25));
        assert_eq!(parse_units("0", 18).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_parse_units_errors() {
        assert!(matches!(
            parse_units("1.234", 2),
            Err(UnitsError::TooPrecise { digits: 3, .. })
        ));
        assert!(matches!(
            parse_units("abc", 18),
            Err(UnitsError::InvalidAmount(_))
        ));
        assert!(matches!(parse_units(".", 18), Err(UnitsError::InvalidAmount(_))));
        assert!(matches!(parse_units("-1", 18), Err(UnitsError::InvalidAmount(_))));

        let huge = "9".repeat(90);
        assert_eq!(parse_units(&huge, 0), Err(UnitsError::Overflow));
    }
}
