//! Display formatting for amounts and rates.
//!
//! Values are stored at full precision everywhere else; rounding happens
//! only here.

/// Currencies shown without minor units.
pub const WHOLE_UNIT_CURRENCIES: [&str; 3] = ["VND", "JPY", "KRW"];

/// Amounts at or above this are shown with fewer decimals.
const LARGE_AMOUNT: f64 = 10_000.0;

fn is_whole_unit(code: &str) -> bool {
    WHOLE_UNIT_CURRENCIES.contains(&code)
}

/// Formats `value` with `decimals` fraction digits and `,` thousands
/// separators.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if value.is_sign_negative() && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// Converted amount in the live list.
pub fn format_amount(code: &str, amount: f64) -> String {
    let decimals = if is_whole_unit(code) {
        0
    } else if amount < LARGE_AMOUNT {
        2
    } else {
        1
    };
    group_thousands(amount, decimals)
}

pub fn format_rate(rate: f64) -> String {
    group_thousands(rate, 4)
}

/// Held amount of a pinned entry. Large round numbers drop the decimals.
pub fn format_pinned_base(amount: f64) -> String {
    let decimals = if amount >= LARGE_AMOUNT && amount.fract() == 0.0 {
        0
    } else {
        2
    };
    group_thousands(amount, decimals)
}

/// Converted amount of a pinned entry.
pub fn format_pinned_target(code: &str, amount: f64) -> String {
    let decimals = if is_whole_unit(code) || amount >= LARGE_AMOUNT {
        0
    } else {
        2
    };
    group_thousands(amount, decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0, 2), "0.00");
        assert_eq!(group_thousands(999.6, 0), "1,000");
        assert_eq!(group_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(group_thousands(123456.0, 0), "123,456");
        assert_eq!(group_thousands(-1234.5, 1), "-1,234.5");
        assert_eq!(group_thousands(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("USD", 31.0), "31.00");
        assert_eq!(format_amount("USD", 9999.99), "9,999.99");
        assert_eq!(format_amount("EUR", 12345.67), "12,345.7");
        assert_eq!(format_amount("JPY", 4500.4), "4,500");
        assert_eq!(format_amount("VND", 812345.6), "812,346");
        assert_eq!(format_amount("KRW", 12.0), "12");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.031), "0.0310");
        assert_eq!(format_rate(812.34567), "812.3457");
        assert_eq!(format_rate(1234.5), "1,234.5000");
    }

    #[test]
    fn test_format_pinned() {
        assert_eq!(format_pinned_base(1000.0), "1,000.00");
        assert_eq!(format_pinned_base(20000.0), "20,000");
        assert_eq!(format_pinned_base(20000.5), "20,000.50");
        assert_eq!(format_pinned_target("USD", 31.0), "31.00");
        assert_eq!(format_pinned_target("USD", 10000.4), "10,000");
        assert_eq!(format_pinned_target("JPY", 4500.6), "4,501");
    }
}
