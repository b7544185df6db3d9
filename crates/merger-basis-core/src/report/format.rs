use rust_decimal::{Decimal, RoundingStrategy};

/// `$1,234.56`; negatives keep the sign after the dollar sign (`$-12.00`).
pub fn currency(value: Decimal) -> String {
    currency_dp(value, 2)
}

pub fn currency_dp(value: Decimal, dp: u32) -> String {
    format!("${}", grouped(value, dp))
}

/// Fixed decimal places without grouping, e.g. share counts.
pub fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    format!("{:.*}", dp as usize, rounded)
}

/// Fixed decimal places with `,` thousands separators.
pub fn grouped(value: Decimal, dp: u32) -> String {
    let text = fixed(value, dp);
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    out.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(currency(dec!(999.999)), "$1,000.00");
        assert_eq!(currency(dec!(0)), "$0.00");
    }

    #[test]
    fn test_currency_negative() {
        assert_eq!(currency(dec!(-53.141986)), "$-53.14");
        assert_eq!(currency(dec!(-1234.5)), "$-1,234.50");
    }

    #[test]
    fn test_currency_six_places() {
        assert_eq!(currency_dp(dec!(68.2575), 6), "$68.257500");
    }

    #[test]
    fn test_fixed_pads_and_rounds() {
        assert_eq!(fixed(dec!(10), 3), "10.000");
        assert_eq!(fixed(dec!(1.31292), 3), "1.313");
        assert_eq!(fixed(dec!(0.131292), 6), "0.131292");
    }

    #[test]
    fn test_midpoints_round_half_even() {
        assert_eq!(currency(dec!(682.575)), "$682.58");
        assert_eq!(currency(dec!(682.565)), "$682.56");
        assert_eq!(fixed(dec!(0.0125), 3), "0.012");
    }
}
