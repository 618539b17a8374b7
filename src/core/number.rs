//! Numeric input parsing and compact number formatting
//!
//! Players type estimates the way they would say them: `5k`, `1.4b`,
//! `100,000`. Both the guess history and the share text render numbers through
//! [`format_num`] so they always look the same.

use thiserror::Error;

/// Why a raw guess was rejected
///
/// None of these count as an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("enter a number")]
    Empty,
    #[error("not a number (try 42, 1.5k, 3m, 2b)")]
    Unparseable,
    #[error("guess must not be negative")]
    Negative,
    #[error("number is too large")]
    NotFinite,
}

const SUFFIXES: [(char, f64); 4] = [('k', 1e3), ('m', 1e6), ('b', 1e9), ('t', 1e12)];

fn parse_number(text: &str) -> Result<f64, InputError> {
    let cleaned = text.trim().to_lowercase().replace(',', "");
    if cleaned.is_empty() {
        return Err(InputError::Empty);
    }

    let (digits, multiplier) = match cleaned.chars().last() {
        Some(last) => SUFFIXES
            .iter()
            .find(|(suffix, _)| *suffix == last)
            .map_or((cleaned.as_str(), 1.0), |&(_, mult)| {
                (&cleaned[..cleaned.len() - last.len_utf8()], mult)
            }),
        None => (cleaned.as_str(), 1.0),
    };

    let value: f64 = digits
        .trim()
        .parse()
        .map_err(|_| InputError::Unparseable)?;

    // `str::parse` accepts "inf" and "nan"; a player never means those
    if value.is_nan() {
        return Err(InputError::Unparseable);
    }

    let value = value * multiplier;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NotFinite)
    }
}

/// Parse a human-friendly number
///
/// Trims, lowercases and strips thousands separators, then applies an optional
/// `k`/`m`/`b`/`t` suffix. Returns `None` for anything unparseable; callers
/// treat that as "reject, not an attempt".
///
/// # Examples
/// ```
/// use guesstimate::core::parse_input;
///
/// assert_eq!(parse_input("5k"), Some(5_000.0));
/// assert_eq!(parse_input(" 1,400,000 "), Some(1_400_000.0));
/// assert_eq!(parse_input("1.4B"), Some(1_400_000_000.0));
/// assert_eq!(parse_input("lots"), None);
/// assert_eq!(parse_input(""), None);
/// ```
#[must_use]
pub fn parse_input(text: &str) -> Option<f64> {
    parse_number(text).ok()
}

/// Parse and range-check a guess
///
/// Zero is accepted (it scores as infinitely far away); negative and
/// non-finite values are not.
///
/// # Errors
///
/// Returns the [`InputError`] describing why the text is not a usable guess.
pub fn validate_guess(text: &str) -> Result<f64, InputError> {
    let value = parse_number(text)?;
    if value < 0.0 {
        return Err(InputError::Negative);
    }
    Ok(value)
}

/// Round half away from zero to one decimal place
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn compact(value: f64, suffix: char) -> String {
    let text = format!("{:.1}", round1(value));
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}{suffix}")
}

/// Insert `,` every three digits of an unsigned integer string
fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Render a number compactly
///
/// - `>= 1e12` → `1.5T`, `>= 1e9` → `B`, `>= 1e6` → `M`, `>= 1e4` → `K`
///   (one decimal, trailing `.0` dropped)
/// - integers below `1e4` → `1,234`
/// - everything else → grouped with at most one decimal
///
/// # Examples
/// ```
/// use guesstimate::core::format_num;
///
/// assert_eq!(format_num(5_000.0), "5,000");
/// assert_eq!(format_num(50_000.0), "50K");
/// assert_eq!(format_num(1_400_000_000.0), "1.4B");
/// assert_eq!(format_num(31.7), "31.7");
/// ```
#[must_use]
pub fn format_num(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let magnitude = n.abs();
    if magnitude >= 1e12 {
        return compact(n / 1e12, 'T');
    }
    if magnitude >= 1e9 {
        return compact(n / 1e9, 'B');
    }
    if magnitude >= 1e6 {
        return compact(n / 1e6, 'M');
    }
    if magnitude >= 1e4 {
        return compact(n / 1e3, 'K');
    }

    let text = if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        let rounded = format!("{:.1}", round1(n));
        rounded
            .strip_suffix(".0")
            .map_or_else(|| rounded.clone(), str::to_string)
    };

    // A value that rounds to zero prints without a sign
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some("0") => ("", "0"),
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(w, f)| (w, Some(f)));

    let mut out = format!("{sign}{}", group_digits(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_numbers() {
        assert_eq!(parse_input("42"), Some(42.0));
        assert_eq!(parse_input("31.7"), Some(31.7));
        assert_eq!(parse_input("  0.5  "), Some(0.5));
        assert_eq!(parse_input("1e3"), Some(1_000.0));
    }

    #[test]
    fn parse_strips_separators_and_case() {
        assert_eq!(parse_input("100,000"), Some(100_000.0));
        assert_eq!(parse_input("5K"), Some(5_000.0));
        assert_eq!(parse_input("2,500k"), Some(2_500_000.0));
    }

    #[test]
    fn parse_suffixes() {
        assert_eq!(parse_input("5k"), Some(5_000.0));
        assert_eq!(parse_input("3m"), Some(3_000_000.0));
        assert_eq!(parse_input("1.4b"), Some(1_400_000_000.0));
        assert_eq!(parse_input("2t"), Some(2_000_000_000_000.0));
        assert_eq!(parse_input("1.5 k"), Some(1_500.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        for text in ["", "   ", "k", "abc", "12abc", "1.2.3", "inf", "nan", "infinity", "5x"] {
            assert_eq!(parse_input(text), None, "{text:?}");
        }
    }

    #[test]
    fn parse_keeps_negative_values() {
        assert_eq!(parse_input("-5"), Some(-5.0));
    }

    #[test]
    fn validate_reports_reason() {
        assert_eq!(validate_guess(""), Err(InputError::Empty));
        assert_eq!(validate_guess("abc"), Err(InputError::Unparseable));
        assert_eq!(validate_guess("-3k"), Err(InputError::Negative));
        assert_eq!(validate_guess("1e308t"), Err(InputError::NotFinite));
        assert_eq!(validate_guess("0"), Ok(0.0));
        assert_eq!(validate_guess("1k"), Ok(1_000.0));
    }

    #[test]
    fn format_compact_suffixes() {
        assert_eq!(format_num(10_000.0), "10K");
        assert_eq!(format_num(12_345.0), "12.3K");
        assert_eq!(format_num(1_000_000.0), "1M");
        assert_eq!(format_num(2_500_000.0), "2.5M");
        assert_eq!(format_num(1_400_000_000.0), "1.4B");
        assert_eq!(format_num(7_200_000_000_000.0), "7.2T");
        assert_eq!(format_num(1e15), "1000T");
    }

    #[test]
    fn format_small_numbers() {
        assert_eq!(format_num(0.0), "0");
        assert_eq!(format_num(7.0), "7");
        assert_eq!(format_num(1_234.0), "1,234");
        assert_eq!(format_num(9_999.0), "9,999");
        assert_eq!(format_num(31.7), "31.7");
        assert_eq!(format_num(31.75), "31.8");
        assert_eq!(format_num(31.04), "31");
        assert_eq!(format_num(1_234.56), "1,234.6");
    }

    #[test]
    fn format_negative_numbers() {
        assert_eq!(format_num(-1_234.0), "-1,234");
        assert_eq!(format_num(-50_000.0), "-50K");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_num(-0.0), "0");
        assert_eq!(format_num(-0.04), "0");
        assert_eq!(format_num(-0.06), "-0.1");
    }

    #[test]
    fn format_non_finite() {
        assert_eq!(format_num(f64::INFINITY), "∞");
        assert_eq!(format_num(f64::NAN), "NaN");
    }

    #[test]
    fn shorthand_round_trips_visually() {
        for (input, shown) in [
            // K starts at 10,000, so 5k stays grouped rather than "5K"
            ("5k", "5,000"),
            ("50k", "50K"),
            ("3m", "3M"),
            ("1.4b", "1.4B"),
            ("2t", "2T"),
            ("12.5k", "12.5K"),
        ] {
            let parsed = parse_input(input).unwrap();
            assert_eq!(
                format_num(parsed),
                shown,
                "{input}: below 1e4 prints grouped digits, not a K suffix"
            );
        }
    }

    #[test]
    fn group_digits_boundaries() {
        assert_eq!(group_digits("1"), "1");
        assert_eq!(group_digits("123"), "123");
        assert_eq!(group_digits("1234"), "1,234");
        assert_eq!(group_digits("123456"), "123,456");
    }
}
