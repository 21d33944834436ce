use std::{collections::HashSet, str::FromStr};

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

/// 數字中可忽略的字元（千分位逗號）
const NUMBER_ESCAPE_CHAR: &[char] = &[','];

/// Parses a `Decimal` value from a given string.
///
/// Leading and trailing blanks are trimmed, then thousands separators are
/// removed together with any additional `escape_chars`. A value that still
/// holds a blank or a `_` digit separator is rejected.
///
/// # Example
///
/// ```
/// let price = parse_decimal("1,234.56", None).unwrap();
/// assert_eq!(price, dec!(1234.56));
/// ```
pub fn parse_decimal(s: &str, escape_chars: Option<Vec<char>>) -> Result<Decimal> {
    let cleaned = clean_escape_chars(s.trim(), escape_chars);
    if cleaned.chars().any(|c| c.is_whitespace() || c == '_') {
        return Err(anyhow!("'{}' is not a plain number", s));
    }

    Decimal::from_str(&cleaned)
        .map_err(|why| anyhow!("Failed to parse '{}' as Decimal because {:?}", cleaned, why))
}

/// Removes the number escape characters plus `escape_chars` from `s`.
pub(crate) fn clean_escape_chars(s: &str, escape_chars: Option<Vec<char>>) -> String {
    let mut combined: Vec<char> = NUMBER_ESCAPE_CHAR.to_vec();
    if let Some(ec) = escape_chars {
        combined.extend(ec);
    }

    let filters = combined.iter().collect::<HashSet<_>>();
    s.chars().filter(|c| !filters.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    // 注意這個慣用法：在 tests 模組中，從外部範疇匯入所有名字。
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1,234.56", None).unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal(" 310.50 ", None).unwrap(), dec!(310.50));
        assert_eq!(parse_decimal("(1.25)", Some(vec!['(', ')'])).unwrap(), dec!(1.25));
        assert!(parse_decimal("abc", None).is_err());
        assert!(parse_decimal("", None).is_err());
    }

    #[test]
    fn test_parse_decimal_rejects_inner_blanks_and_underscores() {
        assert!(parse_decimal("3 10", None).is_err());
        assert!(parse_decimal("1_000", None).is_err());
        assert!(parse_decimal("12\n0", None).is_err());
        assert!(parse_decimal("1\u{a0}234.56", None).is_err());
        assert_eq!(parse_decimal("\n1,000\n", None).unwrap(), dec!(1000));
    }

    #[test]
    fn test_clean_escape_chars() {
        let result = clean_escape_chars("1,234%", Some(vec!['%']));
        assert_eq!(result, "1234");

        assert_eq!(clean_escape_chars("3 10", None), "3 10");
    }
}
