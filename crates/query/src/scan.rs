// ABOUTME: Text-to-number coercion for extracted node text.
// ABOUTME: Comma-grouped integers, "k"-suffixed unit floats, and a one-placeholder scan format.

use crate::error::{QueryError, Result};

/// Parses `text` as a base-10 integer after removing thousands separators.
///
/// Only `,` is stripped; everything else follows `i64::from_str`, so empty
/// input, stray whitespace, and overflow are rejected and a leading `+` or
/// `-` is accepted.
pub fn parse_int(text: &str) -> Result<i64> {
    let digits = text.replace(',', "");
    digits
        .parse::<i64>()
        .map_err(|e| QueryError::parse_int(text, e))
}

/// Parses `text` as a float, treating a trailing `k`/`K` as a factor of 1000.
///
/// Finite text whose value, before or after scaling, overflows to infinity
/// is a parse failure. Literal `inf`/`infinity` is still accepted.
pub fn parse_united_float(text: &str) -> Result<f64> {
    if text.is_empty() {
        return Err(QueryError::EmptyText);
    }
    let (number, unit) = match text.strip_suffix(['k', 'K']) {
        Some(rest) => (rest, 1000.0),
        None => (text, 1.0),
    };
    let v = number
        .parse::<f64>()
        .map_err(|e| QueryError::parse_float(text, e))?;
    let scaled = v * unit;
    if scaled.is_infinite() && !is_infinity_literal(number) {
        return Err(QueryError::FloatOverflow(text.to_string()));
    }
    Ok(scaled)
}

fn is_infinity_literal(number: &str) -> bool {
    let unsigned = number.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// A format with exactly one integer placeholder, split into its literal parts.
///
/// `%d` and `%v` are placeholders and `%%` is a literal `%`. When the format
/// holds both placeholders, the first `%d` is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFormat {
    prefix: String,
    suffix: String,
}

impl ScanFormat {
    /// Splits `format` around its placeholder.
    pub fn parse(format: &str) -> Result<Self> {
        let pos = find_placeholder(format, b'd')
            .or_else(|| find_placeholder(format, b'v'))
            .ok_or(QueryError::InvalidScanFormat)?;
        Ok(Self {
            prefix: format[..pos].replace("%%", "%"),
            suffix: format[pos + 2..].replace("%%", "%"),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Extracts the integer between prefix and suffix.
    ///
    /// Text that does not have the prefix and suffix, or is too short to hold
    /// both without overlap, is an `InvalidScanFormat` error.
    pub fn scan(&self, text: &str) -> Result<i64> {
        if text.len() < self.prefix.len() + self.suffix.len() {
            return Err(QueryError::InvalidScanFormat);
        }
        let middle = text
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_suffix(self.suffix.as_str()))
            .ok_or(QueryError::InvalidScanFormat)?;
        parse_int(middle)
    }
}

/// Byte offset of the first `%<verb>` in `format`, skipping `%%` escapes.
fn find_placeholder(format: &str, verb: u8) -> Option<usize> {
    let bytes = format.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'%' {
            if bytes[i + 1] == verb {
                return Some(i);
            }
            if bytes[i + 1] == b'%' {
                i += 2;
                continue;
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_int(text: &str, format: &str) -> Result<i64> {
        ScanFormat::parse(format)?.scan(text)
    }

    #[test]
    fn test_parse_int_strips_commas() {
        assert_eq!(parse_int("1,234"), Ok(1234));
        assert_eq!(parse_int("1,234,567"), Ok(1_234_567));
        assert_eq!(parse_int("-1,000"), Ok(-1000));
        assert_eq!(parse_int("+42"), Ok(42));
        assert_eq!(parse_int(",,7"), Ok(7));
    }

    #[test]
    fn test_parse_int_rejects_malformed() {
        for text in ["abc", "", ",", " 12", "12 ", "1.5", "--1", "99999999999999999999"] {
            let err = parse_int(text).unwrap_err();
            assert!(err.is_parse_failure(), "{:?} should fail to parse", text);
        }
    }

    #[test]
    fn test_united_float() {
        assert_eq!(parse_united_float("12.5k"), Ok(12500.0));
        assert_eq!(parse_united_float("3K"), Ok(3000.0));
        assert_eq!(parse_united_float("12.5"), Ok(12.5));
        assert_eq!(parse_united_float("-0.5k"), Ok(-500.0));
    }

    #[test]
    fn test_united_float_errors() {
        assert_eq!(parse_united_float(""), Err(QueryError::EmptyText));
        assert!(parse_united_float("k").unwrap_err().is_parse_failure());
        assert!(parse_united_float("12.5m").unwrap_err().is_parse_failure());
        assert!(parse_united_float("1,200").unwrap_err().is_parse_failure());
    }

    #[test]
    fn test_united_float_overflow() {
        assert_eq!(
            parse_united_float("1e400"),
            Err(QueryError::FloatOverflow("1e400".to_string()))
        );
        assert_eq!(
            parse_united_float("1e306k"),
            Err(QueryError::FloatOverflow("1e306k".to_string()))
        );
        assert!(parse_united_float("-1e400").unwrap_err().is_parse_failure());
        assert!(parse_united_float("1e305k").unwrap().is_finite());
    }

    #[test]
    fn test_united_float_infinity_literal() {
        assert_eq!(parse_united_float("inf"), Ok(f64::INFINITY));
        assert_eq!(parse_united_float("-Infinity"), Ok(f64::NEG_INFINITY));
        assert_eq!(parse_united_float("infk"), Ok(f64::INFINITY));
    }

    #[test]
    fn test_scan_format_split() {
        let f = ScanFormat::parse("Views: %d views").unwrap();
        assert_eq!(f.prefix(), "Views: ");
        assert_eq!(f.suffix(), " views");

        let f = ScanFormat::parse("%v%% done").unwrap();
        assert_eq!(f.prefix(), "");
        assert_eq!(f.suffix(), "% done");
    }

    #[test]
    fn test_scan_format_prefers_d() {
        let f = ScanFormat::parse("%v of %d").unwrap();
        assert_eq!(f.prefix(), "%v of ");
        assert_eq!(f.suffix(), "");
    }

    #[test]
    fn test_scan_format_skips_escaped_percent() {
        let f = ScanFormat::parse("100%%d: %d").unwrap();
        assert_eq!(f.prefix(), "100%d: ");
        assert_eq!(f.suffix(), "");

        assert_eq!(
            ScanFormat::parse("%%d only"),
            Err(QueryError::InvalidScanFormat)
        );
    }

    #[test]
    fn test_scan_format_without_placeholder() {
        assert_eq!(
            ScanFormat::parse("no placeholder"),
            Err(QueryError::InvalidScanFormat)
        );
        assert_eq!(ScanFormat::parse("%"), Err(QueryError::InvalidScanFormat));
        assert_eq!(ScanFormat::parse(""), Err(QueryError::InvalidScanFormat));
    }

    #[test]
    fn test_scan_int() {
        assert_eq!(scan_int("Views: 1,234 views", "Views: %d views"), Ok(1234));
        assert_eq!(scan_int("42%", "%d%%"), Ok(42));
        assert_eq!(
            scan_int("Nope", "Views: %d views"),
            Err(QueryError::InvalidScanFormat)
        );
        assert_eq!(
            scan_int("Views: 12", "no placeholder"),
            Err(QueryError::InvalidScanFormat)
        );
    }

    #[test]
    fn test_scan_int_overlapping_prefix_suffix() {
        // "ab" starts with "ab" and ends with "b", but both cannot fit.
        assert_eq!(scan_int("ab", "ab%db"), Err(QueryError::InvalidScanFormat));
    }

    #[test]
    fn test_scan_int_bad_middle() {
        let err = scan_int("Views: many views", "Views: %d views").unwrap_err();
        assert!(err.is_parse_failure());
        assert_eq!(scan_int("Views: many views", "Views: %d views").unwrap_or_default(), 0);
    }
}
