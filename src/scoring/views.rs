//! View-count and duration parsing for scraped metadata

/// Views below this count are penalized
pub const LOW_VIEWS_THRESHOLD: u64 = 1_000;
/// Views above this count earn a bonus
pub const HIGH_VIEWS_THRESHOLD: u64 = 100_000;

/// Parse a view-count string such as `"1.2M views"`, `"15K"` or
/// `"1,234 views"`.
///
/// A trailing `k` multiplies by 1,000 and `m` by 1,000,000; anything else is
/// parsed from its digits alone. Unparsable input yields 0.
pub fn parse_view_count(text: &str) -> u64 {
    let lower = text.trim().to_lowercase();
    let Some(first) = lower.split_whitespace().next() else {
        return 0;
    };
    let number = first.replace(',', "");

    let scaled = |digits: &str, factor: f64| -> u64 {
        digits
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| (v * factor).round() as u64)
            .unwrap_or(0)
    };

    if let Some(digits) = number.strip_suffix('k') {
        return scaled(digits, 1_000.0);
    }
    if let Some(digits) = number.strip_suffix('m') {
        return scaled(digits, 1_000_000.0);
    }

    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse::<u64>().unwrap_or(0)
}

/// Parse a `m:ss` or `h:mm:ss` duration into seconds.
///
/// Returns `None` when a field is not a number or the total overflows.
pub fn parse_duration_secs(text: &str) -> Option<u64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let mut total = 0u64;
    for part in parts {
        let value: u64 = part.trim().parse().ok()?;
        total = total.checked_mul(60)?.checked_add(value)?;
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes() {
        assert_eq!(parse_view_count("1.2M views"), 1_200_000);
        assert_eq!(parse_view_count("15K views"), 15_000);
        assert_eq!(parse_view_count("2.5k"), 2_500);
    }

    #[test]
    fn test_plain_digits() {
        assert_eq!(parse_view_count("500 views"), 500);
        assert_eq!(parse_view_count("1,234,567 views"), 1_234_567);
        assert_eq!(parse_view_count("1.234"), 1_234);
    }

    #[test]
    fn test_unparsable_is_zero() {
        assert_eq!(parse_view_count(""), 0);
        assert_eq!(parse_view_count("No views"), 0);
        assert_eq!(parse_view_count("abcm"), 0);
    }

    #[test]
    fn test_duration() {
        assert_eq!(parse_duration_secs("4:05"), Some(245));
        assert_eq!(parse_duration_secs("1:02:03"), Some(3723));
        assert_eq!(parse_duration_secs("LIVE"), None);
        assert_eq!(parse_duration_secs("12"), None);
        assert_eq!(parse_duration_secs("1:2:3:4"), None);
    }

    #[test]
    fn test_duration_overflow() {
        assert_eq!(parse_duration_secs("18446744073709551615:00"), None);
        assert_eq!(parse_duration_secs("5124095576030432:00:00"), None);
        assert_eq!(parse_duration_secs("99999999999999999999:00"), None);
    }
}
