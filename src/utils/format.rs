use chrono::{DateTime, Utc};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Compact dollar amount: `$1.2M`, `$450K`, `$900`
pub fn format_currency(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("${:.0}K", amount / 1_000.0)
    } else {
        format!("${:.0}", amount)
    }
}

/// Whole dollar amount with thousands separators: `$1,234,567`
pub fn format_currency_full(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a 0.0-1.0 score as a whole percentage
pub fn format_score_percent(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

pub fn format_list(items: &[String]) -> String {
    items.join(", ")
}

/// Truncate on a char boundary, appending `...` when shortened
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_bands() {
        assert_eq!(format_currency(8_365_000.0), "$8.4M");
        assert_eq!(format_currency(1_000_000.0), "$1.0M");
        assert_eq!(format_currency(999_999.0), "$1000K");
        assert_eq!(format_currency(140_900.0), "$141K");
        assert_eq!(format_currency(1_000.0), "$1K");
        assert_eq!(format_currency(950.0), "$950");
        assert_eq!(format_currency(0.0), "$0");
    }

    #[test]
    fn test_format_currency_full() {
        assert_eq!(format_currency_full(8_365_000.0), "$8,365,000");
        assert_eq!(format_currency_full(950.0), "$950");
        assert_eq!(format_currency_full(-1_500.0), "-$1,500");
    }

    #[test]
    fn test_format_score_percent() {
        assert_eq!(format_score_percent(0.74), "74%");
        assert_eq!(format_percent(66.8333, 1), "66.8%");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a longer sentence", 10), "a longe...");
    }
}
