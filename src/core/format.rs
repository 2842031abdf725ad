//! Display formatting in the `en-IN` conventions the receipts use

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Format an amount of rupees with Indian digit grouping: `₹1,50,000`
///
/// The last three digits form one group, every group above it has two.
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}

/// Long `en-IN` date, e.g. `17 October 2026`
pub fn format_long_date(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%-d %B %Y").to_string()
}

/// ISO-8601 instant with millisecond precision and a `Z` suffix
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_inr_small_amounts() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(999), "₹999");
    }

    #[test]
    fn test_inr_grouping() {
        assert_eq!(format_inr(1000), "₹1,000");
        assert_eq!(format_inr(15000), "₹15,000");
        assert_eq!(format_inr(150000), "₹1,50,000");
        assert_eq!(format_inr(12345678), "₹1,23,45,678");
        assert_eq!(format_inr(123456789), "₹12,34,56,789");
    }

    #[test]
    fn test_long_date_uses_local_offset() {
        let ist = FixedOffset::east_opt(330 * 60).unwrap();
        // 20:00 UTC is already the next day in India
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 20, 0, 0).unwrap();
        assert_eq!(format_long_date(at, ist), "17 October 2026");
    }

    #[test]
    fn test_timestamp_has_millis_and_z() {
        let at = Utc.timestamp_millis_opt(1_760_000_000_123).unwrap();
        assert_eq!(format_timestamp(at), "2025-10-09T08:53:20.123Z");
    }
}
