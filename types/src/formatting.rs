//! Centralized display formatting for tribe log values.
//!
//! Everything that renders an in-game timestamp or a drop/accept count for
//! humans goes through here so worker output and log lines agree.

/// Format an in-game timestamp the way the tribe log overlay renders it.
///
/// The day is zero-padded to five digits, matching the overlay's fixed-width
/// day field.
///
/// # Examples
/// ```
/// use tribelog_types::formatting::format_game_time;
/// assert_eq!(format_game_time(102, 14, 23, 5), "Day 00102, 14:23:05");
/// assert_eq!(format_game_time(0, 0, 0, 0), "Day 00000, 00:00:00");
/// ```
pub fn format_game_time(day: u32, hour: u8, minute: u8, second: u8) -> String {
    format!("Day {:05}, {:02}:{:02}:{:02}", day, hour, minute, second)
}

/// Format a count with thousands separators.
///
/// # Examples
/// ```
/// use tribelog_types::formatting::format_count;
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(500), "500");
/// assert_eq!(format_count(1_500), "1,500");
/// assert_eq!(format_count(1_500_000), "1,500,000");
/// ```
pub fn format_count(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format a percentage from count/total with one decimal place.
///
/// Returns `"0%"` if total is zero.
///
/// # Examples
/// ```
/// use tribelog_types::formatting::format_pct_ratio;
/// assert_eq!(format_pct_ratio(3, 10), "30.0%");
/// assert_eq!(format_pct_ratio(0, 0), "0%");
/// ```
pub fn format_pct_ratio(count: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", count as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_game_time_wide_day() {
        assert_eq!(format_game_time(99_999, 23, 59, 59), "Day 99999, 23:59:59");
    }

    #[test]
    fn test_format_count_boundaries() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(12_345), "12,345");
        assert_eq!(format_count(123_456), "123,456");
    }

    #[test]
    fn test_format_pct_ratio() {
        assert_eq!(format_pct_ratio(1, 3), "33.3%");
        assert_eq!(format_pct_ratio(5, 5), "100.0%");
    }
}
