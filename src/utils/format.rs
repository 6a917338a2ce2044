use chrono::DateTime;

/// Characters of a hash shown in list rows.
pub const DISPLAY_HASH_LEN: usize = 10;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Leading zeros stripped, then the first ten characters.
pub fn display_hash(hash: &str) -> String {
    short_hash(hash.trim_start_matches('0'))
}

/// First ten characters, zeros kept.
pub fn short_hash(hash: &str) -> String {
    hash.chars().take(DISPLAY_HASH_LEN).collect()
}

/// Bytes as decimal kilobytes with three places.
pub fn format_size(bytes: u64) -> String {
    format!("{:.3}", bytes as f64 / 1000.0)
}

/// Unix seconds as a 19 character UTC timestamp.
pub fn format_timestamp(unix_secs: i64) -> String {
    match DateTime::from_timestamp(unix_secs, 0) {
        Some(time) => time.format(TIMESTAMP_FORMAT).to_string(),
        None => unix_secs.to_string(),
    }
}

pub fn format_difficulty(difficulty: f64) -> String {
    format!("{difficulty:.6}")
}

#[cfg(test)]
mod tests {
    use super::{display_hash, format_difficulty, format_size, format_timestamp, short_hash};

    #[test]
    fn display_hash_strips_leading_zeros_before_truncating() {
        let hash = format!("00001234abcd{}", "e".repeat(52));
        assert_eq!(hash.len(), 64);
        assert_eq!(display_hash(&hash), "1234abcdee");
    }

    #[test]
    fn display_hash_of_short_or_zero_input_does_not_panic() {
        assert_eq!(display_hash("000abc"), "abc");
        assert_eq!(display_hash("0000"), "");
    }

    #[test]
    fn short_hash_keeps_zeros() {
        assert_eq!(
            short_hash("000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"),
            "0000000000"
        );
    }

    #[test]
    fn size_is_decimal_kilobytes() {
        assert_eq!(format_size(285), "0.285");
        assert_eq!(format_size(1_000_000), "1000.000");
        assert_eq!(format_size(1234), "1.234");
    }

    #[test]
    fn timestamp_is_utc_and_19_chars() {
        let formatted = format_timestamp(1_231_006_505);
        assert_eq!(formatted, "2009-01-03 18:15:05");
        assert_eq!(formatted.len(), 19);
    }

    #[test]
    fn difficulty_is_fixed_point() {
        assert_eq!(format_difficulty(1.0), "1.000000");
        assert_eq!(format_difficulty(1_590_896_927_258.0), "1590896927258.000000");
    }
}
