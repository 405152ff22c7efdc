//! Memory size parsing for PBS resource attributes.

/// Kibibytes in one gibibyte.
pub const KB_PER_GB: u64 = 1024 * 1024;

/// PBS word size.
const BYTES_PER_WORD: u64 = 8;

/// Parse a PBS size value to kibibytes.
///
/// PBS writes sizes as an integer with an optional unit suffix:
/// "16777216kb", "64gb", "512mb", "1tb", "2048b". A bare number is bytes.
/// Word units ("w", "kw", "mw", "gw", "tw") count 8-byte words. Units are
/// case insensitive.
///
/// Returns None for empty strings or values that don't parse.
pub fn parse_size_kb(s: &str) -> Option<u64> {
    let s = s.trim().to_ascii_lowercase();
    if s.is_empty() {
        return None;
    }

    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    let value: u64 = digits.parse().ok()?;

    match unit {
        "" | "b" => Some(value / 1024),
        "kb" | "k" => Some(value),
        "mb" | "m" => value.checked_mul(1024),
        "gb" | "g" => value.checked_mul(KB_PER_GB),
        "tb" | "t" => value.checked_mul(KB_PER_GB * 1024),
        "w" => value.checked_mul(BYTES_PER_WORD).map(|b| b / 1024),
        "kw" => value.checked_mul(BYTES_PER_WORD),
        "mw" => value.checked_mul(BYTES_PER_WORD * 1024),
        "gw" => value.checked_mul(BYTES_PER_WORD * KB_PER_GB),
        "tw" => value.checked_mul(BYTES_PER_WORD * KB_PER_GB * 1024),
        _ => None,
    }
}

/// Whole gibibytes in a kibibyte count, rounded down.
pub fn kb_to_gb(kb: u64) -> u64 {
    kb / KB_PER_GB
}
