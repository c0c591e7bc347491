use crate::api::RawDuration;

/// Coerce a raw API duration into whole seconds.
///
/// Anything that is not a finite, non-negative number becomes 0 so a bad
/// record still renders.
pub fn coerce_duration(raw: &RawDuration) -> u64 {
    let seconds = match raw {
        RawDuration::Number(n) => *n,
        RawDuration::Text(s) => parse_numeric_text(s),
        RawDuration::Missing | RawDuration::Other(_) => 0.0,
    };

    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }

    // `as` saturates at u64::MAX
    seconds.round() as u64
}

/// Numeric coercion of a string: blank is 0, `0x`/`0o`/`0b` prefixes are
/// unsigned integers in that radix, anything else is a decimal float
fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };

    match radix {
        Some(radix) => {
            let digits = &trimmed[2..];
            if digits.starts_with('+') {
                return 0.0;
            }
            u64::from_str_radix(digits, radix).map_or(0.0, |n| n as f64)
        }
        None => trimmed.parse::<f64>().unwrap_or(0.0),
    }
}

/// Format seconds as `HH:MM:SS`; hours grow past two digits instead of wrapping
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    format!("{hours:02}:{minutes:02}:{secs:02}")
}
