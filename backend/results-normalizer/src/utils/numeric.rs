use serde_json::Value;

/// Value used whenever a numeric field is missing or cannot be parsed.
pub const NUMERIC_FALLBACK: f64 = 0.0;

/// Lenient numeric read: JSON numbers pass through, strings are parsed by
/// their leading numeric prefix (`"8.5pts"` -> 8.5), everything else is `None`.
pub fn parse_number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}

/// Parse-or-default coercion shared by the scorer and the aggregator.
pub fn parse_or_zero(value: Option<&Value>) -> f64 {
    parse_number(value).unwrap_or(NUMERIC_FALLBACK)
}

/// True when the field is present with a non-null value that does not read as a number.
pub fn is_unparsable(value: Option<&Value>) -> bool {
    matches!(value, Some(v) if !v.is_null() && parse_number(Some(v)).is_none())
}

fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
