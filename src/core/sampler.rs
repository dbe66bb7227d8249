//! Proportional sampling helpers and style-number parsing.

/// Clamp into `[0, 1]`; NaN and negative zero map to `+0`.
pub fn clamp01(n: f64) -> f64 {
    if n.is_nan() || n <= 0.0 {
        return 0.0;
    }
    n.min(1.0)
}

/// Normalized progress along a travel distance.
pub fn progress(travelled: f64, distance: f64) -> f64 {
    clamp01(travelled / distance)
}

/// Parse the leading decimal number of a style value, the way browsers read
/// `"560px"` or `" 0.6 "`.  Returns `None` when no number prefix exists.
pub fn parse_css_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
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
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        } else if digits > 0 {
            // "5." is still 5.
            end += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    // Optional exponent, only when followed by at least one digit.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
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

/// Resolve a style-derived number, substituting `fallback` for missing,
/// non-numeric, non-finite or zero values.
pub fn style_number_or(raw: Option<&str>, fallback: f64) -> f64 {
    match raw.and_then(parse_css_number) {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => fallback,
    }
}

/// First entry of a `transition-duration` list, in seconds.
///
/// `"300ms, 1s"` → 0.3, `"0.25s"` → 0.25; anything unparsable is 0.
pub fn transition_seconds(raw: &str) -> f64 {
    let first = raw.split(',').next().unwrap_or("").trim();
    let value = parse_css_number(first).unwrap_or(0.0);
    if first.ends_with("ms") {
        value / 1000.0
    } else {
        value
    }
}
