//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting for the pivot preview table.
//! CONTEXT: Preview cells show full values with thousands separators and at
//! most two decimals. Chart axes use the abbreviated form in chart-engine.

/// Format a number for display: grouped thousands, up to two decimals with
/// trailing zeros trimmed. Non-finite values format as "".
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    if value.fract() == 0.0 {
        return add_thousands_separator(&format!("{:.0}", value));
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    add_thousands_separator(trimmed)
}

/// Add thousands separators to a numeric string.
pub fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    // "-0" after rounding is shown as "0"
    if negative && digits.chars().any(|c| c != '0') {
        result = format!("-{}", result);
    } else if negative {
        if let Some(decimal) = decimal_part {
            if decimal.chars().any(|c| c != '0') {
                result = format!("-{}", result);
            }
        }
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}
