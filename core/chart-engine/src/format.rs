//! FILENAME: core/chart-engine/src/format.rs
//! Compact number labels for axes and data labels.

/// Abbreviates a number for chart labels: 1.5K, 2.5M, 1.2B.
///
/// Integers below 1000 print bare, other small values get one decimal.
/// NaN and infinities format as an empty string.
pub fn abbreviate(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let abs = value.abs();
    if abs >= 1e9 {
        format!("{}B", to_fixed_1(value / 1e9))
    } else if abs >= 1e6 {
        format!("{}M", to_fixed_1(value / 1e6))
    } else if abs >= 1e3 {
        format!("{}K", to_fixed_1(value / 1e3))
    } else if value.fract() == 0.0 {
        // -0 prints as "0"
        format!("{}", value + 0.0)
    } else {
        to_fixed_1(value)
    }
}

/// One decimal, ties rounded away from zero.
fn to_fixed_1(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{:.1}", rounded + 0.0)
}
