//! Number formatting used by axis labels and annotations.

/// Fixed-point formatting (`.1f`, `toFixed(2)` style).
#[must_use]
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "NaN".to_owned();
    }
    format!("{value:.decimals$}")
}

/// Integer formatting (`d`): rounds to the nearest whole number.
#[must_use]
pub fn format_integer(value: f64) -> String {
    if !value.is_finite() {
        return "NaN".to_owned();
    }
    format!("{}", value.round() as i64)
}

/// Fixed-point formatting with thousands separators.
#[must_use]
pub fn format_with_commas(value: f64, decimals: usize) -> String {
    let plain = format_fixed(value.abs(), decimals);
    if !value.is_finite() {
        return plain;
    }

    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (plain.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (index, digit) in int_part.chars().enumerate() {
        if index > 0 && (int_part.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && plain.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Default tick label: just enough decimals to tell adjacent ticks apart.
#[must_use]
pub fn format_default_tick(value: f64, step: f64) -> String {
    let step = step.abs();
    let decimals = if step.is_finite() && step > 0.0 {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    format_with_commas(value, decimals)
}
