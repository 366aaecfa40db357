//! Number formatting for reports and the headline strip.

use crate::types::CostMode;

/// Group the integer part with thousands separators, e.g. `12,345.5`.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// KPI values: integers without decimals, otherwise up to two.
pub fn format_kpi(value: f64) -> String {
    if value.fract() == 0.0 {
        format_thousands(value, 0)
    } else {
        format_thousands(value, 2)
    }
}

/// Euro amount with the precision used by `mode`.
pub fn format_eur(value: f64, mode: CostMode) -> String {
    format!("€{}", format_thousands(value, mode.decimals()))
}
