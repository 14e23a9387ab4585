pub mod calibration;
pub mod config;
pub mod datasource;
pub mod diagnosis;
pub mod error;
pub mod marketing;
pub mod psychology;
pub mod scoring;
pub mod simulation;
pub mod strategy;

pub use crate::diagnosis::{diagnose, AreaReport, BrandDiagnosticInput, DiagnosticArea, DiagnosticReport};
pub use crate::error::{DiagnosticsError, Result};
pub use crate::scoring::ScoreResult;
pub use crate::simulation::{
    compare_channels, simulate_performance, CampaignStrategy, Channel, SimulationInput,
    SimulationResult,
};
pub use crate::strategy::{sort_strategies, Priority, Strategy};

/// Divides `numerator` by `denominator`, returning `fallback` when the
/// denominator is zero or the quotient is not finite.
pub fn safe_divide(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 || denominator.is_nan() {
        return fallback;
    }
    let value = numerator / denominator;
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Rounds to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    if value >= 0.0 {
        value.round()
    } else {
        (value + 0.5).floor()
    }
}

pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    round_half_up(value * factor) / factor
}

/// Bounds a raw score into 0..=100 and rounds it. NaN maps to 0.
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    round_half_up(value.clamp(0.0, 100.0)) as u8
}

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

pub(crate) fn bool_score(value: bool) -> f64 {
    if value {
        100.0
    } else {
        0.0
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(DiagnosticsError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(DiagnosticsError::invalid(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    Ok(value)
}

pub(crate) fn ensure_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
    if !value.is_finite() || value < min || value > max {
        return Err(DiagnosticsError::invalid(
            field,
            format!("must be between {} and {} (got {})", min, max, value),
        ));
    }
    Ok(value)
}

pub(crate) fn ensure_percent(field: &'static str, value: f64) -> Result<f64> {
    ensure_range(field, value, 0.0, 100.0)
}

pub(crate) fn ensure_subset(field: &'static str, part: u64, total: u64) -> Result<()> {
    if part > total {
        return Err(DiagnosticsError::invalid(
            field,
            format!("{} exceeds the total of {}", part, total),
        ));
    }
    Ok(())
}

/// Counts occurrences of `keyword` in already-lowercased `text`. ASCII
/// keywords only match whole words; other keywords match anywhere so Korean
/// stems still catch their conjugated forms.
pub(crate) fn keyword_count(text: &str, keyword: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }
    if !keyword.is_ascii() {
        return text.matches(keyword).count();
    }
    text.match_indices(keyword)
        .filter(|(start, _)| {
            let end = start + keyword.len();
            let before = text[..*start].chars().next_back();
            let after = text[end..].chars().next();
            !before.map_or(false, char::is_alphanumeric)
                && !after.map_or(false, char::is_alphanumeric)
        })
        .count()
}

pub(crate) fn contains_keyword(text: &str, keyword: &str) -> bool {
    keyword_count(text, keyword) > 0
}

pub(crate) fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

/// Formats a value that is already expressed in percent.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
