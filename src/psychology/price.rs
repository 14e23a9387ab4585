use serde::{Deserialize, Serialize};

use crate::error::{DiagnosticsError, Result};
use crate::scoring::ScoreResult;
use crate::{ensure_percent, ensure_range, round_half_up, round_to};

const GAP_PRESSURE_NEUTRAL: f64 = 50.0;
const GAP_PRESSURE_SLOPE: f64 = 2.5;

const SEVERE_RESISTANCE: f64 = 75.0;
const HIGH_RESISTANCE: f64 = 50.0;
const MODERATE_RESISTANCE: f64 = 25.0;
const PREMIUM_VALUE_FLOOR: f64 = 7.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceResistanceInput {
    pub price: f64,
    pub competitor_avg_price: f64,
    /// Survey score, 0-10.
    pub perceived_value: f64,
    /// Percent.
    pub cart_abandonment_rate: f64,
    /// Percent of orders placed with a discount.
    pub discount_order_share: f64,
    /// Percent of reviews or inquiries complaining about price.
    pub price_complaint_share: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResistanceLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl ResistanceLevel {
    pub fn label(self) -> &'static str {
        match self {
            ResistanceLevel::Low => "low",
            ResistanceLevel::Moderate => "moderate",
            ResistanceLevel::High => "high",
            ResistanceLevel::Severe => "severe",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceResistanceReport {
    /// Higher means stronger resistance; `score.overall` is the resistance.
    pub score: ScoreResult,
    pub level: ResistanceLevel,
    pub price_gap_percent: f64,
    pub recommended_price_min: f64,
    pub recommended_price_max: f64,
}

impl PriceResistanceReport {
    /// Inverse of resistance, comparable with other area scores.
    pub fn health(&self) -> u8 {
        100 - self.score.overall
    }
}

pub fn analyze_price_resistance(input: &PriceResistanceInput) -> Result<PriceResistanceReport> {
    ensure_positive("price", input.price)?;
    ensure_positive("competitor_avg_price", input.competitor_avg_price)?;
    ensure_range("perceived_value", input.perceived_value, 0.0, 10.0)?;
    ensure_percent("cart_abandonment_rate", input.cart_abandonment_rate)?;
    ensure_percent("discount_order_share", input.discount_order_share)?;
    ensure_percent("price_complaint_share", input.price_complaint_share)?;

    let competitor = input.competitor_avg_price;
    let gap = (input.price - competitor) / competitor * 100.0;
    let gap_pressure = (GAP_PRESSURE_NEUTRAL + gap * GAP_PRESSURE_SLOPE).clamp(0.0, 100.0);
    let value = input.perceived_value * 10.0;

    let resistance = 0.3 * gap_pressure
        + 0.2 * (100.0 - value)
        + 0.15 * input.cart_abandonment_rate
        + 0.15 * input.discount_order_share
        + 0.2 * input.price_complaint_share;

    let level = if resistance >= SEVERE_RESISTANCE {
        ResistanceLevel::Severe
    } else if resistance >= HIGH_RESISTANCE {
        ResistanceLevel::High
    } else if resistance >= MODERATE_RESISTANCE {
        ResistanceLevel::Moderate
    } else {
        ResistanceLevel::Low
    };

    let (min, max) = if resistance >= HIGH_RESISTANCE {
        (competitor * 0.9, competitor)
    } else if resistance < MODERATE_RESISTANCE && input.perceived_value >= PREMIUM_VALUE_FLOOR {
        (input.price, input.price * 1.1)
    } else {
        (competitor * 0.95, competitor * 1.05)
    };

    let mut score = ScoreResult::new(resistance);
    score.set_subscore("gap_pressure", gap_pressure);
    score.set_subscore("value_perception", value);
    score.set_subscore("abandonment", input.cart_abandonment_rate);
    score.set_subscore("discount_dependency", input.discount_order_share);
    score.set_subscore("price_complaints", input.price_complaint_share);

    if gap > 10.0 {
        score.insight(format!(
            "Priced {:.1}% above the competitor average.",
            gap
        ));
    } else if gap < -10.0 {
        score.insight(format!(
            "Priced {:.1}% below the competitor average; there may be room to raise prices.",
            -gap
        ));
    }
    match level {
        ResistanceLevel::Severe | ResistanceLevel::High => {
            score.insight(format!("Price resistance is {}.", level.label()));
            score.recommend(format!(
                "Test a price between {:.0} and {:.0}, or add bundled value at the current price.",
                min, max
            ));
        }
        ResistanceLevel::Low if input.perceived_value >= PREMIUM_VALUE_FLOOR => {
            score.insight("Customers accept the price and rate the value highly.");
            score.recommend("Test a premium tier or a modest price increase.");
        }
        _ => {}
    }
    if input.discount_order_share > 40.0 {
        score.recommend("Reduce blanket discounts; shoppers are learning to wait for sales.");
    }
    if value < 50.0 {
        score.recommend("Strengthen value communication: materials, guarantees, cost-per-use.");
    }

    Ok(PriceResistanceReport {
        score,
        level,
        price_gap_percent: round_to(gap, 2),
        recommended_price_min: round_half_up(min),
        recommended_price_max: round_half_up(max),
    })
}

fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DiagnosticsError::invalid(
            field,
            format!("must be greater than zero (got {})", value),
        ));
    }
    Ok(value)
}
