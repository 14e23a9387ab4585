use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::simulation::rates::{CampaignStrategy, Channel, SimulationTables};
use crate::{ensure_non_negative, ensure_range, round_half_up, safe_divide};

const CREATIVE_BASE: f64 = 0.7;
const CREATIVE_SPAN: f64 = 0.6;
const TARGETING_BASE: f64 = 0.8;
const TARGETING_SPAN: f64 = 0.4;
const PSYCHOLOGY_BASE: f64 = 0.6;
const PSYCHOLOGY_SPAN: f64 = 0.8;

const CONFIDENCE_CREATIVE_WEIGHT: f64 = 0.3;
const CONFIDENCE_TARGETING_WEIGHT: f64 = 0.3;
const CONFIDENCE_PSYCHOLOGY_WEIGHT: f64 = 0.4;

/// Fallback CPA, as a multiple of CPC, when no conversion is expected.
const CPA_FALLBACK_CPC_MULTIPLE: f64 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub budget: f64,
    pub channel: Channel,
    pub strategy: CampaignStrategy,
    /// Slider, 0-10.
    pub creative_quality: f64,
    /// Slider, 0-10.
    pub targeting_precision: f64,
    /// Slider, 0-100.
    pub psychology_match: f64,
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            budget: 1_000_000.0,
            channel: Channel::Meta,
            strategy: CampaignStrategy::Conversion,
            creative_quality: 7.0,
            targeting_precision: 8.0,
            psychology_match: 75.0,
        }
    }
}

impl SimulationInput {
    fn validate(&self) -> Result<()> {
        ensure_non_negative("budget", self.budget)?;
        ensure_range("creative_quality", self.creative_quality, 0.0, 10.0)?;
        ensure_range("targeting_precision", self.targeting_precision, 0.0, 10.0)?;
        ensure_range("psychology_match", self.psychology_match, 0.0, 100.0)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedMultipliers {
    pub strategy_ctr: f64,
    pub strategy_cvr: f64,
    pub creative: f64,
    pub targeting: f64,
    pub psychology: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub channel: Channel,
    pub strategy: CampaignStrategy,
    pub budget: f64,
    /// Percent.
    pub expected_ctr: f64,
    /// Percent.
    pub expected_cvr: f64,
    pub expected_clicks: u64,
    pub expected_impressions: u64,
    pub expected_conversions: u64,
    pub expected_revenue: f64,
    pub expected_roas: f64,
    pub expected_cpa: f64,
    pub confidence: u8,
    pub multipliers: AppliedMultipliers,
}

pub fn simulate_performance(
    input: &SimulationInput,
    tables: &SimulationTables,
) -> Result<SimulationResult> {
    input.validate()?;

    let base = tables.channels.get(input.channel);
    let strategy = tables.strategies.get(input.strategy);

    let creative = CREATIVE_BASE + input.creative_quality / 10.0 * CREATIVE_SPAN;
    let targeting = TARGETING_BASE + input.targeting_precision / 10.0 * TARGETING_SPAN;
    let psychology = PSYCHOLOGY_BASE + input.psychology_match / 100.0 * PSYCHOLOGY_SPAN;

    let expected_ctr = base.ctr * strategy.ctr * creative * targeting;
    let expected_cvr = base.cvr * strategy.cvr * creative * psychology;

    let paid_clicks = safe_divide(input.budget, base.cpc, 0.0);
    let clicks = round_half_up(paid_clicks * expected_ctr / 100.0).max(0.0);
    let impressions = round_half_up(safe_divide(clicks, expected_ctr / 100.0, 0.0)).max(0.0);
    let conversions = round_half_up(clicks * expected_cvr / 100.0).max(0.0);

    let expected_revenue = conversions * base.avg_order_value;
    let expected_roas = safe_divide(expected_revenue, input.budget, 0.0);
    let cpa_fallback = base.cpc * CPA_FALLBACK_CPC_MULTIPLE;
    let expected_cpa = safe_divide(input.budget, conversions, cpa_fallback);

    let confidence = round_half_up(
        input.creative_quality * 10.0 * CONFIDENCE_CREATIVE_WEIGHT
            + input.targeting_precision * 10.0 * CONFIDENCE_TARGETING_WEIGHT
            + input.psychology_match * CONFIDENCE_PSYCHOLOGY_WEIGHT,
    )
    .clamp(0.0, 100.0) as u8;

    Ok(SimulationResult {
        channel: input.channel,
        strategy: input.strategy,
        budget: input.budget,
        expected_ctr,
        expected_cvr,
        expected_clicks: clicks as u64,
        expected_impressions: impressions as u64,
        expected_conversions: conversions as u64,
        expected_revenue,
        expected_roas,
        expected_cpa,
        confidence,
        multipliers: AppliedMultipliers {
            strategy_ctr: strategy.ctr,
            strategy_cvr: strategy.cvr,
            creative,
            targeting,
            psychology,
        },
    })
}

/// Runs the simulation for every channel with otherwise identical inputs,
/// best ROAS first. Channels with equal ROAS keep their table order.
pub fn compare_channels(
    input: &SimulationInput,
    tables: &SimulationTables,
) -> Result<Vec<SimulationResult>> {
    let mut results = Channel::ALL
        .iter()
        .map(|channel| {
            let mut candidate = input.clone();
            candidate.channel = *channel;
            simulate_performance(&candidate, tables)
        })
        .collect::<Result<Vec<_>>>()?;

    results.sort_by(|a, b| b.expected_roas.total_cmp(&a.expected_roas));
    Ok(results)
}
