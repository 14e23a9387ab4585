use brand_diagnostics::datasource::{AdsDailyPerformance, AdsPerformanceSummary, RealtimeSnapshot};
use brand_diagnostics::strategy::{IceCandidate, IceScore};
use brand_diagnostics::{CampaignStrategy, Channel, DiagnosticsError, SimulationInput, SimulationResult};
use serde::{Deserialize, Serialize};

/// Simulator request body. Missing fields fall back to the simulator
/// defaults; channel and strategy accept any casing.
#[derive(Debug, Default, Deserialize)]
pub struct ApiSimulationRequest {
    pub budget: Option<f64>,
    pub channel: Option<String>,
    pub strategy: Option<String>,
    pub creative_quality: Option<f64>,
    pub targeting_precision: Option<f64>,
    pub psychology_match: Option<f64>,
}

impl ApiSimulationRequest {
    pub fn into_input(self) -> Result<SimulationInput, DiagnosticsError> {
        let mut input = SimulationInput::default();

        if let Some(value) = self.budget {
            input.budget = value;
        }
        if let Some(channel) = self.channel.as_deref() {
            input.channel = Channel::parse(channel)?;
        }
        if let Some(strategy) = self.strategy.as_deref() {
            input.strategy = CampaignStrategy::parse(strategy)?;
        }
        if let Some(value) = self.creative_quality {
            input.creative_quality = value;
        }
        if let Some(value) = self.targeting_precision {
            input.targeting_precision = value;
        }
        if let Some(value) = self.psychology_match {
            input.psychology_match = value;
        }

        Ok(input)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiComparisonResponse {
    pub best_channel: Option<Channel>,
    pub results: Vec<SimulationResult>,
}

impl ApiComparisonResponse {
    pub fn from_results(results: Vec<SimulationResult>) -> Self {
        Self {
            best_channel: results.first().map(|result| result.channel),
            results,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiIceRequest {
    pub candidates: Vec<IceCandidate>,
}

#[derive(Debug, Serialize)]
pub struct ApiIceResponse {
    pub ranked: Vec<IceScore>,
}

#[derive(Debug, Deserialize)]
pub struct AdsQuery {
    pub days: Option<u32>,
}

pub const DEFAULT_ADS_DAYS: u32 = 7;

#[derive(Debug, Serialize)]
pub struct ApiRealtimeResponse {
    pub source: &'static str,
    pub is_mock: bool,
    pub snapshot: RealtimeSnapshot,
}

#[derive(Debug, Serialize)]
pub struct ApiAdsResponse {
    pub source: &'static str,
    pub is_mock: bool,
    pub summary: AdsPerformanceSummary,
    pub days: Vec<AdsDailyPerformance>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}
