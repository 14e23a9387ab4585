//! Analytics and ad-platform data feeding the dashboards.
//!
//! [`MockDataSource`] fabricates plausible numbers from a seeded RNG and is
//! never a substitute for measured data; [`HttpDataSource`] reads the
//! external reporting API.

pub mod factory;
pub mod http;
pub mod mock;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DiagnosticsError, Result};
use crate::{round_to, safe_divide};

pub use factory::build_data_source;
pub use http::HttpDataSource;
pub use mock::MockDataSource;

pub const MAX_REPORT_DAYS: u32 = 90;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageActivity {
    pub path: String,
    pub active_users: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceActivity {
    pub source: String,
    pub active_users: u32,
}

/// GA4-style realtime view of a web property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeSnapshot {
    pub property_id: String,
    pub captured_at: DateTime<Utc>,
    pub active_users: u32,
    pub page_views_per_minute: u32,
    pub top_pages: Vec<PageActivity>,
    pub traffic_sources: Vec<SourceActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdsDailyPerformance {
    pub date: NaiveDate,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub conversions: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdsPerformanceSummary {
    pub days: usize,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub conversions: u64,
    pub revenue: f64,
    /// Percent.
    pub ctr: f64,
    /// Percent.
    pub cvr: f64,
    pub roas: f64,
    pub cpa: f64,
}

impl AdsPerformanceSummary {
    pub fn from_days(days: &[AdsDailyPerformance]) -> Self {
        let impressions: u64 = days.iter().map(|day| day.impressions).sum();
        let clicks: u64 = days.iter().map(|day| day.clicks).sum();
        let conversions: u64 = days.iter().map(|day| day.conversions).sum();
        let spend: f64 = days.iter().map(|day| day.spend).sum();
        let revenue: f64 = days.iter().map(|day| day.revenue).sum();

        Self {
            days: days.len(),
            impressions,
            clicks,
            spend: round_to(spend, 2),
            conversions,
            revenue: round_to(revenue, 2),
            ctr: round_to(safe_divide(clicks as f64, impressions as f64, 0.0) * 100.0, 2),
            cvr: round_to(safe_divide(conversions as f64, clicks as f64, 0.0) * 100.0, 2),
            roas: round_to(safe_divide(revenue, spend, 0.0), 2),
            cpa: round_to(safe_divide(spend, conversions as f64, 0.0), 2),
        }
    }
}

#[async_trait]
pub trait DataSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// True when the numbers are generated rather than measured.
    fn is_mock(&self) -> bool;

    async fn fetch_realtime(&self, property_id: &str) -> Result<RealtimeSnapshot>;

    async fn fetch_ads_performance(
        &self,
        account_id: &str,
        days: u32,
    ) -> Result<Vec<AdsDailyPerformance>>;
}

pub(crate) fn ensure_days(days: u32) -> Result<u32> {
    if days == 0 || days > MAX_REPORT_DAYS {
        return Err(DiagnosticsError::invalid(
            "days",
            format!("must be between 1 and {} (got {})", MAX_REPORT_DAYS, days),
        ));
    }
    Ok(days)
}

pub(crate) fn ensure_id(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DiagnosticsError::invalid(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}
