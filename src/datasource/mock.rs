use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::sync::Mutex;

use crate::datasource::{
    ensure_days, ensure_id, AdsDailyPerformance, DataSource, PageActivity, RealtimeSnapshot,
    SourceActivity,
};
use crate::error::Result;
use crate::round_to;

pub const DEFAULT_MOCK_SEED: u64 = 42;

const PAGES: [&str; 6] = ["/", "/products", "/products/best", "/event", "/cart", "/reviews"];
const SOURCES: [&str; 5] = ["organic", "instagram", "naver", "google_ads", "direct"];

/// Generates dashboard data from a seeded RNG. Two instances built with
/// the same seed produce the same sequence of responses.
pub struct MockDataSource {
    rng: Mutex<StdRng>,
}

impl MockDataSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_SEED)
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_mock(&self) -> bool {
        true
    }

    async fn fetch_realtime(&self, property_id: &str) -> Result<RealtimeSnapshot> {
        let property_id = ensure_id("property_id", property_id)?;
        let mut rng = self.rng.lock().await;

        let active_users: u32 = rng.gen_range(50..=500);
        let page_views_per_minute = (active_users as f64 * rng.gen_range(0.3..1.2)).round() as u32;

        let mut remaining = active_users;
        let mut top_pages = Vec::with_capacity(PAGES.len());
        for (index, path) in PAGES.iter().enumerate() {
            let users = if index + 1 == PAGES.len() {
                remaining
            } else {
                let share = rng.gen_range(0.1..0.4);
                ((remaining as f64) * share).round() as u32
            };
            remaining = remaining.saturating_sub(users);
            top_pages.push(PageActivity {
                path: path.to_string(),
                active_users: users,
            });
        }
        top_pages.sort_by(|a, b| b.active_users.cmp(&a.active_users));

        let mut traffic_sources: Vec<SourceActivity> = SOURCES
            .iter()
            .map(|source| SourceActivity {
                source: source.to_string(),
                active_users: rng.gen_range(0..=active_users / 2),
            })
            .collect();
        traffic_sources.sort_by(|a, b| b.active_users.cmp(&a.active_users));

        Ok(RealtimeSnapshot {
            property_id,
            captured_at: Utc::now(),
            active_users,
            page_views_per_minute,
            top_pages,
            traffic_sources,
        })
    }

    async fn fetch_ads_performance(
        &self,
        account_id: &str,
        days: u32,
    ) -> Result<Vec<AdsDailyPerformance>> {
        ensure_id("account_id", account_id)?;
        let days = ensure_days(days)?;
        let mut rng = self.rng.lock().await;
        let today = Utc::now().date_naive();

        let mut rows = Vec::with_capacity(days as usize);
        for offset in (0..days).rev() {
            let impressions: u64 = rng.gen_range(8_000..=60_000);
            let ctr = rng.gen_range(0.6..3.0) / 100.0;
            let clicks = (impressions as f64 * ctr).round() as u64;
            let cpc = rng.gen_range(400.0..1_400.0);
            let cvr = rng.gen_range(1.0..5.0) / 100.0;
            let conversions = (clicks as f64 * cvr).round() as u64;
            let order_value = rng.gen_range(30_000.0..60_000.0);

            rows.push(AdsDailyPerformance {
                date: today - Duration::days(offset as i64),
                impressions,
                clicks,
                spend: round_to(clicks as f64 * cpc, 0),
                conversions,
                revenue: round_to(conversions as f64 * order_value, 0),
            });
        }

        Ok(rows)
    }
}
