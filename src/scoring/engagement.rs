use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scoring::ScoreResult;
use crate::{ensure_non_negative, ensure_percent, ensure_subset, safe_divide};

const HIGH_BOUNCE_RATE: f64 = 70.0;
const TARGET_PAGES_PER_SESSION: f64 = 5.0;
const TARGET_SESSION_SECONDS: f64 = 180.0;
const TARGET_RETURNING_RATE: f64 = 40.0;

/// Site analytics for one reporting period. Rates are percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementInput {
    pub sessions: u64,
    pub engaged_sessions: u64,
    pub bounce_rate: f64,
    pub avg_session_seconds: f64,
    pub pages_per_session: f64,
    pub returning_visitor_rate: f64,
}

pub fn score_engagement(input: &EngagementInput) -> Result<ScoreResult> {
    ensure_subset("engaged_sessions", input.engaged_sessions, input.sessions)?;
    ensure_percent("bounce_rate", input.bounce_rate)?;
    ensure_percent("returning_visitor_rate", input.returning_visitor_rate)?;
    ensure_non_negative("avg_session_seconds", input.avg_session_seconds)?;
    ensure_non_negative("pages_per_session", input.pages_per_session)?;

    let engagement = safe_divide(
        input.engaged_sessions as f64,
        input.sessions as f64,
        0.0,
    ) * 100.0;
    let retention = 100.0 - input.bounce_rate;
    let depth = (input.pages_per_session / TARGET_PAGES_PER_SESSION * 100.0).min(100.0);
    let duration = (input.avg_session_seconds / TARGET_SESSION_SECONDS * 100.0).min(100.0);
    let loyalty = (input.returning_visitor_rate / TARGET_RETURNING_RATE * 100.0).min(100.0);

    let overall =
        0.3 * engagement + 0.25 * retention + 0.15 * depth + 0.15 * duration + 0.15 * loyalty;

    let mut result = ScoreResult::new(overall);
    result.set_subscore("engagement", engagement);
    result.set_subscore("retention", retention);
    result.set_subscore("depth", depth);
    result.set_subscore("duration", duration);
    result.set_subscore("loyalty", loyalty);

    if result.overall >= 70 {
        result.insight("Visitors engage well: sessions are deep and a healthy share return.");
    }
    if input.bounce_rate > HIGH_BOUNCE_RATE {
        result.insight(format!(
            "High bounce rate ({:.1}%): most visitors leave after one page.",
            input.bounce_rate
        ));
        result.recommend("Match landing pages to ad and search intent, and surface the offer above the fold.");
    }
    if depth < 50.0 {
        result.recommend("Add related-product and next-step links to pull visitors deeper.");
    }
    if duration < 50.0 {
        result.recommend("Lead with video or interactive content to extend time on site.");
    }
    if loyalty < 50.0 {
        result.recommend("Start a newsletter or loyalty program to bring visitors back.");
    }
    if input.sessions == 0 {
        result.insight("No sessions were recorded for the period.");
    }

    Ok(result)
}
