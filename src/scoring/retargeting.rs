use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scoring::ScoreResult;
use crate::strategy::{sort_by_priority, Prioritized, Priority};
use crate::{ensure_non_negative, ensure_percent, ensure_subset, round_to, safe_divide};

const CART_ABANDONER_CVR: f64 = 8.0;
const PRODUCT_VIEWER_CVR: f64 = 3.0;
const PAST_PURCHASER_CVR: f64 = 12.0;
const GENERAL_VISITOR_CVR: f64 = 1.0;

const ABANDONER_CRITICAL_SHARE: f64 = 10.0;
const ABANDONER_HIGH_SHARE: f64 = 5.0;
const VIEWER_HIGH_SHARE: f64 = 30.0;
const PURCHASER_HIGH_OPEN_RATE: f64 = 20.0;

const RECENCY_WINDOW_DAYS: f64 = 30.0;
const TARGET_OPEN_RATE: f64 = 40.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetargetingInput {
    pub site_visitors: u64,
    pub cart_abandoners: u64,
    pub product_viewers: u64,
    pub past_purchasers: u64,
    pub avg_days_since_visit: f64,
    /// Percent.
    pub email_open_rate: f64,
    pub avg_order_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetargetingSegment {
    pub name: String,
    pub audience_size: u64,
    pub priority: Priority,
    /// Percent.
    pub expected_conversion_rate: f64,
    pub expected_revenue: f64,
}

impl Prioritized for RetargetingSegment {
    fn priority(&self) -> Priority {
        self.priority
    }

    fn revenue_impact(&self) -> Option<f64> {
        Some(self.expected_revenue)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetargetingReport {
    pub score: ScoreResult,
    pub segments: Vec<RetargetingSegment>,
}

pub fn analyze_retargeting(input: &RetargetingInput) -> Result<RetargetingReport> {
    ensure_subset("cart_abandoners", input.cart_abandoners, input.site_visitors)?;
    ensure_subset("product_viewers", input.product_viewers, input.site_visitors)?;
    ensure_subset("past_purchasers", input.past_purchasers, input.site_visitors)?;
    ensure_non_negative("avg_days_since_visit", input.avg_days_since_visit)?;
    ensure_percent("email_open_rate", input.email_open_rate)?;
    ensure_non_negative("avg_order_value", input.avg_order_value)?;

    let visitors = input.site_visitors as f64;
    let abandoner_share = safe_divide(input.cart_abandoners as f64, visitors, 0.0) * 100.0;
    let viewer_share = safe_divide(input.product_viewers as f64, visitors, 0.0) * 100.0;
    let intent_share = safe_divide(
        input.cart_abandoners.saturating_add(input.product_viewers) as f64,
        visitors,
        0.0,
    ) * 100.0;

    let intent = (intent_share * 2.0).min(100.0);
    let recency = 100.0 - input.avg_days_since_visit * 100.0 / RECENCY_WINDOW_DAYS;
    let email = input.email_open_rate / TARGET_OPEN_RATE * 100.0;
    let overall = 0.4 * intent + 0.35 * recency.max(0.0) + 0.25 * email.min(100.0);

    let mut score = ScoreResult::new(overall);
    score.set_subscore("intent", intent);
    score.set_subscore("recency", recency);
    score.set_subscore("email", email);

    let abandoner_priority = if abandoner_share >= ABANDONER_CRITICAL_SHARE {
        Priority::Critical
    } else if abandoner_share >= ABANDONER_HIGH_SHARE {
        Priority::High
    } else {
        Priority::Medium
    };
    let viewer_priority = if viewer_share >= VIEWER_HIGH_SHARE {
        Priority::High
    } else {
        Priority::Medium
    };
    let purchaser_priority = if input.past_purchasers == 0 {
        Priority::Low
    } else if input.email_open_rate >= PURCHASER_HIGH_OPEN_RATE {
        Priority::High
    } else {
        Priority::Medium
    };
    let engaged = input
        .cart_abandoners
        .saturating_add(input.product_viewers)
        .saturating_add(input.past_purchasers);
    let remaining = input.site_visitors.saturating_sub(engaged);

    let mut segments = vec![
        segment("Cart abandoners", input.cart_abandoners, abandoner_priority, CART_ABANDONER_CVR, input.avg_order_value),
        segment("Product viewers", input.product_viewers, viewer_priority, PRODUCT_VIEWER_CVR, input.avg_order_value),
        segment("Past purchasers", input.past_purchasers, purchaser_priority, PAST_PURCHASER_CVR, input.avg_order_value),
        segment("Other visitors", remaining, Priority::Low, GENERAL_VISITOR_CVR, input.avg_order_value),
    ];
    sort_by_priority(&mut segments);

    if abandoner_share >= ABANDONER_CRITICAL_SHARE {
        score.insight(format!(
            "{:.1}% of visitors abandoned a cart; this is the fastest revenue to recover.",
            abandoner_share
        ));
        score.recommend("Run a cart-recovery sequence within 1 hour, 24 hours and 72 hours of abandonment.");
    }
    if recency < 50.0 {
        score.insight("The retargeting pool is going stale; average visitors last came by weeks ago.");
        score.recommend("Shorten retargeting windows to 7-14 days and refresh creatives weekly.");
    }
    if email < 50.0 {
        score.recommend("Improve email subject lines and segment sends to lift open rates above 20%.");
    }
    if input.past_purchasers > 0 {
        score.recommend("Target past purchasers with complementary products and replenishment reminders.");
    }
    if score.overall >= 70 {
        score.insight("Retargeting audiences are warm and reachable.");
    }

    Ok(RetargetingReport { score, segments })
}

fn segment(
    name: &str,
    audience_size: u64,
    priority: Priority,
    conversion_rate: f64,
    avg_order_value: f64,
) -> RetargetingSegment {
    let expected_revenue = audience_size as f64 * conversion_rate / 100.0 * avg_order_value;
    RetargetingSegment {
        name: name.to_string(),
        audience_size,
        priority,
        expected_conversion_rate: conversion_rate,
        expected_revenue: round_to(expected_revenue, 2),
    }
}
