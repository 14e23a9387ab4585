use serde::{Deserialize, Serialize};

use crate::diagnosis::{AreaReport, AreaWeights};
use crate::stable_hash64;
use crate::strategy::{sort_strategies, Priority, Strategy};

/// Area score every strategy aims for.
pub const TARGET_AREA_SCORE: u8 = 85;

const MAX_ACTION_ITEMS: usize = 5;

/// Upper bounds (exclusive) of the score bands mapped to each priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityCutoffs {
    pub critical_below: u8,
    pub high_below: u8,
    pub medium_below: u8,
}

impl Default for PriorityCutoffs {
    fn default() -> Self {
        Self {
            critical_below: 40,
            high_below: 60,
            medium_below: 75,
        }
    }
}

impl PriorityCutoffs {
    pub fn priority_for(&self, score: u8) -> Priority {
        if score < self.critical_below {
            Priority::Critical
        } else if score < self.high_below {
            Priority::High
        } else if score < self.medium_below {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

/// Builds one strategy per area that is below target or still has open
/// recommendations, then orders them by priority and revenue impact.
pub fn generate_strategies(
    areas: &[AreaReport],
    monthly_revenue: Option<f64>,
    cutoffs: &PriorityCutoffs,
    weights: &AreaWeights,
) -> Vec<Strategy> {
    let mut strategies = Vec::new();

    for report in areas {
        let gap = TARGET_AREA_SCORE.saturating_sub(report.health);
        if gap == 0 && report.result.recommendations.is_empty() {
            continue;
        }

        let title = report.area.strategy_title().to_string();
        let expected_impact = if gap > 0 {
            format!("+{} pts {} score", gap, report.area.label())
        } else {
            format!("Hold {} score at {}+", report.area.label(), TARGET_AREA_SCORE)
        };
        let expected_revenue_impact = monthly_revenue
            .filter(|revenue| revenue.is_finite() && *revenue > 0.0)
            .map(|revenue| revenue * gap as f64 / 100.0 * weights.get(report.area));

        let mut action_items: Vec<String> = report
            .result
            .recommendations
            .iter()
            .take(MAX_ACTION_ITEMS)
            .cloned()
            .collect();
        if action_items.is_empty() {
            action_items.push(format!(
                "Review {} metrics monthly and investigate any drop.",
                report.area.label()
            ));
        }

        strategies.push(Strategy {
            id: strategy_id(report.area.key(), &title),
            area: report.area.key().to_string(),
            title,
            priority: cutoffs.priority_for(report.health),
            expected_impact,
            expected_revenue_impact,
            action_items,
        });
    }

    sort_strategies(&mut strategies);
    strategies
}

fn strategy_id(area: &str, title: &str) -> String {
    let hash = stable_hash64(&format!("{}:{}", area, title));
    format!("{}_{:012x}", area, hash & 0xffff_ffff_ffff)
}
