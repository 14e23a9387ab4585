pub mod generator;
pub mod ice;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub use generator::{generate_strategies, PriorityCutoffs, TARGET_AREA_SCORE};
pub use ice::{rank_by_ice, IceCandidate, IceScore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn weight(self) -> u8 {
        match self {
            Priority::Critical => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Critical => "CRITICAL",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub id: String,
    pub area: String,
    pub title: String,
    pub priority: Priority,
    pub expected_impact: String,
    pub expected_revenue_impact: Option<f64>,
    pub action_items: Vec<String>,
}

/// Anything ordered by the shared priority rule.
pub trait Prioritized {
    fn priority(&self) -> Priority;

    /// Secondary sort key; `None` sorts after every known figure.
    fn revenue_impact(&self) -> Option<f64> {
        None
    }
}

impl Prioritized for Strategy {
    fn priority(&self) -> Priority {
        self.priority
    }

    fn revenue_impact(&self) -> Option<f64> {
        self.expected_revenue_impact
    }
}

/// Stable sort: priority descending, then revenue impact descending.
/// Items that compare equal keep their insertion order.
pub fn sort_by_priority<T: Prioritized>(items: &mut [T]) {
    items.sort_by(compare_priority);
}

pub fn sort_strategies(strategies: &mut [Strategy]) {
    sort_by_priority(strategies);
}

fn compare_priority<T: Prioritized>(a: &T, b: &T) -> Ordering {
    b.priority()
        .weight()
        .cmp(&a.priority().weight())
        .then_with(|| match (a.revenue_impact(), b.revenue_impact()) {
            (Some(left), Some(right)) => right.total_cmp(&left),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}
