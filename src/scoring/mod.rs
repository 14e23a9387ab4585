pub mod aeo;
pub mod engagement;
pub mod retargeting;
pub mod seo;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::clamp_score;

pub use aeo::{score_aeo, AeoInput};
pub use engagement::{score_engagement, EngagementInput};
pub use retargeting::{analyze_retargeting, RetargetingInput, RetargetingReport, RetargetingSegment};
pub use seo::{score_seo, SeoInput};

/// Output of every heuristic scorer: a bounded composite, named
/// sub-scores, and the threshold-selected text lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall: u8,
    pub subscores: BTreeMap<String, u8>,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ScoreResult {
    pub fn new(overall: f64) -> Self {
        Self {
            overall: clamp_score(overall),
            ..Self::default()
        }
    }

    pub fn subscore(&self, name: &str) -> Option<u8> {
        self.subscores.get(name).copied()
    }

    pub(crate) fn set_subscore(&mut self, name: &str, value: f64) {
        self.subscores.insert(name.to_string(), clamp_score(value));
    }

    pub(crate) fn insight(&mut self, text: impl Into<String>) {
        self.insights.push(text.into());
    }

    pub(crate) fn recommend(&mut self, text: impl Into<String>) {
        self.recommendations.push(text.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}
