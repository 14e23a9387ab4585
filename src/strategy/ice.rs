use serde::{Deserialize, Serialize};

use crate::error::{DiagnosticsError, Result};
use crate::strategy::Priority;

const CRITICAL_ICE: u32 = 500;
const HIGH_ICE: u32 = 250;
const MEDIUM_ICE: u32 = 100;

/// An initiative rated 1-10 on Impact, Confidence and Ease.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceCandidate {
    pub name: String,
    pub impact: u8,
    pub confidence: u8,
    pub ease: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceScore {
    pub name: String,
    pub impact: u8,
    pub confidence: u8,
    pub ease: u8,
    pub score: u32,
    pub priority: Priority,
}

impl IceCandidate {
    pub fn score(&self) -> Result<IceScore> {
        let impact = ensure_rating("impact", self.impact)?;
        let confidence = ensure_rating("confidence", self.confidence)?;
        let ease = ensure_rating("ease", self.ease)?;

        let score = impact as u32 * confidence as u32 * ease as u32;
        Ok(IceScore {
            name: self.name.clone(),
            impact,
            confidence,
            ease,
            score,
            priority: priority_for(score),
        })
    }
}

/// Scores every candidate and orders them by ICE score, highest first.
/// Equal scores keep their input order.
pub fn rank_by_ice(candidates: &[IceCandidate]) -> Result<Vec<IceScore>> {
    let mut scored = candidates
        .iter()
        .map(IceCandidate::score)
        .collect::<Result<Vec<_>>>()?;
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(scored)
}

fn priority_for(score: u32) -> Priority {
    if score >= CRITICAL_ICE {
        Priority::Critical
    } else if score >= HIGH_ICE {
        Priority::High
    } else if score >= MEDIUM_ICE {
        Priority::Medium
    } else {
        Priority::Low
    }
}

fn ensure_rating(field: &'static str, value: u8) -> Result<u8> {
    if !(1..=10).contains(&value) {
        return Err(DiagnosticsError::invalid(
            field,
            format!("must be between 1 and 10 (got {})", value),
        ));
    }
    Ok(value)
}
