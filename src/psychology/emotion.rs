use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{clamp_score, safe_divide};
use crate::scoring::{ScoreResult, Sentiment};

const POSITIVE_THRESHOLD: f64 = 60.0;
const NEGATIVE_THRESHOLD: f64 = 40.0;
const NEUTRAL_POSITIVITY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Trust,
    Anticipation,
    Surprise,
    Sadness,
    Anger,
    Fear,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Joy,
        Emotion::Trust,
        Emotion::Anticipation,
        Emotion::Surprise,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
    ];

    pub fn is_positive(self) -> bool {
        matches!(
            self,
            Emotion::Joy | Emotion::Trust | Emotion::Anticipation | Emotion::Surprise
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Trust => "trust",
            Emotion::Anticipation => "anticipation",
            Emotion::Surprise => "surprise",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
        }
    }

    fn lexicon(self) -> &'static [&'static str] {
        match self {
            Emotion::Joy => &["happy", "love", "great", "delight", "좋아", "행복", "최고", "기쁘"],
            Emotion::Trust => &["trust", "reliable", "safe", "genuine", "믿", "신뢰", "안심", "정품"],
            Emotion::Anticipation => &["expect", "can't wait", "soon", "excited", "기대", "설레"],
            Emotion::Surprise => &["wow", "amazing", "unexpected", "대박", "놀라", "신기"],
            Emotion::Sadness => &["sad", "disappoint", "아쉽", "실망", "슬프"],
            Emotion::Anger => &["angry", "terrible", "worst", "furious", "화나", "최악", "짜증"],
            Emotion::Fear => &["worried", "afraid", "risk", "scared", "걱정", "불안", "무서"],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    pub counts: BTreeMap<Emotion, u32>,
    pub dominant: Option<Emotion>,
    /// Share of positive-emotion hits, 0-100; 50 when nothing matched.
    pub positivity: u8,
    pub sentiment: Sentiment,
}

impl EmotionAnalysis {
    pub fn to_score_result(&self) -> ScoreResult {
        let mut result = ScoreResult::new(self.positivity as f64);
        let total: u32 = self.counts.values().sum();
        for (emotion, count) in &self.counts {
            let share = safe_divide(*count as f64, total as f64, 0.0) * 100.0;
            result.set_subscore(emotion.label(), share);
        }
        match self.sentiment {
            Sentiment::Positive => result.insight("Brand messaging reads as positive."),
            Sentiment::Negative => {
                result.insight("Brand messaging leans on negative emotions.");
                result.recommend("Reframe pain points around the outcome customers gain.");
            }
            Sentiment::Neutral => {
                result.insight("Brand messaging is emotionally flat.");
                result.recommend("Add concrete emotional hooks: delight, trust signals, anticipation.");
            }
        }
        if let Some(dominant) = self.dominant {
            if !dominant.is_positive() {
                result.recommend(format!(
                    "Dominant emotion is {}; pair it with reassurance or a clear resolution.",
                    dominant.label()
                ));
            }
        }
        result
    }
}

pub fn analyze_emotions(text: &str) -> EmotionAnalysis {
    let lowercase = text.to_lowercase();
    let mut counts = BTreeMap::new();
    let mut positive = 0u32;
    let mut negative = 0u32;
    let mut dominant: Option<(Emotion, u32)> = None;

    for emotion in Emotion::ALL {
        let count: u32 = emotion
            .lexicon()
            .iter()
            .map(|keyword| lowercase.matches(keyword).count() as u32)
            .sum();
        counts.insert(emotion, count);

        if emotion.is_positive() {
            positive += count;
        } else {
            negative += count;
        }

        if count > 0 && dominant.map_or(true, |(_, best)| count > best) {
            dominant = Some((emotion, count));
        }
    }

    let positivity = safe_divide(positive as f64, (positive + negative) as f64, NEUTRAL_POSITIVITY) * 100.0;
    let sentiment = if positivity >= POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if positivity <= NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    EmotionAnalysis {
        counts,
        dominant: dominant.map(|(emotion, _)| emotion),
        positivity: clamp_score(positivity),
        sentiment,
    }
}
