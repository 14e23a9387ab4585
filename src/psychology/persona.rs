use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{DiagnosticsError, Result};
use crate::scoring::{ScoreResult, Sentiment};
use crate::{clamp_score, contains_keyword, safe_divide};

const POSITIVE_WORDS: [&str; 10] = [
    "love", "loved", "like", "good", "nice", "좋", "예쁘", "귀여", "갖고 싶", "최고",
];
const NEGATIVE_WORDS: [&str; 8] = ["hate", "bad", "ugly", "dislike", "별로", "싫", "비싸", "실망"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnsPost {
    pub platform: String,
    pub text: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
}

impl SnsPost {
    /// Engagement-weighted contribution of one keyword hit in this post.
    fn weight(&self) -> f64 {
        let interactions = self.likes as f64 + 2.0 * self.comments as f64 + 3.0 * self.shares as f64;
        1.0 + (1.0 + interactions).log10()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    TrendSeeker,
    ValueHunter,
    QualityLoyalist,
    SocialSharer,
    Skeptic,
}

impl Persona {
    pub const ALL: [Persona; 5] = [
        Persona::TrendSeeker,
        Persona::ValueHunter,
        Persona::QualityLoyalist,
        Persona::SocialSharer,
        Persona::Skeptic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Persona::TrendSeeker => "trend_seeker",
            Persona::ValueHunter => "value_hunter",
            Persona::QualityLoyalist => "quality_loyalist",
            Persona::SocialSharer => "social_sharer",
            Persona::Skeptic => "skeptic",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Persona::TrendSeeker => &["trend", "trending", "trendy", "new", "hype", "viral", "신상", "유행", "핫", "요즘"],
            Persona::ValueHunter => &["sale", "discount", "price", "cheap", "deal", "deals", "할인", "가성비", "세일", "쿠폰"],
            Persona::QualityLoyalist => &["quality", "premium", "durable", "again", "품질", "정품", "고급", "재구매"],
            Persona::SocialSharer => &["friend", "friends", "share", "together", "tagged", "친구", "공유", "같이", "선물"],
            Persona::Skeptic => &["fake", "doubt", "scam", "really?", "광고", "의심", "진짜?", "뒷광고"],
        }
    }

    fn playbook(self) -> &'static str {
        match self {
            Persona::TrendSeeker => "Lead with launches, drops and creator collaborations.",
            Persona::ValueHunter => "Frame offers around value: bundles, price anchors and limited coupons.",
            Persona::QualityLoyalist => "Show craftsmanship, materials and repeat-purchase proof.",
            Persona::SocialSharer => "Give people something to share: referral rewards and tag-a-friend campaigns.",
            Persona::Skeptic => "Answer doubts head-on with transparent reviews, certifications and disclosure.",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaMap {
    /// Percentage share of the matched weight per persona.
    pub shares: BTreeMap<Persona, u8>,
    pub primary: Option<Persona>,
    pub sentiment: Sentiment,
    /// 0-100, 50 when no sentiment words matched.
    pub sentiment_score: u8,
    pub platform_posts: BTreeMap<String, usize>,
    pub post_count: usize,
}

impl PersonaMap {
    pub fn to_score_result(&self) -> ScoreResult {
        let mut result = ScoreResult::new(self.sentiment_score as f64);
        for (persona, share) in &self.shares {
            result.set_subscore(persona.label(), *share as f64);
        }
        match self.primary {
            Some(persona) => {
                result.insight(format!(
                    "The largest social audience segment is {}.",
                    persona.label()
                ));
                result.recommend(persona.playbook());
            }
            None => result.insight("Social posts give no clear persona signal."),
        }
        if self.shares.get(&Persona::Skeptic).copied().unwrap_or(0) >= 25 {
            result.recommend(Persona::Skeptic.playbook());
        }
        if self.sentiment == Sentiment::Negative {
            result.recommend("Respond publicly to negative threads within 24 hours.");
        }
        result
    }
}

pub fn map_sns_personas(posts: &[SnsPost]) -> Result<PersonaMap> {
    if posts.is_empty() {
        return Err(DiagnosticsError::invalid("posts", "at least one post is required"));
    }

    let mut weights: BTreeMap<Persona, f64> = Persona::ALL.iter().map(|p| (*p, 0.0)).collect();
    let mut platform_posts: BTreeMap<String, usize> = BTreeMap::new();
    let mut positive = 0usize;
    let mut negative = 0usize;

    for post in posts {
        let text = post.text.to_lowercase();
        let weight = post.weight();
        for persona in Persona::ALL {
            let hits = persona
                .keywords()
                .iter()
                .filter(|keyword| contains_keyword(&text, keyword))
                .count();
            if hits > 0 {
                if let Some(total) = weights.get_mut(&persona) {
                    *total += hits as f64 * weight;
                }
            }
        }
        positive += POSITIVE_WORDS
            .iter()
            .filter(|word| contains_keyword(&text, word))
            .count();
        negative += NEGATIVE_WORDS
            .iter()
            .filter(|word| contains_keyword(&text, word))
            .count();

        let platform = post.platform.trim().to_lowercase();
        *platform_posts.entry(platform).or_insert(0) += 1;
    }

    let total_weight: f64 = weights.values().sum();
    let shares = weights
        .iter()
        .map(|(persona, weight)| {
            (
                *persona,
                clamp_score(safe_divide(*weight, total_weight, 0.0) * 100.0),
            )
        })
        .collect();

    let mut primary: Option<(Persona, f64)> = None;
    for persona in Persona::ALL {
        let weight = weights.get(&persona).copied().unwrap_or(0.0);
        if weight > 0.0 && primary.map_or(true, |(_, best)| weight > best) {
            primary = Some((persona, weight));
        }
    }

    let sentiment_score = safe_divide(positive as f64, (positive + negative) as f64, 0.5) * 100.0;
    let sentiment = if sentiment_score > 55.0 {
        Sentiment::Positive
    } else if sentiment_score < 45.0 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    Ok(PersonaMap {
        shares,
        primary: primary.map(|(persona, _)| persona),
        sentiment,
        sentiment_score: clamp_score(sentiment_score),
        platform_posts,
        post_count: posts.len(),
    })
}
