use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{DiagnosticsError, Result};
use crate::scoring::{ScoreResult, Sentiment};
use crate::{clamp_score, contains_keyword, round_to, safe_divide};

const POSITIVE_KEYWORDS: [&str; 13] = [
    "good", "great", "excellent", "love", "recommend", "recommended", "fast", "만족", "좋아요", "추천", "빠른",
    "최고", "예뻐요",
];
const NEGATIVE_KEYWORDS: [&str; 13] = [
    "bad", "poor", "broken", "refund", "slow", "late", "defect", "불만", "별로", "환불", "느린",
    "최악", "불량",
];
const TOP_COMPLAINTS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub rating: u8,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAnalysis {
    pub review_count: usize,
    pub positive_ratio: f64,
    pub negative_ratio: f64,
    pub neutral_ratio: f64,
    pub average_rating: f64,
    pub sentiment_score: u8,
    pub sentiment: Sentiment,
    pub top_complaints: Vec<(String, u32)>,
}

impl ReviewAnalysis {
    pub fn to_score_result(&self) -> ScoreResult {
        let mut result = ScoreResult::new(self.sentiment_score as f64);
        result.set_subscore("positive_ratio", self.positive_ratio);
        result.set_subscore("rating", (self.average_rating - 1.0) / 4.0 * 100.0);

        if self.negative_ratio >= 30.0 {
            result.insight(format!(
                "{:.0}% of reviews are negative.",
                self.negative_ratio
            ));
        }
        if self.average_rating >= 4.5 {
            result.insight("Reviewers rate the product highly; feature reviews in ads and product pages.");
        }
        if let Some((keyword, count)) = self.top_complaints.first() {
            result.insight(format!(
                "Most frequent complaint keyword: \"{}\" ({} mentions).",
                keyword, count
            ));
            result.recommend(format!(
                "Fix the root cause behind \"{}\" complaints and reply to those reviews.",
                keyword
            ));
        }
        if self.review_count < 20 {
            result.recommend("Collect more reviews with post-purchase requests and photo-review incentives.");
        }
        if self.average_rating < 4.0 {
            result.recommend("Follow up with unhappy buyers before they leave a review.");
        }
        result
    }
}

pub fn analyze_reviews(reviews: &[Review]) -> Result<ReviewAnalysis> {
    if reviews.is_empty() {
        return Err(DiagnosticsError::invalid("reviews", "at least one review is required"));
    }

    let mut positive = 0usize;
    let mut negative = 0usize;
    let mut rating_total = 0u64;
    let mut complaints: BTreeMap<&'static str, u32> = BTreeMap::new();

    for review in reviews {
        if !(1..=5).contains(&review.rating) {
            return Err(DiagnosticsError::invalid(
                "rating",
                format!("must be between 1 and 5 (got {})", review.rating),
            ));
        }
        rating_total += review.rating as u64;

        let text = review.text.to_lowercase();
        let positive_hits = POSITIVE_KEYWORDS
            .iter()
            .filter(|word| contains_keyword(&text, word))
            .count() as i32;
        let mut negative_hits = 0i32;
        for keyword in NEGATIVE_KEYWORDS {
            if contains_keyword(&text, keyword) {
                negative_hits += 1;
                *complaints.entry(keyword).or_insert(0) += 1;
            }
        }

        let rating_bias = match review.rating {
            4..=5 => 1,
            1..=2 => -1,
            _ => 0,
        };
        let balance = positive_hits - negative_hits + rating_bias;
        if balance > 0 {
            positive += 1;
        } else if balance < 0 {
            negative += 1;
        }
    }

    let count = reviews.len() as f64;
    let positive_ratio = safe_divide(positive as f64, count, 0.0) * 100.0;
    let negative_ratio = safe_divide(negative as f64, count, 0.0) * 100.0;
    let neutral_ratio = 100.0 - positive_ratio - negative_ratio;
    let average_rating = safe_divide(rating_total as f64, count, 0.0);
    let sentiment_score = clamp_score((average_rating - 1.0) / 4.0 * 60.0 + positive_ratio * 0.4);

    let sentiment = if positive_ratio > negative_ratio {
        Sentiment::Positive
    } else if negative_ratio > positive_ratio {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    let mut top_complaints: Vec<(String, u32)> = complaints
        .into_iter()
        .map(|(keyword, count)| (keyword.to_string(), count))
        .collect();
    // BTreeMap iteration is alphabetical, so the stable sort breaks ties alphabetically.
    top_complaints.sort_by(|a, b| b.1.cmp(&a.1));
    top_complaints.truncate(TOP_COMPLAINTS);

    Ok(ReviewAnalysis {
        review_count: reviews.len(),
        positive_ratio: round_to(positive_ratio, 1),
        negative_ratio: round_to(negative_ratio, 1),
        neutral_ratio: round_to(neutral_ratio.max(0.0), 1),
        average_rating: round_to(average_rating, 2),
        sentiment_score,
        sentiment,
        top_complaints,
    })
}
