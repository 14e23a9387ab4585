use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DiagnosticsConfig;
use crate::error::{DiagnosticsError, Result};
use crate::marketing::{analyze_reviews, Review, ReviewAnalysis};
use crate::psychology::{
    analyze_emotions, analyze_price_resistance, map_sns_personas, EmotionAnalysis, PersonaMap,
    PriceResistanceInput, PriceResistanceReport, SnsPost,
};
use crate::scoring::{
    analyze_retargeting, score_aeo, score_engagement, score_seo, AeoInput, EngagementInput,
    RetargetingInput, RetargetingSegment, ScoreResult, SeoInput,
};
use crate::strategy::{generate_strategies, Strategy};
use crate::{clamp_score, ensure_non_negative, safe_divide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticArea {
    Seo,
    Aeo,
    Engagement,
    Retargeting,
    Pricing,
    Reviews,
    Social,
    Messaging,
}

impl DiagnosticArea {
    pub fn key(self) -> &'static str {
        match self {
            DiagnosticArea::Seo => "seo",
            DiagnosticArea::Aeo => "aeo",
            DiagnosticArea::Engagement => "engagement",
            DiagnosticArea::Retargeting => "retargeting",
            DiagnosticArea::Pricing => "pricing",
            DiagnosticArea::Reviews => "reviews",
            DiagnosticArea::Social => "social",
            DiagnosticArea::Messaging => "messaging",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DiagnosticArea::Seo => "SEO",
            DiagnosticArea::Aeo => "AEO",
            DiagnosticArea::Engagement => "engagement",
            DiagnosticArea::Retargeting => "retargeting",
            DiagnosticArea::Pricing => "pricing",
            DiagnosticArea::Reviews => "review",
            DiagnosticArea::Social => "social",
            DiagnosticArea::Messaging => "messaging",
        }
    }

    pub fn strategy_title(self) -> &'static str {
        match self {
            DiagnosticArea::Seo => "Close search visibility gaps",
            DiagnosticArea::Aeo => "Get cited by AI answer engines",
            DiagnosticArea::Engagement => "Turn visits into engaged sessions",
            DiagnosticArea::Retargeting => "Recover high-intent visitors",
            DiagnosticArea::Pricing => "Reduce price resistance",
            DiagnosticArea::Reviews => "Improve review sentiment",
            DiagnosticArea::Social => "Tailor social content to core personas",
            DiagnosticArea::Messaging => "Sharpen the emotional brand message",
        }
    }
}

/// Relative weight of each area in the overall brand score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaWeights {
    pub seo: f64,
    pub aeo: f64,
    pub engagement: f64,
    pub retargeting: f64,
    pub pricing: f64,
    pub reviews: f64,
    pub social: f64,
    pub messaging: f64,
}

impl Default for AreaWeights {
    fn default() -> Self {
        Self {
            seo: 0.2,
            aeo: 0.15,
            engagement: 0.15,
            retargeting: 0.15,
            pricing: 0.1,
            reviews: 0.1,
            social: 0.1,
            messaging: 0.05,
        }
    }
}

impl AreaWeights {
    pub fn get(&self, area: DiagnosticArea) -> f64 {
        let weight = match area {
            DiagnosticArea::Seo => self.seo,
            DiagnosticArea::Aeo => self.aeo,
            DiagnosticArea::Engagement => self.engagement,
            DiagnosticArea::Retargeting => self.retargeting,
            DiagnosticArea::Pricing => self.pricing,
            DiagnosticArea::Reviews => self.reviews,
            DiagnosticArea::Social => self.social,
            DiagnosticArea::Messaging => self.messaging,
        };
        if weight.is_finite() {
            weight.max(0.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandDiagnosticInput {
    pub brand: String,
    #[serde(default)]
    pub seo: Option<SeoInput>,
    #[serde(default)]
    pub aeo: Option<AeoInput>,
    #[serde(default)]
    pub engagement: Option<EngagementInput>,
    #[serde(default)]
    pub retargeting: Option<RetargetingInput>,
    #[serde(default)]
    pub price: Option<PriceResistanceInput>,
    #[serde(default)]
    pub reviews: Option<Vec<Review>>,
    #[serde(default)]
    pub sns_posts: Option<Vec<SnsPost>>,
    /// Brand copy (slogan, landing headline, ad text) for emotion analysis.
    #[serde(default)]
    pub brand_message: Option<String>,
    #[serde(default)]
    pub monthly_revenue: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaReport {
    pub area: DiagnosticArea,
    /// 0-100, higher is healthier. Equals `result.overall` except for
    /// pricing, where the result holds resistance.
    pub health: u8,
    pub result: ScoreResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            85..=u8::MAX => Grade::Excellent,
            70..=84 => Grade::Good,
            50..=69 => Grade::Fair,
            30..=49 => Grade::Poor,
            _ => Grade::Critical,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::Good => "Good",
            Grade::Fair => "Fair",
            Grade::Poor => "Poor",
            Grade::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub brand: String,
    pub overall: u8,
    pub grade: Grade,
    pub areas: Vec<AreaReport>,
    pub strategies: Vec<Strategy>,
    pub retargeting_segments: Vec<RetargetingSegment>,
    pub price: Option<PriceResistanceReport>,
    pub reviews: Option<ReviewAnalysis>,
    pub personas: Option<PersonaMap>,
    pub emotions: Option<EmotionAnalysis>,
}

impl DiagnosticReport {
    pub fn area(&self, area: DiagnosticArea) -> Option<&AreaReport> {
        self.areas.iter().find(|report| report.area == area)
    }
}

pub fn diagnose(input: &BrandDiagnosticInput, config: &DiagnosticsConfig) -> Result<DiagnosticReport> {
    let brand = input.brand.trim();
    if brand.is_empty() {
        return Err(DiagnosticsError::invalid("brand", "brand name is required"));
    }
    if let Some(revenue) = input.monthly_revenue {
        ensure_non_negative("monthly_revenue", revenue)?;
    }

    let mut areas = Vec::new();
    let mut retargeting_segments = Vec::new();
    let mut price = None;
    let mut reviews = None;
    let mut personas = None;
    let mut emotions = None;

    if let Some(seo) = &input.seo {
        areas.push(area_report(DiagnosticArea::Seo, score_seo(seo)?));
    }
    if let Some(aeo) = &input.aeo {
        areas.push(area_report(DiagnosticArea::Aeo, score_aeo(aeo)?));
    }
    if let Some(engagement) = &input.engagement {
        areas.push(area_report(DiagnosticArea::Engagement, score_engagement(engagement)?));
    }
    if let Some(retargeting) = &input.retargeting {
        let report = analyze_retargeting(retargeting)?;
        areas.push(area_report(DiagnosticArea::Retargeting, report.score));
        retargeting_segments = report.segments;
    }
    if let Some(price_input) = &input.price {
        let report = analyze_price_resistance(price_input)?;
        areas.push(AreaReport {
            area: DiagnosticArea::Pricing,
            health: report.health(),
            result: report.score.clone(),
        });
        price = Some(report);
    }
    if let Some(review_list) = &input.reviews {
        let analysis = analyze_reviews(review_list)?;
        areas.push(area_report(DiagnosticArea::Reviews, analysis.to_score_result()));
        reviews = Some(analysis);
    }
    if let Some(posts) = &input.sns_posts {
        let map = map_sns_personas(posts)?;
        areas.push(area_report(DiagnosticArea::Social, map.to_score_result()));
        personas = Some(map);
    }
    if let Some(message) = input.brand_message.as_deref().filter(|text| !text.trim().is_empty()) {
        let analysis = analyze_emotions(message);
        areas.push(area_report(DiagnosticArea::Messaging, analysis.to_score_result()));
        emotions = Some(analysis);
    }

    if areas.is_empty() {
        return Err(DiagnosticsError::invalid(
            "input",
            "at least one diagnostic section is required",
        ));
    }

    let overall = weighted_overall(&areas, &config.diagnosis);
    let strategies = generate_strategies(
        &areas,
        input.monthly_revenue,
        &config.strategy,
        &config.diagnosis,
    );
    debug!(brand, overall, areas = areas.len(), strategies = strategies.len(), "diagnosis complete");

    Ok(DiagnosticReport {
        brand: brand.to_string(),
        overall,
        grade: Grade::from_score(overall),
        areas,
        strategies,
        retargeting_segments,
        price,
        reviews,
        personas,
        emotions,
    })
}

fn area_report(area: DiagnosticArea, result: ScoreResult) -> AreaReport {
    AreaReport {
        area,
        health: result.overall,
        result,
    }
}

/// Weight-normalized mean over the areas present; a plain mean when every
/// present area has zero weight.
fn weighted_overall(areas: &[AreaReport], weights: &AreaWeights) -> u8 {
    let total_weight: f64 = areas.iter().map(|report| weights.get(report.area)).sum();
    let weighted: f64 = areas
        .iter()
        .map(|report| weights.get(report.area) * report.health as f64)
        .sum();
    let plain_mean = safe_divide(
        areas.iter().map(|report| report.health as f64).sum(),
        areas.len() as f64,
        0.0,
    );
    clamp_score(safe_divide(weighted, total_weight, plain_mean))
}
