use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scoring::ScoreResult;
use crate::{ensure_subset, safe_divide};

const FAQ_CAP: u32 = 5;
const FAQ_POINTS: f64 = 8.0;
const QUESTION_HEADING_CAP: u32 = 5;
const QUESTION_HEADING_POINTS: f64 = 6.0;
const STRUCTURED_DATA_POINTS: f64 = 15.0;
const FAQ_SCHEMA_POINTS: f64 = 15.0;
const CITATION_POINTS: f64 = 12.5;

/// Answer Engine Optimization inputs: how well a page is set up to be
/// quoted by AI chat assistants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AeoInput {
    pub faq_count: u32,
    pub question_headings: u32,
    pub has_structured_data: bool,
    pub has_faq_schema: bool,
    /// Paragraphs that directly answer a question in a few sentences.
    pub answer_paragraphs: u32,
    pub total_paragraphs: u32,
    pub citation_count: u32,
    pub ai_queries_tested: u32,
    /// Tested queries whose AI answer mentioned the brand.
    pub ai_mentions: u32,
}

pub fn score_aeo(input: &AeoInput) -> Result<ScoreResult> {
    ensure_subset(
        "answer_paragraphs",
        input.answer_paragraphs as u64,
        input.total_paragraphs as u64,
    )?;
    ensure_subset(
        "ai_mentions",
        input.ai_mentions as u64,
        input.ai_queries_tested as u64,
    )?;

    let mut structure = input.faq_count.min(FAQ_CAP) as f64 * FAQ_POINTS
        + input.question_headings.min(QUESTION_HEADING_CAP) as f64 * QUESTION_HEADING_POINTS;
    if input.has_structured_data {
        structure += STRUCTURED_DATA_POINTS;
    }
    if input.has_faq_schema {
        structure += FAQ_SCHEMA_POINTS;
    }

    let answerability = safe_divide(
        input.answer_paragraphs as f64,
        input.total_paragraphs as f64,
        0.0,
    ) * 100.0;
    let authority = (input.citation_count as f64 * CITATION_POINTS).min(100.0);
    let visibility = safe_divide(
        input.ai_mentions as f64,
        input.ai_queries_tested as f64,
        0.0,
    ) * 100.0;

    let overall = 0.3 * structure + 0.25 * answerability + 0.15 * authority + 0.3 * visibility;

    let mut result = ScoreResult::new(overall);
    result.set_subscore("structure", structure);
    result.set_subscore("answerability", answerability);
    result.set_subscore("authority", authority);
    result.set_subscore("visibility", visibility);

    if input.ai_queries_tested == 0 {
        result.insight("No AI assistant queries were tested; visibility is unknown and scored as zero.");
    } else if visibility >= 50.0 {
        result.insight(format!(
            "The brand appears in {:.0}% of tested AI answers.",
            visibility
        ));
    } else {
        result.insight(format!(
            "The brand is missing from {:.0}% of tested AI answers.",
            100.0 - visibility
        ));
    }
    if result.overall >= 70 {
        result.insight("Content is well structured for answer engines.");
    }

    if input.faq_count < FAQ_CAP {
        result.recommend("Add an FAQ section covering the five most asked customer questions.");
    }
    if !input.has_faq_schema {
        result.recommend("Mark up FAQs with FAQPage structured data.");
    }
    if !input.has_structured_data {
        result.recommend("Add Organization and Product schema so assistants can identify the brand.");
    }
    if answerability < 40.0 {
        result.recommend("Open sections with a direct two-sentence answer before the detail.");
    }
    if authority < 50.0 {
        result.recommend("Cite authoritative sources and publish original data worth quoting.");
    }
    if visibility < 30.0 {
        result.recommend("Seed brand mentions on review sites and communities that assistants draw from.");
    }

    Ok(result)
}
