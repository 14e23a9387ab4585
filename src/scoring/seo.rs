use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scoring::ScoreResult;
use crate::{bool_score, ensure_non_negative, ensure_subset, safe_divide};

const TITLE_IDEAL: (usize, usize) = (30, 60);
const TITLE_TOLERATED_MAX: usize = 70;
const META_IDEAL: (usize, usize) = (120, 160);
const META_TOLERATED: (usize, usize) = (50, 200);
const DENSITY_IDEAL: (f64, f64) = (1.0, 2.5);
const DENSITY_TOLERATED: (f64, f64) = (0.5, 4.0);
const WORD_COUNT_TIERS: [(u32, f64); 3] = [(1500, 100.0), (800, 80.0), (300, 50.0)];
const LOAD_TIME_TIERS: [(f64, f64); 3] = [(2.0, 100.0), (3.0, 80.0), (5.0, 50.0)];
const FLOOR_SCORE: f64 = 20.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoInput {
    pub title_length: usize,
    pub meta_description_length: usize,
    pub h1_count: u32,
    pub word_count: u32,
    pub keyword_count: u32,
    pub internal_links: u32,
    pub external_links: u32,
    pub image_count: u32,
    pub images_with_alt: u32,
    pub load_time_seconds: f64,
    pub mobile_friendly: bool,
    pub https: bool,
    pub has_sitemap: bool,
}

pub fn score_seo(input: &SeoInput) -> Result<ScoreResult> {
    ensure_non_negative("load_time_seconds", input.load_time_seconds)?;
    ensure_subset(
        "images_with_alt",
        input.images_with_alt as u64,
        input.image_count as u64,
    )?;

    let title = title_score(input.title_length);
    let meta = meta_score(input.meta_description_length);
    let h1 = match input.h1_count {
        0 => 0.0,
        1 => 100.0,
        _ => 50.0,
    };
    let on_page = 0.4 * title + 0.35 * meta + 0.25 * h1;

    let density = safe_divide(input.keyword_count as f64 * 100.0, input.word_count as f64, 0.0);
    let density_score = if (DENSITY_IDEAL.0..=DENSITY_IDEAL.1).contains(&density) {
        100.0
    } else if (DENSITY_TOLERATED.0..=DENSITY_TOLERATED.1).contains(&density) {
        60.0
    } else {
        FLOOR_SCORE
    };
    let length_score = WORD_COUNT_TIERS
        .iter()
        .find(|(min_words, _)| input.word_count >= *min_words)
        .map(|(_, score)| *score)
        .unwrap_or(FLOOR_SCORE);
    let alt_coverage = safe_divide(
        input.images_with_alt as f64,
        input.image_count as f64,
        1.0,
    ) * 100.0;
    let link_score =
        (input.internal_links as f64 * 15.0 + input.external_links as f64 * 10.0).min(100.0);
    let content = 0.35 * density_score + 0.35 * length_score + 0.15 * alt_coverage + 0.15 * link_score;

    let speed = LOAD_TIME_TIERS
        .iter()
        .find(|(max_seconds, _)| input.load_time_seconds <= *max_seconds)
        .map(|(_, score)| *score)
        .unwrap_or(FLOOR_SCORE);
    let technical = 0.4 * speed
        + 0.25 * bool_score(input.mobile_friendly)
        + 0.2 * bool_score(input.https)
        + 0.15 * bool_score(input.has_sitemap);

    let overall = 0.35 * on_page + 0.35 * content + 0.3 * technical;

    let mut result = ScoreResult::new(overall);
    result.set_subscore("on_page", on_page);
    result.set_subscore("content", content);
    result.set_subscore("technical", technical);

    if result.overall >= 80 {
        result.insight("Search fundamentals are strong across on-page, content and technical checks.");
    }
    if on_page < 50.0 {
        result.insight("On-page metadata is holding rankings back.");
    }
    if content < 50.0 {
        result.insight("Content depth and keyword coverage are below what ranking pages show.");
    }
    if technical < 50.0 {
        result.insight("Technical health issues limit crawlability and page experience.");
    }

    if title < 100.0 {
        result.recommend(format!(
            "Rewrite the title tag to {}-{} characters with the primary keyword up front.",
            TITLE_IDEAL.0, TITLE_IDEAL.1
        ));
    }
    if meta < 100.0 {
        result.recommend(format!(
            "Write a {}-{} character meta description that states the benefit and a call to action.",
            META_IDEAL.0, META_IDEAL.1
        ));
    }
    if input.h1_count != 1 {
        result.recommend("Use exactly one H1 heading per page.");
    }
    if density_score < 100.0 {
        if density > DENSITY_IDEAL.1 {
            result.recommend("Reduce keyword repetition; the page reads as keyword-stuffed.");
        } else {
            result.recommend("Work the target keyword and close variants into headings and body copy.");
        }
    }
    if length_score < 80.0 {
        result.recommend("Expand the page to at least 800 words of useful, original content.");
    }
    if alt_coverage < 100.0 {
        result.recommend("Add descriptive alt text to every image.");
    }
    if input.internal_links < 3 {
        result.recommend("Link to at least three related pages on the same site.");
    }
    if speed < 80.0 {
        result.recommend("Cut load time under 3 seconds: compress images and defer non-critical scripts.");
    }
    if !input.mobile_friendly {
        result.recommend("Fix mobile layout issues; most traffic arrives on phones.");
    }
    if !input.https {
        result.recommend("Serve the site over HTTPS.");
    }
    if !input.has_sitemap {
        result.recommend("Publish an XML sitemap and submit it to search consoles.");
    }

    Ok(result)
}

fn title_score(length: usize) -> f64 {
    if length == 0 {
        0.0
    } else if (TITLE_IDEAL.0..=TITLE_IDEAL.1).contains(&length) {
        100.0
    } else if length <= TITLE_TOLERATED_MAX {
        60.0
    } else {
        30.0
    }
}

fn meta_score(length: usize) -> f64 {
    if length == 0 {
        0.0
    } else if (META_IDEAL.0..=META_IDEAL.1).contains(&length) {
        100.0
    } else if (META_TOLERATED.0..=META_TOLERATED.1).contains(&length) {
        60.0
    } else {
        30.0
    }
}
