use brand_diagnostics::marketing::{analyze_reviews, Review};
use brand_diagnostics::psychology::{
    analyze_emotions, analyze_price_resistance, map_sns_personas, Emotion, Persona,
    PriceResistanceInput, ResistanceLevel, SnsPost,
};
use brand_diagnostics::scoring::{
    analyze_retargeting, score_aeo, score_engagement, score_seo, AeoInput, EngagementInput,
    RetargetingInput, Sentiment, SeoInput,
};
use brand_diagnostics::{DiagnosticsError, Priority, ScoreResult};

fn assert_bounded(result: &ScoreResult) {
    assert!(result.overall <= 100);
    for (name, score) in &result.subscores {
        assert!(*score <= 100, "subscore {} out of range: {}", name, score);
    }
}

fn strong_seo() -> SeoInput {
    SeoInput {
        title_length: 45,
        meta_description_length: 140,
        h1_count: 1,
        word_count: 2000,
        keyword_count: 30,
        internal_links: 5,
        external_links: 2,
        image_count: 10,
        images_with_alt: 10,
        load_time_seconds: 1.5,
        mobile_friendly: true,
        https: true,
        has_sitemap: true,
    }
}

#[test]
fn strong_seo_page_scores_near_full_marks() {
    let result = score_seo(&strong_seo()).unwrap();

    assert_eq!(result.overall, 100);
    assert_eq!(result.subscore("on_page"), Some(100));
    assert_eq!(result.subscore("content"), Some(99));
    assert_eq!(result.subscore("technical"), Some(100));
    assert!(result.recommendations.is_empty());
}

#[test]
fn empty_seo_page_stays_in_range() {
    let input = SeoInput {
        title_length: 0,
        meta_description_length: 0,
        h1_count: 0,
        word_count: 0,
        keyword_count: 0,
        internal_links: 0,
        external_links: 0,
        image_count: 0,
        images_with_alt: 0,
        load_time_seconds: 30.0,
        mobile_friendly: false,
        https: false,
        has_sitemap: false,
    };
    let result = score_seo(&input).unwrap();

    assert_bounded(&result);
    assert_eq!(result.overall, 13);
    assert_eq!(result.subscore("on_page"), Some(0));
    assert!(result.recommendations.iter().any(|r| r.contains("HTTPS")));
}

#[test]
fn keyword_stuffing_is_flagged() {
    let mut input = strong_seo();
    input.keyword_count = 200;
    let result = score_seo(&input).unwrap();

    assert!(result.recommendations.iter().any(|r| r.contains("keyword-stuffed")));
}

#[test]
fn seo_rejects_inconsistent_counts() {
    let mut input = strong_seo();
    input.images_with_alt = 11;
    let err = score_seo(&input).unwrap_err();
    assert!(matches!(err, DiagnosticsError::InvalidInput { field: "images_with_alt", .. }));

    let mut input = strong_seo();
    input.load_time_seconds = -1.0;
    assert!(score_seo(&input).is_err());
}

#[test]
fn scorers_are_idempotent() {
    let first = score_seo(&strong_seo()).unwrap();
    let second = score_seo(&strong_seo()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn aeo_covers_the_full_range() {
    let empty = AeoInput {
        faq_count: 0,
        question_headings: 0,
        has_structured_data: false,
        has_faq_schema: false,
        answer_paragraphs: 0,
        total_paragraphs: 0,
        citation_count: 0,
        ai_queries_tested: 0,
        ai_mentions: 0,
    };
    let result = score_aeo(&empty).unwrap();
    assert_eq!(result.overall, 0);
    assert!(result.insights[0].contains("No AI assistant queries"));

    let saturated = AeoInput {
        faq_count: 50,
        question_headings: 50,
        has_structured_data: true,
        has_faq_schema: true,
        answer_paragraphs: 10,
        total_paragraphs: 10,
        citation_count: 100,
        ai_queries_tested: 5,
        ai_mentions: 5,
    };
    let result = score_aeo(&saturated).unwrap();
    assert_eq!(result.overall, 100);
    assert_bounded(&result);
}

#[test]
fn aeo_rejects_more_mentions_than_queries() {
    let input = AeoInput {
        faq_count: 1,
        question_headings: 1,
        has_structured_data: false,
        has_faq_schema: false,
        answer_paragraphs: 1,
        total_paragraphs: 2,
        citation_count: 0,
        ai_queries_tested: 3,
        ai_mentions: 4,
    };
    assert!(score_aeo(&input).is_err());
}

#[test]
fn engagement_weights_components() {
    let input = EngagementInput {
        sessions: 1000,
        engaged_sessions: 600,
        bounce_rate: 40.0,
        avg_session_seconds: 200.0,
        pages_per_session: 6.0,
        returning_visitor_rate: 50.0,
    };
    let result = score_engagement(&input).unwrap();

    assert_eq!(result.overall, 78);
    assert_eq!(result.subscore("engagement"), Some(60));
    assert_eq!(result.subscore("depth"), Some(100));
}

#[test]
fn engagement_with_no_sessions_does_not_divide_by_zero() {
    let input = EngagementInput {
        sessions: 0,
        engaged_sessions: 0,
        bounce_rate: 100.0,
        avg_session_seconds: 0.0,
        pages_per_session: 0.0,
        returning_visitor_rate: 0.0,
    };
    let result = score_engagement(&input).unwrap();
    assert_eq!(result.overall, 0);
    assert_bounded(&result);
}

#[test]
fn engagement_rejects_invalid_rates() {
    let mut input = EngagementInput {
        sessions: 10,
        engaged_sessions: 20,
        bounce_rate: 40.0,
        avg_session_seconds: 60.0,
        pages_per_session: 2.0,
        returning_visitor_rate: 20.0,
    };
    assert!(score_engagement(&input).is_err());

    input.engaged_sessions = 5;
    input.bounce_rate = 120.0;
    assert!(score_engagement(&input).is_err());
}

#[test]
fn retargeting_segments_sort_by_priority_then_revenue() {
    let input = RetargetingInput {
        site_visitors: 10_000,
        cart_abandoners: 1_200,
        product_viewers: 3_000,
        past_purchasers: 500,
        avg_days_since_visit: 6.0,
        email_open_rate: 25.0,
        avg_order_value: 50_000.0,
    };
    let report = analyze_retargeting(&input).unwrap();

    assert_eq!(report.score.overall, 77);
    let names: Vec<&str> = report.segments.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Cart abandoners", "Product viewers", "Past purchasers", "Other visitors"]
    );
    assert_eq!(report.segments[0].priority, Priority::Critical);
    assert_eq!(report.segments[0].expected_revenue, 4_800_000.0);
    assert_eq!(report.segments[3].audience_size, 5_300);
}

#[test]
fn stale_retargeting_pool_stays_in_range() {
    let input = RetargetingInput {
        site_visitors: 100,
        cart_abandoners: 100,
        product_viewers: 100,
        past_purchasers: 0,
        avg_days_since_visit: 365.0,
        email_open_rate: 100.0,
        avg_order_value: 10.0,
    };
    let report = analyze_retargeting(&input).unwrap();
    assert_bounded(&report.score);
    assert_eq!(report.score.subscore("recency"), Some(0));
}

#[test]
fn emotion_analysis_detects_positive_copy() {
    let analysis = analyze_emotions("I love this, great quality. Can't wait for the next one!");

    assert_eq!(analysis.counts[&Emotion::Joy], 2);
    assert_eq!(analysis.counts[&Emotion::Anticipation], 1);
    assert_eq!(analysis.dominant, Some(Emotion::Joy));
    assert_eq!(analysis.positivity, 100);
    assert_eq!(analysis.sentiment, Sentiment::Positive);
}

#[test]
fn emotion_analysis_detects_negative_copy() {
    let analysis = analyze_emotions("Terrible service, the worst purchase, I am angry.");

    assert_eq!(analysis.counts[&Emotion::Anger], 3);
    assert_eq!(analysis.dominant, Some(Emotion::Anger));
    assert_eq!(analysis.sentiment, Sentiment::Negative);
    let result = analysis.to_score_result();
    assert_eq!(result.overall, 0);
    assert_eq!(result.subscore("anger"), Some(100));
}

#[test]
fn emotion_analysis_of_plain_text_is_neutral() {
    let analysis = analyze_emotions("");
    assert_eq!(analysis.dominant, None);
    assert_eq!(analysis.positivity, 50);
    assert_eq!(analysis.sentiment, Sentiment::Neutral);
}

#[test]
fn personas_are_weighted_by_engagement() {
    let posts = vec![
        SnsPost {
            platform: "Instagram".to_string(),
            text: "New drop is viral, total hype".to_string(),
            likes: 100,
            comments: 0,
            shares: 0,
        },
        SnsPost {
            platform: "instagram".to_string(),
            text: "Great deal at this price with a discount".to_string(),
            likes: 0,
            comments: 0,
            shares: 0,
        },
    ];
    let map = map_sns_personas(&posts).unwrap();

    assert_eq!(map.primary, Some(Persona::TrendSeeker));
    assert_eq!(map.shares[&Persona::TrendSeeker], 75);
    assert_eq!(map.shares[&Persona::ValueHunter], 25);
    assert_eq!(map.sentiment, Sentiment::Neutral);
    assert_eq!(map.platform_posts["instagram"], 2);
    assert_eq!(map.post_count, 2);
    assert_bounded(&map.to_score_result());
}

#[test]
fn negated_like_is_not_positive() {
    let posts = vec![SnsPost {
        platform: "x".to_string(),
        text: "I dislike this, unlike the old one".to_string(),
        likes: 0,
        comments: 0,
        shares: 0,
    }];
    let map = map_sns_personas(&posts).unwrap();

    assert_eq!(map.sentiment, Sentiment::Negative);
    assert_eq!(map.sentiment_score, 0);
}

#[test]
fn persona_keywords_match_whole_words() {
    let posts = vec![SnsPost {
        platform: "blog".to_string(),
        text: "I knew the renewal would come".to_string(),
        likes: 0,
        comments: 0,
        shares: 0,
    }];
    let map = map_sns_personas(&posts).unwrap();

    assert_eq!(map.primary, None);
    assert_eq!(map.sentiment, Sentiment::Neutral);
    assert_eq!(map.sentiment_score, 50);
}

#[test]
fn personas_require_posts() {
    assert!(map_sns_personas(&[]).is_err());
}

#[test]
fn high_price_resistance_suggests_competitive_band() {
    let input = PriceResistanceInput {
        price: 120_000.0,
        competitor_avg_price: 100_000.0,
        perceived_value: 4.0,
        cart_abandonment_rate: 70.0,
        discount_order_share: 50.0,
        price_complaint_share: 40.0,
    };
    let report = analyze_price_resistance(&input).unwrap();

    assert_eq!(report.score.overall, 68);
    assert_eq!(report.level, ResistanceLevel::High);
    assert_eq!(report.health(), 32);
    assert_eq!(report.price_gap_percent, 20.0);
    assert_eq!(report.recommended_price_min, 90_000.0);
    assert_eq!(report.recommended_price_max, 100_000.0);
}

#[test]
fn low_resistance_with_high_value_allows_premium() {
    let input = PriceResistanceInput {
        price: 90_000.0,
        competitor_avg_price: 100_000.0,
        perceived_value: 9.0,
        cart_abandonment_rate: 10.0,
        discount_order_share: 5.0,
        price_complaint_share: 0.0,
    };
    let report = analyze_price_resistance(&input).unwrap();

    assert_eq!(report.level, ResistanceLevel::Low);
    assert_eq!(report.score.overall, 12);
    assert_eq!(report.recommended_price_min, 90_000.0);
    assert_eq!(report.recommended_price_max, 99_000.0);
}

#[test]
fn extreme_price_inputs_stay_in_range() {
    let input = PriceResistanceInput {
        price: 1e9,
        competitor_avg_price: 1.0,
        perceived_value: 0.0,
        cart_abandonment_rate: 100.0,
        discount_order_share: 100.0,
        price_complaint_share: 100.0,
    };
    let report = analyze_price_resistance(&input).unwrap();
    assert_eq!(report.score.overall, 100);
    assert_eq!(report.level, ResistanceLevel::Severe);
    assert_eq!(report.health(), 0);
    assert_bounded(&report.score);
}

#[test]
fn price_resistance_rejects_zero_prices() {
    let input = PriceResistanceInput {
        price: 10.0,
        competitor_avg_price: 0.0,
        perceived_value: 5.0,
        cart_abandonment_rate: 10.0,
        discount_order_share: 10.0,
        price_complaint_share: 10.0,
    };
    assert!(analyze_price_resistance(&input).is_err());
}

fn review(rating: u8, text: &str) -> Review {
    Review {
        rating,
        text: text.to_string(),
    }
}

#[test]
fn reviews_classify_and_rank_complaints() {
    let reviews = vec![
        review(5, "Great product, fast shipping, recommend"),
        review(1, "Broken on arrival, want a refund"),
        review(3, "It is okay"),
        review(4, "Good but shipping was slow"),
    ];
    let analysis = analyze_reviews(&reviews).unwrap();

    assert_eq!(analysis.review_count, 4);
    assert_eq!(analysis.positive_ratio, 50.0);
    assert_eq!(analysis.negative_ratio, 25.0);
    assert_eq!(analysis.neutral_ratio, 25.0);
    assert_eq!(analysis.average_rating, 3.25);
    assert_eq!(analysis.sentiment_score, 54);
    assert_eq!(analysis.sentiment, Sentiment::Positive);

    let complaints: Vec<&str> = analysis.top_complaints.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(complaints, vec!["broken", "refund", "slow"]);
}

#[test]
fn complaint_keywords_ignore_longer_words() {
    let reviews = vec![
        review(4, "The chocolate arrived with a cute badge"),
        review(2, "Delivery was late and the box was bad"),
    ];
    let analysis = analyze_reviews(&reviews).unwrap();

    assert_eq!(
        analysis.top_complaints,
        vec![("bad".to_string(), 1), ("late".to_string(), 1)]
    );
    assert_eq!(analysis.positive_ratio, 50.0);
    assert_eq!(analysis.negative_ratio, 50.0);
}

#[test]
fn reviews_reject_bad_input() {
    assert!(analyze_reviews(&[]).is_err());
    assert!(analyze_reviews(&[review(0, "meh")]).is_err());
    assert!(analyze_reviews(&[review(6, "great")]).is_err());
}
