use brand_diagnostics::config::DiagnosticsConfig;
use brand_diagnostics::diagnosis::Grade;
use brand_diagnostics::marketing::Review;
use brand_diagnostics::psychology::{PriceResistanceInput, SnsPost};
use brand_diagnostics::scoring::{EngagementInput, RetargetingInput, SeoInput};
use brand_diagnostics::{diagnose, BrandDiagnosticInput, DiagnosticArea, DiagnosticsError, Priority};

fn seo() -> SeoInput {
    SeoInput {
        title_length: 80,
        meta_description_length: 0,
        h1_count: 2,
        word_count: 400,
        keyword_count: 2,
        internal_links: 1,
        external_links: 0,
        image_count: 8,
        images_with_alt: 2,
        load_time_seconds: 4.2,
        mobile_friendly: true,
        https: true,
        has_sitemap: false,
    }
}

fn engagement() -> EngagementInput {
    EngagementInput {
        sessions: 1000,
        engaged_sessions: 600,
        bounce_rate: 40.0,
        avg_session_seconds: 200.0,
        pages_per_session: 6.0,
        returning_visitor_rate: 50.0,
    }
}

fn full_input() -> BrandDiagnosticInput {
    BrandDiagnosticInput {
        brand: "  Lumen Skincare ".to_string(),
        seo: Some(seo()),
        engagement: Some(engagement()),
        retargeting: Some(RetargetingInput {
            site_visitors: 10_000,
            cart_abandoners: 1_200,
            product_viewers: 3_000,
            past_purchasers: 500,
            avg_days_since_visit: 6.0,
            email_open_rate: 25.0,
            avg_order_value: 50_000.0,
        }),
        price: Some(PriceResistanceInput {
            price: 120_000.0,
            competitor_avg_price: 100_000.0,
            perceived_value: 4.0,
            cart_abandonment_rate: 70.0,
            discount_order_share: 50.0,
            price_complaint_share: 40.0,
        }),
        reviews: Some(vec![
            Review { rating: 5, text: "Great, recommend".to_string() },
            Review { rating: 2, text: "Arrived broken, refund please".to_string() },
        ]),
        sns_posts: Some(vec![SnsPost {
            platform: "instagram".to_string(),
            text: "Love the new serum, such a good deal".to_string(),
            likes: 40,
            comments: 3,
            shares: 1,
        }]),
        brand_message: Some("Skin you can trust, results you will love.".to_string()),
        monthly_revenue: Some(50_000_000.0),
        ..BrandDiagnosticInput::default()
    }
}

#[test]
fn full_diagnosis_covers_every_supplied_area() {
    let report = diagnose(&full_input(), &DiagnosticsConfig::default()).unwrap();

    assert_eq!(report.brand, "Lumen Skincare");
    assert_eq!(report.areas.len(), 7);
    assert!(report.area(DiagnosticArea::Aeo).is_none());
    assert!(report.overall <= 100);
    assert_eq!(report.grade, Grade::from_score(report.overall));
    assert!(report.price.is_some());
    assert!(report.reviews.is_some());
    assert!(report.personas.is_some());
    assert!(report.emotions.is_some());
    assert_eq!(report.retargeting_segments.len(), 4);
}

#[test]
fn pricing_health_is_inverse_of_resistance() {
    let report = diagnose(&full_input(), &DiagnosticsConfig::default()).unwrap();
    let pricing = report.area(DiagnosticArea::Pricing).unwrap();

    assert_eq!(pricing.result.overall, 68);
    assert_eq!(pricing.health, 32);
}

#[test]
fn strategies_are_sorted_and_carry_revenue_estimates() {
    let report = diagnose(&full_input(), &DiagnosticsConfig::default()).unwrap();

    assert!(!report.strategies.is_empty());
    for pair in report.strategies.windows(2) {
        assert!(pair[0].priority.weight() >= pair[1].priority.weight());
    }
    assert!(report
        .strategies
        .iter()
        .all(|strategy| strategy.expected_revenue_impact.is_some()));
    let pricing = report
        .strategies
        .iter()
        .find(|strategy| strategy.area == "pricing")
        .unwrap();
    assert_eq!(pricing.priority, Priority::Critical);
}

#[test]
fn overall_is_weighted_mean_of_area_health() {
    let input = BrandDiagnosticInput {
        brand: "Solo".to_string(),
        engagement: Some(engagement()),
        ..BrandDiagnosticInput::default()
    };
    let report = diagnose(&input, &DiagnosticsConfig::default()).unwrap();

    // A single area: the weighted mean is that area's health.
    assert_eq!(report.overall, 78);
    assert_eq!(report.grade, Grade::Good);
}

#[test]
fn zero_weights_fall_back_to_plain_mean() {
    let mut config = DiagnosticsConfig::default();
    config.diagnosis.engagement = 0.0;
    config.diagnosis.messaging = 0.0;

    let input = BrandDiagnosticInput {
        brand: "Flat".to_string(),
        engagement: Some(engagement()),
        brand_message: Some("".to_string()),
        ..BrandDiagnosticInput::default()
    };
    let report = diagnose(&input, &config).unwrap();
    assert_eq!(report.overall, 78);
}

#[test]
fn brand_is_required() {
    let input = BrandDiagnosticInput {
        brand: "   ".to_string(),
        engagement: Some(engagement()),
        ..BrandDiagnosticInput::default()
    };
    let err = diagnose(&input, &DiagnosticsConfig::default()).unwrap_err();
    assert!(matches!(err, DiagnosticsError::InvalidInput { field: "brand", .. }));
}

#[test]
fn at_least_one_section_is_required() {
    let input = BrandDiagnosticInput {
        brand: "Empty".to_string(),
        brand_message: Some("   ".to_string()),
        ..BrandDiagnosticInput::default()
    };
    assert!(diagnose(&input, &DiagnosticsConfig::default()).is_err());
}

#[test]
fn invalid_section_fails_the_whole_diagnosis() {
    let mut input = full_input();
    input.reviews = Some(Vec::new());
    assert!(diagnose(&input, &DiagnosticsConfig::default()).is_err());
}

#[test]
fn diagnosis_input_deserializes_from_json() {
    let json = r#"{
        "brand": "Json Co",
        "engagement": {
            "sessions": 1000,
            "engaged_sessions": 600,
            "bounce_rate": 40.0,
            "avg_session_seconds": 200.0,
            "pages_per_session": 6.0,
            "returning_visitor_rate": 50.0
        },
        "monthly_revenue": 1000000
    }"#;
    let input: BrandDiagnosticInput = serde_json::from_str(json).unwrap();
    let report = diagnose(&input, &DiagnosticsConfig::default()).unwrap();

    assert_eq!(report.brand, "Json Co");
    assert_eq!(report.areas.len(), 1);
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["areas"][0]["area"], "engagement");
}

#[test]
fn grade_boundaries() {
    assert_eq!(Grade::from_score(100), Grade::Excellent);
    assert_eq!(Grade::from_score(85), Grade::Excellent);
    assert_eq!(Grade::from_score(84), Grade::Good);
    assert_eq!(Grade::from_score(50), Grade::Fair);
    assert_eq!(Grade::from_score(30), Grade::Poor);
    assert_eq!(Grade::from_score(29), Grade::Critical);
}
