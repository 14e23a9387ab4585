use brand_diagnostics::simulation::SimulationTables;
use brand_diagnostics::{
    compare_channels, simulate_performance, CampaignStrategy, Channel, DiagnosticsError,
    SimulationInput,
};

fn meta_conversion() -> SimulationInput {
    SimulationInput {
        budget: 1_000_000.0,
        channel: Channel::Meta,
        strategy: CampaignStrategy::Conversion,
        creative_quality: 7.0,
        targeting_precision: 8.0,
        psychology_match: 75.0,
    }
}

#[test]
fn meta_conversion_campaign_matches_documented_formula() {
    let result = simulate_performance(&meta_conversion(), &SimulationTables::default()).unwrap();

    assert!((result.expected_ctr - 1.354752).abs() < 1e-9);
    assert!((result.expected_cvr - 4.704).abs() < 1e-9);
    assert_eq!(result.expected_clicks, 17);
    assert_eq!(result.expected_impressions, 1255);
    assert_eq!(result.expected_conversions, 1);
    assert!((result.expected_revenue - 45_000.0).abs() < 1e-9);
    assert!((result.expected_roas - 0.045).abs() < 1e-12);
    assert!((result.expected_cpa - 1_000_000.0).abs() < 1e-9);
    assert_eq!(result.confidence, 75);
}

#[test]
fn simulation_is_deterministic() {
    let tables = SimulationTables::default();
    let first = simulate_performance(&meta_conversion(), &tables).unwrap();
    let second = simulate_performance(&meta_conversion(), &tables).unwrap();

    assert_eq!(first.expected_ctr, second.expected_ctr);
    assert_eq!(first.expected_cvr, second.expected_cvr);
    assert_eq!(first.expected_clicks, second.expected_clicks);
}

#[test]
fn roas_is_revenue_over_budget() {
    let mut input = meta_conversion();
    input.channel = Channel::Google;
    input.budget = 5_000_000.0;
    let result = simulate_performance(&input, &SimulationTables::default()).unwrap();

    assert!((result.expected_roas - result.expected_revenue / input.budget).abs() < 1e-12);
    assert!(result.expected_conversions > 0);
    assert!(
        (result.expected_cpa - input.budget / result.expected_conversions as f64).abs() < 1e-9
    );
}

#[test]
fn zero_budget_yields_zero_outcomes_without_nan() {
    let mut input = meta_conversion();
    input.budget = 0.0;
    let result = simulate_performance(&input, &SimulationTables::default()).unwrap();

    assert_eq!(result.expected_clicks, 0);
    assert_eq!(result.expected_impressions, 0);
    assert_eq!(result.expected_conversions, 0);
    assert_eq!(result.expected_roas, 0.0);
    // No conversions: CPA falls back to ten times the channel CPC.
    assert_eq!(result.expected_cpa, 8_000.0);
    assert!(result.expected_cpa.is_finite());
}

#[test]
fn out_of_range_sliders_are_rejected() {
    let tables = SimulationTables::default();

    let mut input = meta_conversion();
    input.creative_quality = 11.0;
    let err = simulate_performance(&input, &tables).unwrap_err();
    assert!(matches!(err, DiagnosticsError::InvalidInput { field: "creative_quality", .. }));

    let mut input = meta_conversion();
    input.psychology_match = -1.0;
    assert!(simulate_performance(&input, &tables).is_err());

    let mut input = meta_conversion();
    input.budget = f64::NAN;
    assert!(simulate_performance(&input, &tables).is_err());
}

#[test]
fn strategy_multipliers_shift_ctr_and_cvr() {
    let tables = SimulationTables::default();
    let mut awareness = meta_conversion();
    awareness.strategy = CampaignStrategy::Awareness;

    let awareness = simulate_performance(&awareness, &tables).unwrap();
    let conversion = simulate_performance(&meta_conversion(), &tables).unwrap();

    assert!(awareness.expected_ctr > conversion.expected_ctr);
    assert!(awareness.expected_cvr < conversion.expected_cvr);
    assert_eq!(awareness.multipliers.strategy_ctr, 1.3);
}

#[test]
fn compare_channels_orders_by_roas_descending() {
    let results = compare_channels(&meta_conversion(), &SimulationTables::default()).unwrap();

    assert_eq!(results.len(), Channel::ALL.len());
    for pair in results.windows(2) {
        assert!(pair[0].expected_roas >= pair[1].expected_roas);
    }
    for channel in Channel::ALL {
        assert!(results.iter().any(|result| result.channel == channel));
    }
}

#[test]
fn channel_and_strategy_names_parse_case_insensitively() {
    assert_eq!(Channel::parse("Google").unwrap(), Channel::Google);
    assert_eq!(Channel::parse("facebook").unwrap(), Channel::Meta);
    assert_eq!(CampaignStrategy::parse(" RETENTION ").unwrap(), CampaignStrategy::Retention);
    assert!(matches!(Channel::parse("tiktok"), Err(DiagnosticsError::UnknownChannel(_))));
    assert!(matches!(
        CampaignStrategy::parse("branding"),
        Err(DiagnosticsError::UnknownStrategy(_))
    ));
}

#[test]
fn custom_tables_change_the_outcome() {
    let mut tables = SimulationTables::default();
    tables.channels.get_mut(Channel::Meta).ctr = 2.4;
    let boosted = simulate_performance(&meta_conversion(), &tables).unwrap();

    assert!((boosted.expected_ctr - 2.0 * 1.354752).abs() < 1e-9);
}
