use hop_planner::{PlannerConfig, Verbosity};

#[test]
fn verbosity_levels_saturate_at_detail() {
    assert_eq!(Verbosity::from(0u8), Verbosity::Silent);
    assert_eq!(Verbosity::from(2u8), Verbosity::Calls);
    assert_eq!(Verbosity::from(9u8), Verbosity::Detail);
    assert_eq!(u8::from(Verbosity::Summary), 1);
    assert!(Verbosity::default().is_silent());
}

#[test]
fn builder_sets_fields() {
    let config = PlannerConfig::default().with_verbosity(3u8).with_max_depth(8);
    assert_eq!(config.verbosity, Verbosity::Detail);
    assert_eq!(config.max_depth, Some(8));
}

#[cfg(feature = "serde")]
#[test]
fn config_reads_partial_json() {
    let config: PlannerConfig = serde_json::from_str(r#"{"verbosity": 2}"#).unwrap();
    assert_eq!(config.verbosity, Verbosity::Calls);
    assert_eq!(config.max_depth, None);

    let config: PlannerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, PlannerConfig::default());

    let config: PlannerConfig = serde_json::from_str(r#"{"max_depth": 40}"#).unwrap();
    assert_eq!(config.max_depth, Some(40));
}

#[cfg(feature = "serde")]
#[test]
fn verbosity_serializes_as_its_level() {
    assert_eq!(serde_json::to_value(Verbosity::Calls).unwrap(), 2);
    let back: Verbosity = serde_json::from_str("3").unwrap();
    assert_eq!(back, Verbosity::Detail);
}
