#[test]
fn default_config_is_usable() {
    let cfg = api_badges::config::AppConfig::from_env();
    assert!(!cfg.bind_addr.is_empty());
    assert!((0.0..=1.0).contains(&cfg.confidence_threshold));
    assert!(cfg.max_bulk_items > 0);
}

#[test]
fn engine_config_starts_from_standard_catalog() {
    let cfg = api_badges::config::AppConfig::from_env();
    let engine = api_badges::config::EngineConfig::from_app(&cfg);
    assert_eq!(engine.catalog.len(), 8);
    assert_eq!(engine.warn_on_unknown_criteria(), 0);
}
