use super::*;

#[test]
fn defaults_match_reference_behavior() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.fade(), Millis(500));
    assert_eq!(cfg.trigger.offset, 0.5);
    assert_eq!(cfg.trigger.step_selector, ".scrolly-container .step");
    assert!(!cfg.trigger.debug);
    assert_eq!(cfg.fly_to.duration_s, 1.0);
    assert_eq!(cfg.fly_to.ease_linearity, 0.1);
    cfg.validate().unwrap();
}

#[test]
fn empty_json_object_takes_defaults() {
    let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, EngineConfig::default());

    let cfg: EngineConfig =
        serde_json::from_str(r#"{ "fade_ms": 250, "trigger": { "debug": true } }"#).unwrap();
    assert_eq!(cfg.fade(), Millis(250));
    assert!(cfg.trigger.debug);
    assert_eq!(cfg.trigger.offset, 0.5);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut cfg = EngineConfig::default();
    cfg.trigger.offset = 1.5;
    assert!(matches!(cfg.validate(), Err(ScrollyError::Config(_))));

    let mut cfg = EngineConfig::default();
    cfg.fly_to.ease_linearity = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.default_map_zoom = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.trigger.step_selector = "  ".to_string();
    assert!(cfg.validate().is_err());
}
