use super::*;

#[test]
fn defaults_are_valid() {
    let config = EngineConfig::default();
    config.validate().unwrap();
    assert_eq!(config.frame_rate, 60.0);
    assert!((config.frame_interval_ms() - 16.666_666_666_666_668).abs() < 1e-9);
}

#[test]
fn json_fills_missing_fields() {
    let config = EngineConfig::from_json_str(r#"{ "frame_rate": 30 }"#).unwrap();
    assert_eq!(config.frame_rate, 30.0);
    assert_eq!(config.canvas, Size::new(800.0, 600.0));
    assert_eq!(config.viewport_scale, 1.0);
}

#[test]
fn rejects_bad_values() {
    for config in [
        EngineConfig::default().with_frame_rate(0.0),
        EngineConfig::default().with_frame_rate(f64::NAN),
        EngineConfig::default().with_canvas(Size::new(0.0, 10.0)),
        EngineConfig::default().with_viewport(Vec2::ZERO, -1.0),
        EngineConfig::default().with_viewport(Vec2::new(f64::INFINITY, 0.0), 1.0),
    ] {
        assert!(matches!(config.validate(), Err(MarqueeError::Config(_))));
    }
    assert!(EngineConfig::from_json_str(r#"{ "frame_rate": -3 }"#).is_err());
}

#[test]
fn normalize_applies_origin_and_scale() {
    let config = EngineConfig::default().with_viewport(Vec2::new(10.0, 20.0), 2.0);
    assert_eq!(config.normalize(Point::new(30.0, 40.0)), Point::new(10.0, 10.0));
    assert_eq!(EngineConfig::default().normalize(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
}
