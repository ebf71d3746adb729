use tag_cloud_core::prelude::*;

#[test]
fn default_config_is_valid() {
    let cfg = CloudConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.step, 0.1);
    assert_eq!(cfg.margin, 64);
    assert_eq!(cfg.empty_canvas_size, 100);
    assert!(cfg.limits().is_unbounded());
}

#[test]
fn zero_step_is_rejected() {
    let cfg = CloudConfig::builder().step(0.0).build();
    match cfg.validate() {
        Err(TagCloudError::InvalidStep { step }) => assert_eq!(step, 0.0),
        other => panic!("expected InvalidStep, got {other:?}"),
    }
}

#[test]
fn non_finite_step_is_rejected() {
    assert!(CloudConfig::builder().step(f64::NAN).build().validate().is_err());
    assert!(CloudConfig::builder().step(-1.0).build().validate().is_err());
}

#[test]
fn zero_attempts_is_rejected() {
    let cfg = CloudConfig::builder().max_attempts(Some(0)).build();
    match cfg.validate() {
        Err(TagCloudError::InvalidConfig(msg)) => assert!(msg.contains("max_attempts")),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn negative_radius_is_rejected() {
    let cfg = CloudConfig::builder().max_radius(Some(-3.0)).build();
    assert!(matches!(cfg.validate(), Err(TagCloudError::InvalidConfig(_))));
}

#[test]
fn zero_radius_is_rejected() {
    let cfg = CloudConfig::builder().max_radius(Some(0.0)).build();
    match cfg.validate() {
        Err(TagCloudError::InvalidConfig(msg)) => assert!(msg.contains("max_radius")),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
    assert!(CloudConfig::builder().max_radius(Some(0.5)).build().validate().is_ok());
}

#[test]
fn empty_canvas_must_have_pixels() {
    let cfg = CloudConfig::builder().empty_canvas_size(0).build();
    assert!(cfg.validate().is_err());
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: CloudConfig =
        serde_json::from_str(r#"{ "center_x": 5, "step": 0.5, "max_attempts": 100 }"#).expect("parse");
    assert_eq!(cfg.center(), Point::new(5, 0));
    assert_eq!(cfg.step, 0.5);
    assert_eq!(cfg.margin, 64);
    assert_eq!(
        cfg.limits(),
        PlacementLimits {
            max_attempts: Some(100),
            max_radius: None
        }
    );
}

#[test]
fn builder_sets_limits() {
    let cfg = CloudConfig::builder()
        .center(-3, 4)
        .max_attempts(Some(10))
        .max_radius(Some(50.0))
        .build();
    assert_eq!(cfg.center(), Point::new(-3, 4));
    assert_eq!(cfg.limits().max_attempts, Some(10));
    assert_eq!(cfg.limits().max_radius, Some(50.0));
}
