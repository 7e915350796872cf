use super::*;

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    s.validate().unwrap();
    assert_eq!(s.accuracy, 100);
    assert_eq!(s.rotation_speed, 0.01);
    assert_eq!(s.fps, Fps::new(60, 1).unwrap());
}

#[test]
fn partial_json_fills_defaults() {
    let s = Settings::from_reader(
        r#"{ "accuracy": 12, "plane": { "width": 64, "height": 48 }, "tour": { "two_opt": true } }"#
            .as_bytes(),
    )
    .unwrap();
    assert_eq!(s.accuracy, 12);
    assert_eq!(s.plane.width, 64);
    assert!(s.tour.two_opt);
    assert_eq!(s.rotation_speed, 0.01);
    assert!(!s.clear_on_wrap);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = Settings::from_reader(r#"{ "acuracy": 12 }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, EpicycleError::Serde(_)));
}

#[test]
fn out_of_range_values_fail_validation() {
    for json in [
        r#"{ "accuracy": 0 }"#,
        r#"{ "accuracy": 1401 }"#,
        r#"{ "rotation_speed": 0.0 }"#,
        r#"{ "rotation_speed": -1.0 }"#,
        r#"{ "fps": { "num": 0, "den": 1 } }"#,
        r#"{ "plane": { "width": 0, "height": 10 } }"#,
    ] {
        let err = Settings::from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, EpicycleError::Validation(_)), "{json}: {err}");
    }
}

#[test]
fn accuracy_upper_bound_is_inclusive() {
    let s = Settings {
        accuracy: MAX_ACCURACY,
        ..Settings::default()
    };
    assert!(s.validate().is_ok());
}

#[test]
fn missing_file_is_reported() {
    let err = Settings::from_path("target/no/such/settings.json").unwrap_err();
    assert!(err.to_string().contains("settings.json"));
}

#[test]
fn animation_opts_mirror_settings() {
    let s = Settings {
        rotation_speed: 0.2,
        clear_on_wrap: true,
        ..Settings::default()
    };
    assert_eq!(
        s.animation_opts(),
        AnimationOpts {
            rotation_speed: 0.2,
            clear_on_wrap: true,
        }
    );
}
