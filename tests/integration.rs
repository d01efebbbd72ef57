use run42195::{
    distance, duration, pace, set_unit_system, speed, Distance, Duration, Error, Pace, Speed,
    UnitSystem, HALF_MARATHON, IMPERIAL, MARATHON, METRIC,
};

#[test]
fn marathon_record_pace() {
    let _metric = UnitSystem::Metric.scope();
    let record = duration("2:00:35").unwrap() / MARATHON;
    assert_eq!(record.to_string(), "2:51.5/km");
}

#[test]
fn marathon_at_four_minute_pace() {
    let finish = MARATHON * pace("4:00/km").unwrap();
    assert_eq!(finish.to_string(), "2:48:46.8");
}

#[test]
fn distance_display_per_unit_system() {
    let d = distance("1 km").unwrap();
    {
        let _imperial = set_unit_system(IMPERIAL).unwrap();
        assert_eq!(d.to_string(), "0.62 mi");
    }
    let _metric = set_unit_system(METRIC).unwrap();
    assert_eq!(d.to_string(), "1.00 km");
}

#[test]
fn ten_km_h_is_six_minute_pace() {
    let _metric = UnitSystem::Metric.scope();
    let expected = Pace::parse("6:00").unwrap();
    let got = speed(10).unwrap().to_pace();
    assert!((got.seconds_per_km() - expected.seconds_per_km()).abs() < 0.001);
}

#[test]
fn dimensional_round_trips() {
    let d = Distance::from_km(21.1);
    let p = Pace::from_seconds_per_km(283.4);
    let t = d * p;
    assert!(((t / p).km() - d.km()).abs() < 1e-9);
    assert!(((t / d).seconds_per_km() - p.seconds_per_km()).abs() < 1e-9);

    let s: Speed = d / t;
    assert!(((d / s).seconds() - t.seconds()).abs() < 1e-6);
    assert!(((s * t).km() - d.km()).abs() < 1e-9);
    assert!((s.km_h() - p.to_speed().km_h()).abs() < 1e-9);
}

#[test]
fn invalid_inputs_fail_cleanly() {
    assert!(matches!(Distance::parse("-4km"), Err(Error::Parse { .. })));
    assert!(matches!(run42195::parse_interval("1::"), Err(Error::Parse { .. })));
    assert!(matches!(set_unit_system("si"), Err(Error::InvalidArgument(_))));
}

#[test]
fn splits_add_up_to_finish_time() {
    let _metric = UnitSystem::Metric.scope();
    let first: Duration = "1:44:10".parse().unwrap();
    let second: Duration = "1:41:02".parse().unwrap();
    let total = [first, second].iter().sum::<Duration>();
    assert_eq!(total.format_whole_seconds(), "3:25:12");
    assert_eq!((total / MARATHON).to_string(), "4:51.8/km");
    assert!((second / HALF_MARATHON) < (first / HALF_MARATHON));
}

#[test]
fn overrides_do_not_leak_across_threads() {
    let _metric = UnitSystem::Metric.scope();
    let handle = std::thread::spawn(|| {
        let _imperial = UnitSystem::Imperial.scope();
        MARATHON.to_string()
    });
    assert_eq!(handle.join().unwrap(), "26.22 mi");
    assert_eq!(MARATHON.to_string(), "42.20 km");
}

#[cfg(feature = "serde")]
#[test]
fn serde_uses_canonical_values() {
    let json = serde_json::to_string(&MARATHON).unwrap();
    assert_eq!(json, "42.195");
    let back: Distance = serde_json::from_str(&json).unwrap();
    assert_eq!(back, MARATHON);

    let system: UnitSystem = serde_json::from_str("\"imperial\"").unwrap();
    assert_eq!(system, UnitSystem::Imperial);
    assert!(serde_json::from_str::<UnitSystem>("\"si\"").is_err());
}
