use campuscompass::shared::Duration;

#[test]
fn minutes_are_rounded() {
    assert_eq!(Duration::from_seconds(89.0).as_minutes(), 1);
    assert_eq!(Duration::from_seconds(90.0).as_minutes(), 2);
}

#[test]
fn short_durations_display_minutes() {
    assert_eq!(Duration::from_seconds(300.0).to_string(), "5 min");
    assert_eq!(Duration::from_seconds(0.0).to_string(), "0 min");
}

#[test]
fn long_durations_display_hours() {
    assert_eq!(Duration::from_seconds(5400.0).to_string(), "1h 30min");
    assert_eq!(Duration::from_seconds(7200.0).to_string(), "2h 0min");
}

#[test]
fn durations_sum() {
    let total: Duration = [120.0, 180.0].into_iter().map(Duration::from_seconds).sum();
    assert_eq!(total.as_seconds(), 300.0);
}
