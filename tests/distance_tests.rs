use campuscompass::shared::{Coordinate, Distance};

#[test]
fn distance_test() {
    let library = Coordinate::new(-26.6900, 27.0950);
    let dining = Coordinate::new(-26.6910, 27.0940);
    let d = library.haversine_distance(&dining);
    assert!((d.as_meters() - 150.0).abs() < 10.0);
}

#[test]
fn distance_eq_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(1.0);
    assert_eq!(dist_a, dist_b)
}

#[test]
fn distance_cmp_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(0.5);
    assert!(dist_a > dist_b)
}

#[test]
fn distance_display_test() {
    assert_eq!(Distance::from_meters(500.0).to_string(), "500m");
    assert_eq!(Distance::from_meters(999.4).to_string(), "999m");
    assert_eq!(Distance::from_kilometers(12.34).to_string(), "12.3km");
}
