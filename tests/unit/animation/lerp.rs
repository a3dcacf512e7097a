use super::*;

#[test]
fn scalar_and_vector_lerp() {
    assert_eq!(f64::lerp(&0.0, &10.0, 0.25), 2.5);
    assert_eq!(
        <Vec2 as Lerp>::lerp(&Vec2::new(0.0, 0.0), &Vec2::new(10.0, -10.0), 0.5),
        Vec2::new(5.0, -5.0)
    );
    assert_eq!(
        <Point as Lerp>::lerp(&Point::new(2.0, 2.0), &Point::new(4.0, 6.0), 0.5),
        Point::new(3.0, 4.0)
    );
}

#[test]
fn length_lerp_keeps_destination_unit() {
    let v = Length::lerp(&Length::Percent(100.0), &Length::Percent(0.0), 0.25);
    assert_eq!(v, Length::Percent(75.0));
}

#[test]
fn approach_clamps_factor() {
    assert_eq!(approach(&0.0, &10.0, 0.15), 1.5);
    assert_eq!(approach(&0.0, &10.0, 4.0), 10.0);
    assert_eq!(approach(&3.0, &10.0, -1.0), 3.0);
}

#[test]
fn damp_is_frame_rate_independent() {
    let one = damp(0.0, 1.0, 0.5, 0.2);
    let mut two = damp(0.0, 1.0, 0.5, 0.1);
    two = damp(two, 1.0, 0.5, 0.1);
    assert!((one - two).abs() < 1e-12);
}

#[test]
fn damp_edge_cases() {
    assert_eq!(damp(0.0, 1.0, 0.0, 0.016), 1.0);
    assert_eq!(damp(0.3, 1.0, 0.5, 0.0), 0.3);
}
