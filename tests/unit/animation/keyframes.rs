use super::*;

#[test]
fn overshoot_stops_interpolate_linearly() {
    let kf = Keyframes::from_stops(&[0.0, 1.2, 1.0], &[0.0, 0.4, 1.0], Ease::Linear).unwrap();
    assert_eq!(kf.sample(0.0).unwrap(), 0.0);
    assert!((kf.sample(0.2).unwrap() - 0.6).abs() < 1e-12);
    assert!((kf.sample(0.4).unwrap() - 1.2).abs() < 1e-12);
    assert!((kf.sample(0.7).unwrap() - 1.1).abs() < 1e-12);
    assert_eq!(kf.sample(1.0).unwrap(), 1.0);
}

#[test]
fn sample_clamps_out_of_range() {
    let kf = Keyframes::from_stops(&[0.0, 1.0, 0.0], &[0.0, 0.3, 1.0], Ease::Linear).unwrap();
    assert_eq!(kf.sample(-1.0).unwrap(), 0.0);
    assert_eq!(kf.sample(2.0).unwrap(), 0.0);
}

#[test]
fn from_stops_rejects_mismatched_or_unsorted() {
    assert!(Keyframes::from_stops(&[0.0, 1.0], &[0.0], Ease::Linear).is_err());
    assert!(Keyframes::from_stops(&[0.0, 1.0], &[0.5, 0.1], Ease::Linear).is_err());
    assert!(Keyframes::from_stops(&[0.0], &[1.5], Ease::Linear).is_err());
    assert!(Keyframes::<f64>::from_stops(&[], &[], Ease::Linear).is_err());
}
