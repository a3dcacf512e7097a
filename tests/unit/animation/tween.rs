use super::*;

#[test]
fn tween_holds_from_until_start() {
    let t = Tween::new(0.0, 10.0, 1.0).starting_at(0.5);
    assert_eq!(t.phase(0.2), TweenPhase::Pending);
    assert_eq!(t.sample(0.2), 0.0);
    assert_eq!(t.sample(1.0), 5.0);
    assert_eq!(t.phase(1.5), TweenPhase::Finished);
    assert_eq!(t.sample(9.0), 10.0);
}

#[test]
fn eased_tween_uses_curve() {
    let t = Tween::new(0.0, 1.0, 1.0).with_ease(Ease::OutQuart);
    assert!((t.sample(0.5) - 0.9375).abs() < 1e-12);
}

#[test]
fn zero_duration_jumps_at_start() {
    let t = Tween::new(1.0, 2.0, 0.0).starting_at(3.0);
    assert_eq!(t.sample(2.9), 1.0);
    assert_eq!(t.sample(3.0), 2.0);
    assert_eq!(t.progress(3.0), 1.0);
}

#[test]
fn validate_rejects_bad_duration() {
    assert!(Tween::new(0.0, 1.0, -1.0).validate().is_err());
    assert!(Tween::new(0.0, 1.0, f64::INFINITY).validate().is_err());
    assert!(Tween::new(0.0, 1.0, 0.8).validate().is_ok());
}

#[test]
fn retarget_continues_from_current() {
    let t = Tween::new(0.0, 100.0, 1.0).with_ease(Ease::WIPE);
    let mid = t.sample(0.5);
    let back = t.retarget(mid, 0.0, 0.5, 0.4);
    assert_eq!(back.sample(0.5), mid);
    assert_eq!(back.sample(0.9), 0.0);
    assert_eq!(back.ease, Ease::WIPE);
}

#[test]
fn stagger_offsets() {
    let v: Vec<f64> = stagger(3, 0.1, 0.04).collect();
    assert_eq!(v.len(), 3);
    assert!((v[2] - 0.18).abs() < 1e-12);
}
