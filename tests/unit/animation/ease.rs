use super::*;

fn curves() -> Vec<Curve> {
    vec![
        Curve::Linear,
        Curve::Ease,
        Curve::Quad,
        Curve::Cubic,
        Curve::Poly(4.0),
        Curve::Sin,
        Curve::Circle,
        Curve::Exp,
        Curve::Elastic(1.0),
        Curve::Back(1.70158),
        Curve::Bounce,
        Curve::Bezier(CubicBezier::new(0.25, 0.1, 0.25, 1.0)),
    ]
}

#[test]
fn endpoints_are_stable() {
    for curve in curves() {
        for ease in [Ease::in_(curve), Ease::out(curve), Ease::in_out(curve)] {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?} at 1");
        }
    }
}

#[test]
fn input_is_clamped() {
    let ease = Ease::out(Curve::Cubic);
    assert_eq!(ease.apply(-3.0), ease.apply(0.0));
    assert_eq!(ease.apply(7.0), ease.apply(1.0));
}

#[test]
fn monotonic_spot_check() {
    for curve in [
        Curve::Linear,
        Curve::Ease,
        Curve::Quad,
        Curve::Cubic,
        Curve::Sin,
        Curve::Circle,
        Curve::Exp,
    ] {
        for ease in [Ease::in_(curve), Ease::out(curve), Ease::in_out(curve)] {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b, "{ease:?}");
            assert!(b < c, "{ease:?}");
        }
    }
}

#[test]
fn out_cubic_matches_closed_form() {
    let ease = Ease::out(Curve::Cubic);
    for i in 0..=10 {
        let t = f64::from(i) / 10.0;
        let expected = 1.0 - (1.0 - t).powi(3);
        assert!((ease.apply(t) - expected).abs() < 1e-12);
    }
}

#[test]
fn back_out_overshoots_past_one() {
    let ease = Ease::out(Curve::Back(1.5));
    let peak = (1..100)
        .map(|i| ease.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
}

#[test]
fn back_in_dips_below_zero() {
    assert!(Ease::in_(Curve::Back(1.70158)).apply(0.2) < 0.0);
}

#[test]
fn elastic_out_oscillates_around_target() {
    let ease = Ease::out(Curve::Elastic(1.0));
    let values: Vec<f64> = (1..100).map(|i| ease.apply(f64::from(i) / 100.0)).collect();
    assert!(values.iter().any(|v| *v < 0.0));
    assert!(values.iter().all(|v| *v <= 1.0 + 1e-12));
}

#[test]
fn bezier_solver_hits_known_points() {
    let linearish = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
    for i in 0..=10 {
        let x = f64::from(i) / 10.0;
        assert!((linearish.solve(x) - x).abs() < 1e-6);
    }

    // Symmetric ease-in-out crosses the middle at the middle.
    let sym = CubicBezier::new(0.42, 0.0, 0.58, 1.0);
    assert!((sym.solve(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn ease_keyword_is_slow_at_start() {
    let e = Ease::in_(Curve::Ease);
    assert!(e.apply(0.25) < 0.25);
    let o = Ease::out(Curve::Ease);
    assert!(o.apply(0.25) > 0.25);
}

#[test]
fn default_is_linear() {
    assert_eq!(Ease::default(), Ease::LINEAR);
    assert_eq!(Ease::LINEAR.apply(0.3), 0.3);
}
