use super::*;

const ALL: [Ease; 3] = [Ease::InPow(1.4), Ease::InPow(0.5), Ease::OutQuad];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn in_pow_lags_and_out_quad_leads_the_diagonal() {
    assert!(Ease::InPow(1.4).apply(0.5) < 0.5);
    assert!(Ease::OutQuad.apply(0.5) > 0.5);
    assert_eq!(Ease::OutQuad.apply(0.5), 0.75);
}

#[test]
fn out_of_range_and_nan_are_clamped() {
    assert_eq!(Ease::OutQuad.apply(-3.0), 0.0);
    assert_eq!(Ease::OutQuad.apply(7.0), 1.0);
    assert_eq!(Ease::InPow(1.4).apply(f64::NAN), 0.0);
}
