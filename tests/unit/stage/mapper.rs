use super::*;

#[test]
fn block_size_endpoints_match_bounds() {
    let curve = StageCurve::default();
    assert_eq!(curve.block_size_of(0), 256);
    assert_eq!(curve.block_size_of(15), 8);
}

#[test]
fn block_size_is_monotone_non_increasing() {
    for curve in [
        StageCurve::default(),
        StageCurve::new(32, 128, 4, 1.4).unwrap(),
        StageCurve::new(2, 9, 9, 2.0).unwrap(),
    ] {
        let mut prev = curve.block_size_of(0);
        for stage in 1..curve.stages() {
            let size = curve.block_size_of(stage);
            assert!(size <= prev, "stage {stage}: {size} > {prev}");
            prev = size;
        }
        assert_eq!(curve.block_size_of(curve.last_stage()), curve.min_block());
    }
}

#[test]
fn block_size_follows_eased_curve() {
    let curve = StageCurve::default();
    // p = 1/15, eased = p^1.4, 256 * (1/32)^eased
    let p: f64 = 1.0 / 15.0;
    let expected = (256.0 * (8.0f64 / 256.0).powf(p.powf(1.4))).round() as u32;
    assert_eq!(curve.block_size_of(1), expected);
}

#[test]
fn stage_of_sample_fractions() {
    let curve = StageCurve::default();
    assert_eq!(curve.stage_of(0.0), 0);
    assert_eq!(curve.stage_of(0.5), 8);
    assert_eq!(curve.stage_of(0.999), 15);
    assert_eq!(curve.stage_of(1.0), 15);
}

#[test]
fn stage_of_clamps_out_of_range_input() {
    let curve = StageCurve::default();
    assert_eq!(curve.stage_of(-0.5), 0);
    assert_eq!(curve.stage_of(4.0), 15);
    assert_eq!(curve.stage_of(f64::NAN), 0);
    assert_eq!(curve.block_size_of(99), 8);
}

#[test]
fn elapsed_fraction_handles_degenerate_total() {
    assert_eq!(elapsed_fraction(0, 0), 0.0);
    assert_eq!(elapsed_fraction(0, 30), 0.0);
    assert_eq!(elapsed_fraction(100, 25), 0.75);
    assert_eq!(elapsed_fraction(100, 500), 0.0);
}

#[test]
fn compute_block_size_uses_default_curve() {
    assert_eq!(compute_block_size(0.0), 256);
    assert_eq!(compute_block_size(1.0), 8);
}

#[test]
fn new_rejects_bad_parameters() {
    assert!(StageCurve::new(1, 256, 8, 1.4).is_err());
    assert!(StageCurve::new(16, 4, 8, 1.4).is_err());
    assert!(StageCurve::new(16, 256, 0, 1.4).is_err());
    assert!(StageCurve::new(16, 256, 8, f64::INFINITY).is_err());
}

#[test]
fn from_config_shares_stage_count() {
    let cfg = RevealConfig {
        stages: 32,
        ..RevealConfig::default()
    };
    let curve = StageCurve::from_config(&cfg);
    assert_eq!(curve.stage_of(1.0), 31);
    assert_eq!(curve.block_size_of(31), cfg.min_block);
}
