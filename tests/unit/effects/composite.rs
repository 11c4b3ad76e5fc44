use super::*;
use crate::foundation::core::Rgb8;

#[test]
fn over_white_zero_alpha_is_noop() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over_white(dst, 0.0), dst);
}

#[test]
fn over_white_full_alpha_is_white() {
    assert_eq!(over_white([10, 20, 30, 255], 1.0), [255, 255, 255, 255]);
}

#[test]
fn copy_clipped_left_splits_at_boundary() {
    let mut dst = Raster::filled(4, 2, Rgb8::new(0, 0, 255));
    let src = Raster::filled(4, 2, Rgb8::new(255, 0, 0));
    copy_clipped_left(&mut dst, &src, 2.0).unwrap();
    for y in 0..2 {
        assert_eq!(dst.pixel(1, y), Some([255, 0, 0, 255]));
        assert_eq!(dst.pixel(2, y), Some([0, 0, 255, 255]));
    }
}

#[test]
fn copy_clipped_left_includes_partial_column() {
    let mut dst = Raster::filled(4, 1, Rgb8::new(0, 0, 255));
    let src = Raster::filled(4, 1, Rgb8::new(255, 0, 0));
    copy_clipped_left(&mut dst, &src, 0.3).unwrap();
    assert_eq!(dst.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(dst.pixel(1, 0), Some([0, 0, 255, 255]));
}

#[test]
fn copy_clipped_left_zero_and_overshoot() {
    let base = Raster::filled(3, 1, Rgb8::new(1, 1, 1));
    let src = Raster::filled(3, 1, Rgb8::new(9, 9, 9));

    let mut dst = base.clone();
    copy_clipped_left(&mut dst, &src, 0.0).unwrap();
    assert_eq!(dst, base);

    let mut dst = base.clone();
    copy_clipped_left(&mut dst, &src, 1e6).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn copy_clipped_left_rejects_size_mismatch() {
    let mut dst = Raster::new(3, 1);
    let src = Raster::new(2, 1);
    assert!(copy_clipped_left(&mut dst, &src, 1.0).is_err());
}

#[test]
fn white_ramp_rises_toward_end() {
    let mut dst = Raster::filled(10, 1, Rgb8::new(0, 0, 0));
    white_ramp_in_place(&mut dst, 0.0, 10.0, 1.0);
    let first = dst.pixel(0, 0).unwrap()[0];
    let last = dst.pixel(9, 0).unwrap()[0];
    assert!(first < 20);
    assert!(last > 230);
    for x in 1..10 {
        assert!(dst.pixel(x, 0).unwrap()[0] >= dst.pixel(x - 1, 0).unwrap()[0]);
    }
}

#[test]
fn white_ramp_clips_to_raster() {
    let mut dst = Raster::filled(4, 1, Rgb8::new(0, 0, 0));
    white_ramp_in_place(&mut dst, 2.0, 12.0, 0.5);
    assert_eq!(dst.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(1, 0), Some([0, 0, 0, 255]));
    assert!(dst.pixel(3, 0).unwrap()[0] > 0);

    let before = dst.clone();
    white_ramp_in_place(&mut dst, 20.0, 30.0, 0.5);
    white_ramp_in_place(&mut dst, -30.0, -20.0, 0.5);
    assert_eq!(dst, before);
}
