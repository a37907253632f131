use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap().is_empty());
}

#[test]
fn fps_rejects_zero_and_converts() {
    assert!(Fps::new(0).is_err());
    let fps = Fps::new(30).unwrap();
    assert_eq!(fps.frames_to_secs(150), 5.0);
}

#[test]
fn transform_to_affine_identity_and_translation() {
    let t = Transform2D::default();
    assert!(t.is_identity());
    assert_eq!(t.to_affine(), Affine::IDENTITY);

    let t = Transform2D::translate(10.0, -2.5);
    assert_eq!(t.to_affine(), Affine::translate(Vec2::new(10.0, -2.5)));
}

#[test]
fn scale_pivots_around_anchor() {
    let t = Transform2D::default().with_scale(2.0).with_anchor(10.0, 10.0);
    let p = t.to_affine() * Point::new(10.0, 10.0);
    assert!((p.x - 10.0).abs() < 1e-9);
    assert!((p.y - 10.0).abs() < 1e-9);

    let q = t.to_affine() * Point::new(20.0, 10.0);
    assert!((q.x - 30.0).abs() < 1e-9);
}
