use super::*;
use crate::{
    foundation::error::MarqueeError,
    render::recording::{DrawCall, RecordingSurface},
};

fn draw_rotated(surface: &mut dyn Surface) -> MarqueeResult<()> {
    let mut guard = SurfaceGuard::new(surface);
    guard.rotate(1.0);
    guard.fill_path(&BezPath::new(), Rgba::WHITE)?;
    guard.translate(Vec2::new(5.0, 5.0));
    Ok(())
}

#[test]
fn guard_pairs_save_and_restore() {
    let mut s = RecordingSurface::new();
    draw_rotated(&mut s).unwrap();
    assert_eq!(s.calls().first(), Some(&DrawCall::Save));
    assert_eq!(s.calls().last(), Some(&DrawCall::Restore));
    assert_eq!(s.depth(), 0);
}

#[test]
fn guard_restores_when_drawing_fails() {
    let mut s = RecordingSurface::failing();
    let err = draw_rotated(&mut s).unwrap_err();
    assert!(matches!(err, MarqueeError::Render(_)));
    assert_eq!(
        s.calls(),
        &[
            DrawCall::Save,
            DrawCall::Rotate { radians: 1.0 },
            DrawCall::Restore
        ]
    );
    assert_eq!(s.depth(), 0);
}

#[test]
fn nested_guards_unwind_in_order() {
    let mut s = RecordingSurface::new();
    {
        let mut outer = SurfaceGuard::new(&mut s);
        let inner = SurfaceGuard::new(&mut *outer);
        drop(inner);
        outer.set_global_alpha(0.5);
    }
    assert_eq!(
        s.calls(),
        &[
            DrawCall::Save,
            DrawCall::Save,
            DrawCall::Restore,
            DrawCall::GlobalAlpha { alpha: 0.5 },
            DrawCall::Restore,
        ]
    );
}
