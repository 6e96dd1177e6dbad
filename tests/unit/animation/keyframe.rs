use super::*;
use crate::{
    animation::anim::{NumberAnimation, NumberProperty},
    foundation::core::{Point, Rect, Size},
};

#[derive(Debug, Default)]
struct XTarget {
    x: f64,
    writes: usize,
}

impl AnimationTarget for XTarget {
    fn set_angle(&mut self, _degrees: f64) {}
    fn set_opacity(&mut self, _opacity: f64) {}
    fn set_x(&mut self, x: f64) {
        self.x = x;
        self.writes += 1;
    }
    fn set_y(&mut self, _y: f64) {}
    fn set_width(&mut self, _width: f64) {}
    fn set_height(&mut self, _height: f64) {}
    fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.writes += 1;
    }
    fn set_size(&mut self, _size: Size) {}
    fn set_box(&mut self, rect: Rect) {
        self.x = rect.x0;
        self.writes += 1;
    }
}

fn two_frames(duration: f64) -> KeyframeAnimation {
    KeyframeAnimation::new()
        .with_frame(NumberAnimation::new(NumberProperty::X, 0.0, 10.0, duration))
        .with_frame(NumberAnimation::new(NumberProperty::X, 10.0, 30.0, duration))
}

#[test]
fn added_frames_never_loop() {
    let kf = KeyframeAnimation::new()
        .with_frame(NumberAnimation::new(NumberProperty::X, 0.0, 1.0, 10.0).with_loop(true));
    assert_eq!(kf.len(), 1);
    assert!(!kf.frame(0).unwrap().is_looping());
}

#[test]
fn two_frame_sequence_hits_each_end_value_on_schedule() {
    let mut target = XTarget::default();
    let mut kf = two_frames(100.0);
    kf.start();

    kf.update(0.0, &mut target);
    assert_eq!(target.x, 0.0);
    kf.update(50.0, &mut target);
    assert!((target.x - 5.0).abs() < 1e-9);
    kf.update(100.0, &mut target);
    assert_eq!(target.x, 10.0);
    assert_eq!(kf.current_frame(), 1);

    kf.update(150.0, &mut target);
    assert!((target.x - 20.0).abs() < 1e-9);
    kf.update(200.0, &mut target);
    assert_eq!(target.x, 30.0);
    assert!(!kf.is_playing());
    assert_eq!(kf.current_frame(), 0);

    kf.update(250.0, &mut target);
    assert_eq!(target.x, 30.0);
}

#[test]
fn finished_frame_holds_its_end_value_when_next_frame_jumps() {
    let mut target = XTarget::default();
    let mut kf = KeyframeAnimation::new()
        .with_frame(NumberAnimation::new(NumberProperty::X, 0.0, 10.0, 100.0))
        .with_frame(NumberAnimation::new(NumberProperty::X, 50.0, 80.0, 100.0));
    kf.start();

    kf.update(0.0, &mut target);
    kf.update(50.0, &mut target);
    let before = target.writes;
    kf.update(100.0, &mut target);
    assert_eq!(target.x, 10.0);
    assert_eq!(target.writes - before, 1);
    assert_eq!(kf.current_frame(), 1);

    kf.update(150.0, &mut target);
    assert!((target.x - 65.0).abs() < 1e-9);
    kf.update(200.0, &mut target);
    assert_eq!(target.x, 80.0);
    assert!(!kf.is_playing());
}

#[test]
fn every_update_writes_at_most_once() {
    let mut target = XTarget::default();
    let mut kf = two_frames(100.0).with_loop(true);
    kf.start();
    for (i, t) in [0.0, 60.0, 100.0, 160.0, 200.0, 230.0].into_iter().enumerate() {
        kf.update(t, &mut target);
        assert_eq!(target.writes, i + 1);
    }
}

#[test]
fn looping_sequence_wraps_and_keeps_playing() {
    let mut target = XTarget::default();
    let mut kf = two_frames(100.0).with_loop(true);
    kf.start();

    for t in [0.0, 100.0, 200.0] {
        kf.update(t, &mut target);
    }
    assert!(kf.is_playing());
    assert_eq!(kf.current_frame(), 0);
    assert_eq!(target.x, 30.0);

    kf.update(250.0, &mut target);
    assert!((target.x - 5.0).abs() < 1e-9);
    assert!(!kf.frame(0).unwrap().is_looping());
}

#[test]
fn frame_loop_flag_is_reforced_during_update() {
    let mut target = XTarget::default();
    let mut kf = two_frames(100.0);
    kf.frames[0].set_looping(true);
    kf.start();
    kf.update(0.0, &mut target);
    assert!(!kf.frame(0).unwrap().is_looping());
    kf.update(100.0, &mut target);
    assert_eq!(kf.current_frame(), 1);
}

#[test]
fn empty_sequence_stops_instead_of_panicking() {
    let mut target = XTarget::default();
    let mut kf = KeyframeAnimation::new();
    kf.start();
    assert!(kf.is_playing());
    kf.update(0.0, &mut target);
    assert!(!kf.is_playing());
}

#[test]
fn stop_resets_cursor_and_frames() {
    let mut target = XTarget::default();
    let mut kf = two_frames(100.0);
    kf.start();
    kf.update(0.0, &mut target);
    kf.update(100.0, &mut target);
    assert_eq!(kf.current_frame(), 1);

    kf.stop();
    assert_eq!(kf.current_frame(), 0);
    assert!(!kf.frame(1).unwrap().is_playing());

    kf.update(120.0, &mut target);
    assert_eq!(target.x, 10.0);

    kf.start();
    kf.update(300.0, &mut target);
    assert_eq!(target.x, 0.0);
}

#[test]
fn not_playing_is_noop() {
    let mut target = XTarget {
        x: 7.0,
        ..XTarget::default()
    };
    let mut kf = two_frames(100.0);
    kf.update(0.0, &mut target);
    assert_eq!(target.x, 7.0);
}
