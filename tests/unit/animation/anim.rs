use super::*;

#[derive(Debug, Default)]
struct Recorder {
    angle: f64,
    opacity: f64,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rect: Rect,
    writes: usize,
}

impl AnimationTarget for Recorder {
    fn set_angle(&mut self, degrees: f64) {
        self.angle = degrees;
        self.writes += 1;
    }
    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
        self.writes += 1;
    }
    fn set_x(&mut self, x: f64) {
        self.x = x;
        self.writes += 1;
    }
    fn set_y(&mut self, y: f64) {
        self.y = y;
        self.writes += 1;
    }
    fn set_width(&mut self, width: f64) {
        self.width = width;
        self.writes += 1;
    }
    fn set_height(&mut self, height: f64) {
        self.height = height;
        self.writes += 1;
    }
    fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
        self.writes += 1;
    }
    fn set_size(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
        self.writes += 1;
    }
    fn set_box(&mut self, rect: Rect) {
        self.rect = rect;
        self.writes += 1;
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn number_animation_interpolates_and_stops() {
    let mut rec = Recorder::default();
    let mut anim = NumberAnimation::started(NumberProperty::X, 0.0, 100.0, 1000.0);

    anim.update(0.0, &mut rec);
    assert_eq!(rec.x, 0.0);

    anim.update(500.0, &mut rec);
    assert!(approx(rec.x, 50.0));

    anim.update(1000.0, &mut rec);
    assert_eq!(rec.x, 100.0);
    assert!(!anim.is_playing());
}

#[test]
fn late_frame_clamps_to_exact_end_value() {
    let mut rec = Recorder::default();
    let mut anim = NumberAnimation::started(NumberProperty::Opacity, 0.2, 0.7, 300.0);
    anim.update(10.0, &mut rec);
    anim.update(5000.0, &mut rec);
    assert_eq!(rec.opacity, 0.7);
    assert!(!anim.is_playing());
}

#[test]
fn first_frame_snaps_to_start_value_and_opens_window() {
    let mut rec = Recorder {
        angle: 42.0,
        ..Recorder::default()
    };
    let mut anim = NumberAnimation::started(NumberProperty::Angle, 10.0, 20.0, 100.0);
    anim.update(250.0, &mut rec);
    assert_eq!(rec.angle, 10.0);
    assert_eq!(anim.start_time(), 250.0);
    assert_eq!(anim.end_time(), 350.0);

    anim.update(300.0, &mut rec);
    assert!(approx(rec.angle, 15.0));
}

#[test]
fn update_is_noop_when_not_playing() {
    let mut rec = Recorder::default();
    let mut anim = NumberAnimation::new(NumberProperty::Width, 0.0, 10.0, 100.0);
    anim.update(0.0, &mut rec);
    anim.update(50.0, &mut rec);
    assert_eq!(rec.writes, 0);
    assert!(!anim.is_playing());
}

#[test]
fn looping_animation_rolls_window_forward() {
    let mut rec = Recorder::default();
    let mut anim = NumberAnimation::started(NumberProperty::Y, 0.0, 100.0, 1000.0).with_loop(true);

    anim.update(0.0, &mut rec);
    anim.update(1000.0, &mut rec);
    assert_eq!(rec.y, 100.0);
    assert!(anim.is_playing());
    assert_eq!(anim.start_time(), 1000.0);

    anim.update(1500.0, &mut rec);
    assert!(approx(rec.y, 50.0));

    let mut t = 1500.0;
    for _ in 0..20 {
        t += 1000.0;
        anim.update(t, &mut rec);
        assert!(anim.is_playing());
    }
}

#[test]
fn start_is_noop_while_playing_but_restart_resets() {
    let mut rec = Recorder::default();
    let mut anim = NumberAnimation::started(NumberProperty::X, 0.0, 100.0, 1000.0);
    anim.update(0.0, &mut rec);
    anim.update(400.0, &mut rec);

    anim.start();
    anim.update(500.0, &mut rec);
    assert!(approx(rec.x, 50.0));

    anim.restart();
    anim.update(600.0, &mut rec);
    assert_eq!(rec.x, 0.0);
    assert_eq!(anim.start_time(), 600.0);
}

#[test]
fn stop_then_start_begins_cleanly() {
    let mut rec = Recorder::default();
    let mut anim = NumberAnimation::started(NumberProperty::X, 0.0, 100.0, 1000.0);
    anim.update(0.0, &mut rec);
    anim.update(700.0, &mut rec);
    anim.stop();
    anim.update(800.0, &mut rec);
    assert!(approx(rec.x, 70.0));

    anim.start();
    anim.update(900.0, &mut rec);
    assert_eq!(rec.x, 0.0);
    anim.update(1400.0, &mut rec);
    assert!(approx(rec.x, 50.0));
}

#[test]
fn non_positive_duration_completes_immediately() {
    for duration in [0.0, -25.0, f64::NAN] {
        let mut rec = Recorder::default();
        let mut anim = NumberAnimation::started(NumberProperty::Height, 3.0, 9.0, duration);
        anim.update(100.0, &mut rec);
        assert_eq!(rec.height, 3.0);
        anim.update(100.0, &mut rec);
        assert_eq!(rec.height, 9.0);
        assert!(!anim.is_playing());
    }
}

#[test]
fn end_value_change_is_picked_up_on_restart() {
    let mut rec = Recorder::default();
    let mut anim = NumberAnimation::started(NumberProperty::X, 0.0, 10.0, 100.0);
    anim.update(0.0, &mut rec);
    anim.set_end_value(20.0);
    anim.restart();
    anim.update(0.0, &mut rec);
    anim.update(50.0, &mut rec);
    assert!(approx(rec.x, 10.0));
}

#[test]
fn point_size_and_rect_interpolate_componentwise() {
    let mut rec = Recorder::default();

    let mut pos = PointAnimation::started(
        PointProperty::Position,
        Point::new(0.0, 10.0),
        Point::new(100.0, 30.0),
        100.0,
    );
    pos.update(0.0, &mut rec);
    pos.update(25.0, &mut rec);
    assert!(approx(rec.x, 25.0));
    assert!(approx(rec.y, 15.0));

    let mut size = SizeAnimation::started(
        SizeProperty::Size,
        Size::new(10.0, 10.0),
        Size::new(20.0, 40.0),
        100.0,
    );
    size.update(0.0, &mut rec);
    size.update(50.0, &mut rec);
    assert!(approx(rec.width, 15.0));
    assert!(approx(rec.height, 25.0));

    let mut rect = RectAnimation::started(
        RectProperty::Box,
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Rect::new(10.0, 20.0, 30.0, 50.0),
        200.0,
    );
    rect.update(0.0, &mut rec);
    rect.update(100.0, &mut rec);
    assert!(approx(rec.rect.x0, 5.0));
    assert!(approx(rec.rect.y0, 10.0));
    assert!(approx(rec.rect.x1, 20.0));
    assert!(approx(rec.rect.y1, 30.0));
}

#[test]
fn easing_shapes_progress() {
    let mut rec = Recorder::default();
    let mut anim =
        NumberAnimation::started(NumberProperty::X, 0.0, 100.0, 100.0).with_ease(Ease::InQuad);
    anim.update(0.0, &mut rec);
    anim.update(50.0, &mut rec);
    assert!(approx(rec.x, 25.0));
}

#[test]
fn exactly_one_write_per_active_update() {
    let mut rec = Recorder::default();
    let mut anim = NumberAnimation::started(NumberProperty::X, 0.0, 1.0, 30.0);
    for t in [0.0, 10.0, 20.0, 30.0, 40.0] {
        anim.update(t, &mut rec);
    }
    assert_eq!(rec.writes, 4);
}
