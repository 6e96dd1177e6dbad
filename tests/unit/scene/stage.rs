use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{
    foundation::core::{Point, Rect},
    render::recording::RecordingSurface,
    scene::{
        event::{KeyEventKind, MouseEventKind},
        sprite::{Sprite, SpriteState, Visual},
    },
};

type Log = Rc<RefCell<Vec<String>>>;

#[derive(Debug)]
struct Tracer {
    log: Log,
}

impl Visual for Tracer {
    fn draw(&self, state: &SpriteState, _surface: &mut dyn Surface) -> MarqueeResult<()> {
        self.log.borrow_mut().push(format!("draw {}", state.x()));
        Ok(())
    }

    fn on_mouse(&mut self, _state: &mut SpriteState, ev: &mut MouseEvent) {
        self.log.borrow_mut().push(format!("mouse {:?}", ev.kind()));
    }

    fn on_keyboard(&mut self, _state: &mut SpriteState, ev: &mut KeyboardEvent) {
        self.log.borrow_mut().push(format!("key {}", ev.key()));
    }
}

fn traced(id: &str, x: f64, log: &Log) -> Sprite<Tracer> {
    Sprite::with_id(id, Tracer { log: log.clone() })
        .with_rect(Rect::new(x, 0.0, x + 10.0, 10.0))
}

fn ids(stage: &Stage) -> Vec<String> {
    stage.layers().map(|l| l.id().as_str().to_string()).collect()
}

#[test]
fn add_layer_prepends() {
    let mut stage = Stage::new();
    stage.add_layer(Layer::with_id("back"));
    stage.add_layer(Layer::with_id("middle"));
    let front = stage.add_layer(Layer::with_id("front"));
    assert_eq!(front, NodeId::new("front"));
    assert_eq!(ids(&stage), ["front", "middle", "back"]);
}

#[test]
fn move_to_top_and_bottom_reorder() {
    let mut stage = Stage::new();
    for id in ["c", "b", "a"] {
        stage.add_layer(Layer::with_id(id));
    }
    stage.move_to_top(&NodeId::new("c")).unwrap();
    assert_eq!(ids(&stage), ["c", "a", "b"]);
    stage.move_to_bottom(&NodeId::new("a")).unwrap();
    assert_eq!(ids(&stage), ["c", "b", "a"]);

    let err = stage.move_to_top(&NodeId::new("zzz")).unwrap_err();
    assert!(matches!(err, MarqueeError::Scene(_)));
    assert_eq!(stage.len(), 3);
}

#[test]
fn front_layer_wins_overlapping_hits() {
    let log = Log::default();
    let mut stage = Stage::new();
    stage.add_layer(Layer::with_id("back").with_node(traced("under", 0.0, &log)));
    stage.add_layer(Layer::with_id("front").with_node(traced("over", 0.0, &log)));

    let mut ev = MouseEvent::new(MouseEventKind::Down, Point::new(5.0, 5.0));
    stage.dispatch_mouse(&mut ev);
    assert_eq!(ev.target(), Some(&NodeId::new("over")));
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn opaque_front_layer_shields_layers_behind() {
    let log = Log::default();
    let mut stage = Stage::new();
    stage.add_layer(Layer::with_id("back").with_node(traced("under", 0.0, &log)));
    stage.add_layer(Layer::with_id("modal").with_event_transparent(false));

    let mut ev = MouseEvent::new(MouseEventKind::Down, Point::new(5.0, 5.0));
    stage.dispatch_mouse(&mut ev);
    assert_eq!(ev.target(), Some(&NodeId::new("modal")));
    assert!(log.borrow().is_empty());
}

#[test]
fn render_paints_back_layer_first() {
    let log = Log::default();
    let mut stage = Stage::new();
    stage.add_layer(Layer::new().with_node(traced("back", 1.0, &log)));
    stage.add_layer(Layer::new().with_node(traced("front", 2.0, &log)));

    let mut surface = RecordingSurface::new();
    stage.render(&mut surface).unwrap();
    assert_eq!(
        log.borrow().as_slice(),
        &["draw 1".to_string(), "draw 2".to_string()]
    );
}

#[test]
fn deliver_mouse_forces_known_target() {
    let log = Log::default();
    let mut stage = Stage::new();
    stage.add_layer(Layer::with_id("l").with_node(traced("s", 0.0, &log)));

    let mut leave = MouseEvent::new(MouseEventKind::Leave, Point::new(500.0, 500.0));
    assert!(stage.deliver_mouse(&NodeId::new("s"), &mut leave));
    assert_eq!(leave.target(), Some(&NodeId::new("s")));
    assert_eq!(log.borrow().as_slice(), &["mouse Leave".to_string()]);

    let mut lost = MouseEvent::new(MouseEventKind::Leave, Point::ZERO);
    assert!(!stage.deliver_mouse(&NodeId::new("gone"), &mut lost));
    assert!(lost.target().is_none());
}

#[test]
fn keyboard_visits_every_visible_node_until_claimed() {
    let log = Log::default();
    let mut stage = Stage::new();
    stage.add_layer(
        Layer::new()
            .with_node(traced("a", 0.0, &log))
            .with_node(traced("b", 50.0, &log)),
    );
    stage.add_layer(Layer::with_id("hidden").with_visible(false).with_node(traced("h", 0.0, &log)));

    let mut key = KeyboardEvent::new(KeyEventKind::Down, "k", "KeyK");
    stage.dispatch_keyboard(&mut key);
    assert_eq!(log.borrow().as_slice(), &["key k".to_string(), "key k".to_string()]);
    assert!(key.target().is_none());
}

#[test]
fn find_node_searches_layers_and_children() {
    let log = Log::default();
    let mut stage = Stage::new();
    stage.add_layer(Layer::with_id("l").with_node(traced("s", 0.0, &log)));

    assert!(stage.find_node(&NodeId::new("l")).is_some());
    assert!(stage.find_node(&NodeId::new("s")).is_some());
    let sprite = stage
        .find_node_mut(&NodeId::new("s"))
        .and_then(|n| n.downcast_mut::<Sprite<Tracer>>())
        .unwrap();
    sprite.state_mut().set_visible(false);
    assert!(!stage.find_node(&NodeId::new("s")).unwrap().is_visible());

    assert!(stage.remove_layer(&NodeId::new("l")).is_some());
    assert!(stage.find_node(&NodeId::new("s")).is_none());
    assert!(stage.is_empty());
}

#[test]
fn update_reaches_every_layer() {
    let mut stage = Stage::new();
    let mut sprite = Sprite::with_id("s", crate::scene::sprite::Blank);
    sprite.add_animation(crate::animation::anim::NumberAnimation::started(
        crate::animation::anim::NumberProperty::Angle,
        0.0,
        90.0,
        100.0,
    ));
    stage.add_layer(Layer::new().with_node(sprite));
    stage.update(0.0);
    stage.update(50.0);

    let layer = stage.layers().next().unwrap();
    let sprite = layer.get_as::<Sprite>(&NodeId::new("s")).unwrap();
    assert!((sprite.state().angle() - 45.0).abs() < 1e-9);
}
