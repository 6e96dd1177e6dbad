use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{
    foundation::core::{Point, Rect, Rgba},
    render::recording::RecordingSurface,
    scene::{
        event::{KeyEventKind, MouseEventKind},
        shape::Shape,
        sprite::{Sprite, SpriteState, Visual},
    },
};

type Log = Rc<RefCell<Vec<String>>>;

#[derive(Debug)]
struct Logger {
    name: &'static str,
    log: Log,
}

impl Visual for Logger {
    fn draw(&self, _state: &SpriteState, _surface: &mut dyn Surface) -> MarqueeResult<()> {
        self.log.borrow_mut().push(format!("draw {}", self.name));
        Ok(())
    }

    fn on_update(&mut self, _state: &mut SpriteState, _timestamp: f64) {
        self.log.borrow_mut().push(format!("update {}", self.name));
    }

    fn on_mouse(&mut self, _state: &mut SpriteState, _ev: &mut MouseEvent) {
        self.log.borrow_mut().push(format!("mouse {}", self.name));
    }
}

fn logger(name: &'static str, rect: Rect, log: &Log) -> Sprite<Logger> {
    Sprite::with_id(
        name,
        Logger {
            name,
            log: log.clone(),
        },
    )
    .with_rect(rect)
}

fn abc(log: &Log) -> Layer {
    Layer::with_id("layer")
        .with_node(logger("a", Rect::new(0.0, 0.0, 10.0, 10.0), log))
        .with_node(logger("b", Rect::new(20.0, 0.0, 30.0, 10.0), log))
        .with_node(logger("c", Rect::new(15.0, 0.0, 35.0, 10.0), log))
}

fn down(x: f64, y: f64) -> MouseEvent {
    MouseEvent::new(MouseEventKind::Down, Point::new(x, y))
}

#[test]
fn second_node_claims_and_third_is_never_visited() {
    let log = Log::default();
    let mut layer = abc(&log);
    let mut ev = down(25.0, 5.0);
    layer.dispatch_mouse(&mut ev, false);

    assert_eq!(ev.target(), Some(&NodeId::new("b")));
    assert_eq!(log.borrow().as_slice(), &["mouse b".to_string()]);
}

#[test]
fn render_walks_nodes_in_reverse() {
    let log = Log::default();
    let layer = abc(&log);
    let mut surface = RecordingSurface::new();
    layer.render(&mut surface).unwrap();
    assert_eq!(
        log.borrow().as_slice(),
        &["draw c".to_string(), "draw b".to_string(), "draw a".to_string()]
    );
}

#[test]
fn update_walks_nodes_in_order_and_respects_hidden_flag() {
    let log = Log::default();
    let mut layer = abc(&log);
    layer.update(0.0);
    assert_eq!(
        log.borrow().as_slice(),
        &[
            "update a".to_string(),
            "update b".to_string(),
            "update c".to_string()
        ]
    );

    log.borrow_mut().clear();
    layer.set_visible(false);
    layer.update(1.0);
    assert!(log.borrow().is_empty());

    layer.set_update_for_hide(true);
    layer.update(2.0);
    assert_eq!(log.borrow().len(), 3);

    let mut surface = RecordingSurface::new();
    log.borrow_mut().clear();
    layer.render(&mut surface).unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
fn miss_on_transparent_layer_leaves_event_unclaimed() {
    let log = Log::default();
    let mut layer = abc(&log);
    let mut ev = down(100.0, 100.0);
    layer.dispatch_mouse(&mut ev, false);
    assert!(ev.target().is_none());
    assert!(!ev.is_propagation_stopped());
}

#[test]
fn opaque_layer_claims_after_children_miss() {
    let log = Log::default();
    let mut layer = abc(&log).with_event_transparent(false);

    let mut miss = down(100.0, 100.0);
    layer.dispatch_mouse(&mut miss, false);
    assert_eq!(miss.target(), Some(&NodeId::new("layer")));
    assert!(miss.is_propagation_stopped());

    let mut hit = down(5.0, 5.0);
    layer.dispatch_mouse(&mut hit, false);
    assert_eq!(hit.target(), Some(&NodeId::new("a")));

    let mut key = KeyboardEvent::new(KeyEventKind::Down, "Enter", "Enter");
    layer.dispatch_keyboard(&mut key);
    assert_eq!(key.target(), Some(&NodeId::new("layer")));

    let mut notice = NoticeEvent::new("tick", serde_json::Value::Null);
    layer.dispatch_notice(&mut notice);
    assert!(notice.target().is_none());
}

#[test]
fn hidden_layer_ignores_pointer_events() {
    let log = Log::default();
    let mut layer = abc(&log).with_visible(false).with_event_transparent(false);
    let mut ev = down(5.0, 5.0);
    layer.dispatch_mouse(&mut ev, true);
    assert!(ev.target().is_none());
    assert!(log.borrow().is_empty());
}

#[test]
fn forced_delivery_to_layer_claims_layer() {
    let log = Log::default();
    let mut layer = abc(&log);
    let mut ev = MouseEvent::new(MouseEventKind::Leave, Point::new(5.0, 5.0));
    layer.dispatch_mouse(&mut ev, true);
    assert_eq!(ev.target(), Some(&NodeId::new("layer")));
    assert!(log.borrow().is_empty());
}

#[test]
fn remove_drops_every_duplicate() {
    let log = Log::default();
    let mut layer = Layer::new()
        .with_node(logger("dup", Rect::ZERO, &log))
        .with_node(logger("keep", Rect::ZERO, &log))
        .with_node(logger("dup", Rect::ZERO, &log));
    assert_eq!(layer.remove(&NodeId::new("dup")), 2);
    assert_eq!(layer.len(), 1);
    assert_eq!(layer.remove(&NodeId::new("missing")), 0);

    layer.remove_all();
    assert!(layer.is_empty());
}

#[test]
fn lookup_by_id_and_type() {
    let log = Log::default();
    let mut layer = abc(&log);
    assert!(layer.get(&NodeId::new("b")).is_some());
    assert!(layer.get_as::<Sprite<Logger>>(&NodeId::new("c")).is_some());
    assert!(layer.get_as::<Sprite>(&NodeId::new("c")).is_none());

    layer
        .get_as_mut::<Sprite<Logger>>(&NodeId::new("a"))
        .unwrap()
        .set_visible(false);
    assert!(!layer.get(&NodeId::new("a")).unwrap().is_visible());

    let ids: Vec<_> = layer.nodes().map(|n| n.id().as_str().to_string()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn find_descends_into_nested_layers() {
    let log = Log::default();
    let inner = Layer::with_id("inner").with_node(logger("deep", Rect::ZERO, &log));
    let mut outer = Layer::with_id("outer").with_node(inner);

    assert!(outer.get(&NodeId::new("deep")).is_none());
    assert_eq!(
        outer.find(&NodeId::new("deep")).map(|n| n.id().as_str()),
        Some("deep")
    );
    assert!(outer.find_mut(&NodeId::new("inner")).is_some());
    assert!(outer.find(&NodeId::new("nope")).is_none());
}

#[test]
fn render_error_propagates() {
    let layer = Layer::new().with_node(
        Sprite::with_id("s", Shape::rect().with_fill(Rgba::BLACK))
            .with_rect(Rect::new(0.0, 0.0, 1.0, 1.0)),
    );
    let mut surface = RecordingSurface::failing();
    assert!(layer.render(&mut surface).is_err());
}
