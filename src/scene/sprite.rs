use std::{any::Any, fmt};

use crate::{
    animation::{
        anim::{Animate, AnimationTarget},
        set::AnimationSet,
    },
    foundation::{
        core::{Point, Rect, Size, Vec2, contains_open, normalize_rect},
        error::MarqueeResult,
        ids::{AnimationId, NodeId},
    },
    render::surface::{Surface, SurfaceGuard},
    scene::{
        event::{Event, KeyboardEvent, MouseEvent, NoticeEvent, TouchEvent},
        node::ObjectNode,
    },
};

/// Geometry and appearance of a sprite.
///
/// `position` is the pivot: `rect.origin() + base_point`. Rotation (degrees,
/// clockwise in canvas space) happens about the same pivot.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SpriteState {
    rect: Rect,
    angle: f64,
    opacity: f64,
    base_point: Vec2,
    visible: bool,
}

impl Default for SpriteState {
    fn default() -> Self {
        Self {
            rect: Rect::ZERO,
            angle: 0.0,
            opacity: 1.0,
            base_point: Vec2::ZERO,
            visible: true,
        }
    }
}

impl SpriteState {
    /// Current box (origin and size).
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = normalize_rect(rect);
    }

    pub fn position(&self) -> Point {
        self.rect.origin() + self.base_point
    }

    pub fn x(&self) -> f64 {
        self.position().x
    }

    pub fn y(&self) -> f64 {
        self.position().y
    }

    pub fn size(&self) -> Size {
        self.rect.size()
    }

    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn base_point(&self) -> Vec2 {
        self.base_point
    }

    /// Change the pivot while keeping the box in place.
    pub fn set_base_point(&mut self, base_point: Vec2) {
        self.base_point = base_point;
    }

    /// Put the pivot at the center of the current box.
    pub fn center_base_point(&mut self) {
        self.base_point = Vec2::new(self.rect.width() / 2.0, self.rect.height() / 2.0);
    }

    /// Rotation pivot in canvas space.
    pub fn pivot(&self) -> Point {
        self.position()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl AnimationTarget for SpriteState {
    fn set_angle(&mut self, degrees: f64) {
        self.angle = degrees;
    }

    /// Clamped to `[0, 1]`; NaN is ignored.
    fn set_opacity(&mut self, opacity: f64) {
        if opacity.is_nan() {
            return;
        }
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn set_x(&mut self, x: f64) {
        let origin_x = x - self.base_point.x;
        self.rect = self.rect.with_origin(Point::new(origin_x, self.rect.y0));
    }

    fn set_y(&mut self, y: f64) {
        let origin_y = y - self.base_point.y;
        self.rect = self.rect.with_origin(Point::new(self.rect.x0, origin_y));
    }

    fn set_width(&mut self, width: f64) {
        self.rect = self.rect.with_size(Size::new(width, self.rect.height()));
    }

    fn set_height(&mut self, height: f64) {
        self.rect = self.rect.with_size(Size::new(self.rect.width(), height));
    }

    fn set_position(&mut self, position: Point) {
        self.rect = self.rect.with_origin(position - self.base_point);
    }

    fn set_size(&mut self, size: Size) {
        self.rect = self.rect.with_size(size);
    }

    fn set_box(&mut self, rect: Rect) {
        self.set_rect(rect);
    }
}

/// Per-kind behavior of a sprite: drawing, hit-testing, and event hooks.
///
/// All hooks have defaults, so a plain `impl Visual for MyNode {}` gives an
/// invisible-to-draw, rectangle-picked node.
#[allow(unused_variables)]
pub trait Visual: fmt::Debug + 'static {
    /// Draw in canvas space; rotation and opacity are already applied.
    fn draw(&self, state: &SpriteState, surface: &mut dyn Surface) -> MarqueeResult<()> {
        Ok(())
    }

    /// Whether `point` hits this sprite. Defaults to an open test on the box.
    fn pick_test(&self, state: &SpriteState, point: Point) -> bool {
        contains_open(state.rect(), point)
    }

    /// Runs before the sprite's animations on every update.
    fn on_update(&mut self, state: &mut SpriteState, timestamp: f64) {}

    fn on_mouse(&mut self, state: &mut SpriteState, ev: &mut MouseEvent) {}

    fn on_touch(&mut self, state: &mut SpriteState, ev: &mut TouchEvent) {}

    fn on_keyboard(&mut self, state: &mut SpriteState, ev: &mut KeyboardEvent) {}

    fn on_notice(&mut self, state: &mut SpriteState, ev: &mut NoticeEvent) {}
}

/// Visual with no drawing and default picking.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blank;

impl Visual for Blank {}

/// Base visual node: state, active animations, and a [`Visual`].
#[derive(Debug)]
pub struct Sprite<V: Visual = Blank> {
    id: NodeId,
    state: SpriteState,
    animations: AnimationSet,
    visual: V,
}

impl<V: Visual> Sprite<V> {
    pub fn new(visual: V) -> Self {
        Self::with_id(NodeId::generate(), visual)
    }

    pub fn with_id(id: impl Into<NodeId>, visual: V) -> Self {
        Self {
            id: id.into(),
            state: SpriteState::default(),
            animations: AnimationSet::new(),
            visual,
        }
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.state.set_rect(rect);
        self
    }

    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.state.set_angle(degrees);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.state.set_opacity(opacity);
        self
    }

    pub fn with_base_point(mut self, base_point: Vec2) -> Self {
        self.state.set_base_point(base_point);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.state.set_visible(visible);
        self
    }

    pub fn state(&self) -> &SpriteState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SpriteState {
        &mut self.state
    }

    pub fn visual(&self) -> &V {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut V {
        &mut self.visual
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.state.set_visible(visible);
    }

    pub fn add_animation(&mut self, animation: impl Animate + 'static) -> AnimationId {
        self.animations.insert(Box::new(animation))
    }

    pub fn add_boxed_animation(&mut self, animation: Box<dyn Animate>) -> AnimationId {
        self.animations.insert(animation)
    }

    pub fn remove_animation(&mut self, id: AnimationId) -> Option<Box<dyn Animate>> {
        self.animations.remove(id)
    }

    pub fn clear_animations(&mut self) {
        self.animations.clear();
    }

    pub fn animation(&self, id: AnimationId) -> Option<&dyn Animate> {
        self.animations.get(id)
    }

    pub fn animation_mut(&mut self, id: AnimationId) -> Option<&mut (dyn Animate + 'static)> {
        self.animations.get_mut(id)
    }

    pub fn animations(&self) -> &AnimationSet {
        &self.animations
    }

    pub fn pick_test(&self, point: Point) -> bool {
        self.visual.pick_test(&self.state, point)
    }
}

impl<V: Visual> ObjectNode for Sprite<V> {
    fn id(&self) -> &NodeId {
        &self.id
    }

    fn is_visible(&self) -> bool {
        self.state.visible
    }

    fn dispatch_mouse(&mut self, ev: &mut MouseEvent, forced: bool) {
        if !self.state.visible {
            return;
        }
        if forced || self.visual.pick_test(&self.state, ev.position()) {
            ev.header_mut().claim(&self.id);
            self.visual.on_mouse(&mut self.state, ev);
        }
    }

    fn dispatch_touch(&mut self, ev: &mut TouchEvent, forced: bool) {
        if !self.state.visible {
            return;
        }
        let hit = forced
            || ev
                .position()
                .is_some_and(|p| self.visual.pick_test(&self.state, p));
        if hit {
            ev.header_mut().claim(&self.id);
            self.visual.on_touch(&mut self.state, ev);
        }
    }

    fn dispatch_keyboard(&mut self, ev: &mut KeyboardEvent) {
        if !self.state.visible {
            return;
        }
        self.visual.on_keyboard(&mut self.state, ev);
    }

    fn dispatch_notice(&mut self, ev: &mut NoticeEvent) {
        self.visual.on_notice(&mut self.state, ev);
    }

    fn update(&mut self, timestamp: f64) {
        self.visual.on_update(&mut self.state, timestamp);
        self.animations.update_all(timestamp, &mut self.state);
    }

    fn render(&self, surface: &mut dyn Surface) -> MarqueeResult<()> {
        if !self.state.visible {
            return Ok(());
        }
        if self.state.angle == 0.0 && self.state.opacity >= 1.0 {
            return self.visual.draw(&self.state, surface);
        }

        let mut surface = SurfaceGuard::new(surface);
        if self.state.opacity < 1.0 {
            surface.set_global_alpha(self.state.opacity);
        }
        if self.state.angle != 0.0 {
            let pivot = self.state.pivot().to_vec2();
            surface.translate(pivot);
            surface.rotate(self.state.angle.to_radians());
            surface.translate(-pivot);
        }
        self.visual.draw(&self.state, &mut *surface)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/sprite.rs"]
mod tests;
