//! Marquee is a retained-mode 2D scene-graph engine.
//!
//! A [`Stage`] holds ordered [`Layer`]s of nodes. Nodes are usually
//! [`Sprite`]s: a box with angle, opacity and a pivot, a [`Visual`] that draws
//! and hit-tests it, and a set of time-based property animations. The
//! [`Engine`] owns the stage and drives it:
//!
//! - load resources through a [`ResourceLoader`]
//! - tick update and render at a fixed frame rate on host frame callbacks
//! - translate raw device input into hit-tested events
//! - fan lifecycle, input and notice signals out to subscribers
//!
//! Drawing goes through the [`Surface`] trait. [`RecordingSurface`] is a
//! headless implementation that records every call.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod engine;
pub(crate) mod render;
pub(crate) mod scene;

pub use crate::foundation::core::{
    Affine, BezPath, Line, Point, Rect, Rgba, Size, Vec2, contains_open, distance_to_segment,
    normalize_rect,
};
pub use crate::foundation::error::{MarqueeError, MarqueeResult};
pub use crate::foundation::ids::{AnimationId, NodeId};

pub use crate::animation::anim::{
    Animatable, Animate, Animation, AnimationTarget, NumberAnimation, NumberProperty,
    PointAnimation, PointProperty, RectAnimation, RectProperty, SizeAnimation, SizeProperty,
};
pub use crate::animation::ease::Ease;
pub use crate::animation::keyframe::KeyframeAnimation;
pub use crate::animation::set::AnimationSet;

pub use crate::render::recording::{DrawCall, RecordingSurface};
pub use crate::render::surface::{Surface, SurfaceGuard};
pub use crate::render::texture::{ImageTexture, Texture};

pub use crate::scene::description::{
    AnimationDescription, LayerDescription, NodeDescription, SceneDescription, ShapeDescription,
    Tween,
};
pub use crate::scene::event::{
    CaptureContext, Cursor, Event, EventHeader, KeyEventKind, KeyboardEvent, Modifiers,
    MouseButton, MouseEvent, MouseEventKind, NoticeEvent, TouchEvent, TouchEventKind, TouchPoint,
};
pub use crate::scene::layer::Layer;
pub use crate::scene::node::ObjectNode;
pub use crate::scene::picture::{Picture, PictureSprite};
pub use crate::scene::shape::{Paint, Polygon, Shape, ShapeKind, ShapeSprite};
pub use crate::scene::sprite::{Blank, Sprite, SpriteState, Visual};
pub use crate::scene::stage::Stage;

pub use crate::engine::config::EngineConfig;
pub use crate::engine::host::{HeadlessHost, Host};
pub use crate::engine::input::{InputEvent, KeyInput, RawInput};
pub use crate::engine::resource::{
    LoadPoll, ManifestEntry, ManifestLoader, MediaRef, Resource, ResourceDatabase, ResourceLoader,
};
pub use crate::engine::runtime::Engine;
pub use crate::engine::signal::{Signal, SignalHub, SubscriptionId, names as signal_names};
pub use crate::engine::state::EngineState;
