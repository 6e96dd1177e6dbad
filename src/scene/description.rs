use std::{collections::BTreeSet, rc::Rc};

use crate::{
    animation::{
        anim::{
            Animatable, Animate, Animation, NumberProperty, PointProperty, RectProperty,
            SizeProperty,
        },
        ease::Ease,
        keyframe::KeyframeAnimation,
    },
    foundation::{
        core::{Point, Rect, Size, Vec2},
        error::{MarqueeError, MarqueeResult},
        ids::NodeId,
    },
    render::texture::{ImageTexture, Texture},
    scene::{
        layer::Layer,
        node::ObjectNode,
        picture::Picture,
        shape::{Paint, Shape},
        sprite::{Blank, Sprite, Visual},
        stage::Stage,
    },
};

/// Serializable description of a whole stage.
///
/// Layers are listed front to back, matching [`Stage::layers`].
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub layers: Vec<LayerDescription>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LayerDescription {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "yes")]
    pub visible: bool,
    #[serde(default = "yes")]
    pub event_transparent: bool,
    #[serde(default)]
    pub update_for_hide: bool,
    /// Nodes in dispatch order.
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct NodeDescription {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub shape: ShapeDescription,
    #[serde(default = "zero_rect")]
    pub bounds: Rect,
    /// Degrees.
    #[serde(default)]
    pub angle: f64,
    #[serde(default = "one")]
    pub opacity: f64,
    #[serde(default)]
    pub base_point: Option<Vec2>,
    /// Pivot at the box center; overrides `base_point`.
    #[serde(default)]
    pub center_base_point: bool,
    #[serde(default = "yes")]
    pub visible: bool,
    #[serde(default)]
    pub paint: Paint,
    #[serde(default)]
    pub animations: Vec<AnimationDescription>,
}

/// What a node draws.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeDescription {
    /// Invisible hit area.
    #[default]
    Blank,
    Rect,
    Circle,
    Line {
        #[serde(default = "one")]
        tolerance: f64,
    },
    Polygon {
        points: Vec<Point>,
    },
    /// Image registered with the drawing surface under `image`, optionally
    /// clipped to `region` (in image pixels, sized like `bounds` otherwise).
    Image {
        image: String,
        #[serde(default)]
        region: Option<Rect>,
    },
}

/// Property tween shared by every value type.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Tween<V, P> {
    pub property: P,
    pub from: V,
    pub to: V,
    pub duration_ms: f64,
    #[serde(default)]
    pub looping: bool,
    #[serde(default)]
    pub ease: Ease,
}

impl<V, P> Tween<V, P>
where
    V: Animatable<Property = P>,
    P: Copy,
{
    fn build(&self) -> Animation<V> {
        Animation::started(self.property, self.from, self.to, self.duration_ms)
            .with_loop(self.looping)
            .with_ease(self.ease)
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnimationDescription {
    Number(Tween<f64, NumberProperty>),
    Point(Tween<Point, PointProperty>),
    Size(Tween<Size, SizeProperty>),
    Rect(Tween<Rect, RectProperty>),
    Keyframes {
        frames: Vec<AnimationDescription>,
        #[serde(default)]
        looping: bool,
    },
}

fn yes() -> bool {
    true
}

fn one() -> f64 {
    1.0
}

fn zero_rect() -> Rect {
    Rect::ZERO
}

impl SceneDescription {
    pub fn from_json_str(json: &str) -> MarqueeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> MarqueeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> MarqueeResult<()> {
        let mut seen = BTreeSet::new();
        let mut claim = |id: &Option<String>| -> MarqueeResult<()> {
            if let Some(id) = id {
                if id.trim().is_empty() {
                    return Err(MarqueeError::scene("ids must be non-empty"));
                }
                if id.starts_with(NodeId::GENERATED_PREFIX) {
                    return Err(MarqueeError::scene(format!(
                        "id '{id}' uses the reserved prefix '{}'",
                        NodeId::GENERATED_PREFIX
                    )));
                }
                if !seen.insert(id.clone()) {
                    return Err(MarqueeError::scene(format!("duplicate id '{id}'")));
                }
            }
            Ok(())
        };

        for layer in &self.layers {
            claim(&layer.id)?;
            for node in &layer.nodes {
                claim(&node.id)?;
                node.validate()?;
            }
        }
        Ok(())
    }

    /// Validate and build a fresh stage.
    pub fn build(&self) -> MarqueeResult<Stage> {
        self.validate()?;
        let mut stage = Stage::new();
        // `add_layer` prepends, so the front layer goes in last.
        for layer in self.layers.iter().rev() {
            stage.add_layer(layer.build());
        }
        Ok(stage)
    }
}

impl LayerDescription {
    fn build(&self) -> Layer {
        let mut layer = match &self.id {
            Some(id) => Layer::with_id(id.as_str()),
            None => Layer::new(),
        }
        .with_visible(self.visible)
        .with_event_transparent(self.event_transparent)
        .with_update_for_hide(self.update_for_hide);
        for node in &self.nodes {
            layer.add_boxed(node.build());
        }
        layer
    }
}

impl NodeDescription {
    fn validate(&self) -> MarqueeResult<()> {
        let label = self.id.as_deref().unwrap_or("<anonymous>");
        let b = self.bounds;
        if ![b.x0, b.y0, b.x1, b.y1, self.angle].iter().all(|v| v.is_finite()) {
            return Err(MarqueeError::scene(format!(
                "node '{label}' has non-finite geometry"
            )));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(MarqueeError::scene(format!(
                "node '{label}' opacity must be within [0, 1]"
            )));
        }
        match &self.shape {
            ShapeDescription::Line { tolerance } if tolerance.is_nan() || *tolerance < 0.0 => {
                return Err(MarqueeError::scene(format!(
                    "node '{label}' line tolerance must be >= 0"
                )));
            }
            ShapeDescription::Polygon { points } if points.len() < 3 => {
                return Err(MarqueeError::scene(format!(
                    "node '{label}' polygon needs at least 3 points"
                )));
            }
            ShapeDescription::Image { image, .. } if image.trim().is_empty() => {
                return Err(MarqueeError::scene(format!(
                    "node '{label}' image key must be non-empty"
                )));
            }
            _ => {}
        }
        for anim in &self.animations {
            anim.validate()
                .map_err(|e| MarqueeError::animation(format!("node '{label}': {e}")))?;
        }
        Ok(())
    }

    fn build(&self) -> Box<dyn ObjectNode> {
        let paint = self.paint;
        match &self.shape {
            ShapeDescription::Blank => Box::new(self.configure(Blank)),
            ShapeDescription::Rect => Box::new(self.configure(Shape::rect().with_paint(paint))),
            ShapeDescription::Circle => {
                Box::new(self.configure(Shape::circle().with_paint(paint)))
            }
            ShapeDescription::Line { tolerance } => {
                Box::new(self.configure(Shape::line(*tolerance).with_paint(paint)))
            }
            ShapeDescription::Polygon { points } => {
                Box::new(self.configure(Shape::polygon(points.clone()).with_paint(paint)))
            }
            ShapeDescription::Image { image, region } => {
                let bounds = self.bounds.abs();
                let texture = ImageTexture::new(image.as_str(), bounds.width(), bounds.height());
                let picture = match region {
                    Some(region) => Picture::clipped(&texture, *region),
                    None => Picture::new(Rc::new(texture) as Rc<dyn Texture>),
                };
                Box::new(self.configure(picture))
            }
        }
    }

    fn configure<V: Visual>(&self, visual: V) -> Sprite<V> {
        let mut sprite = match &self.id {
            Some(id) => Sprite::with_id(id.as_str(), visual),
            None => Sprite::new(visual),
        }
        .with_rect(self.bounds)
        .with_angle(self.angle)
        .with_opacity(self.opacity)
        .with_visible(self.visible);
        if self.center_base_point {
            sprite.state_mut().center_base_point();
        } else if let Some(base_point) = self.base_point {
            sprite.state_mut().set_base_point(base_point);
        }
        for anim in &self.animations {
            sprite.add_boxed_animation(anim.build());
        }
        sprite
    }
}

impl AnimationDescription {
    fn validate(&self) -> MarqueeResult<()> {
        let duration = match self {
            Self::Number(t) => t.duration_ms,
            Self::Point(t) => t.duration_ms,
            Self::Size(t) => t.duration_ms,
            Self::Rect(t) => t.duration_ms,
            Self::Keyframes { frames, .. } => {
                if frames.is_empty() {
                    return Err(MarqueeError::animation("keyframes need at least one frame"));
                }
                return frames.iter().try_for_each(Self::validate);
            }
        };
        if !duration.is_finite() || duration < 0.0 {
            return Err(MarqueeError::animation(format!(
                "duration_ms must be finite and >= 0, got {duration}"
            )));
        }
        Ok(())
    }

    /// Build a playing animation.
    pub fn build(&self) -> Box<dyn Animate> {
        match self {
            Self::Number(t) => Box::new(t.build()),
            Self::Point(t) => Box::new(t.build()),
            Self::Size(t) => Box::new(t.build()),
            Self::Rect(t) => Box::new(t.build()),
            Self::Keyframes { frames, looping } => {
                let mut keyframes = KeyframeAnimation::new().with_loop(*looping);
                for frame in frames {
                    keyframes.add_frame(frame.build());
                }
                keyframes.start();
                Box::new(keyframes)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/description.rs"]
mod tests;
