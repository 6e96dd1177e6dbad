use std::fmt;

use crate::{
    animation::ease::Ease,
    foundation::core::{Point, Rect, Size},
};

/// Receiver of interpolated property values.
///
/// Implemented by sprite state; animations never hold on to their target and
/// receive it again on every [`Animate::update`] call.
pub trait AnimationTarget {
    fn set_angle(&mut self, degrees: f64);
    fn set_opacity(&mut self, opacity: f64);
    fn set_x(&mut self, x: f64);
    fn set_y(&mut self, y: f64);
    fn set_width(&mut self, width: f64);
    fn set_height(&mut self, height: f64);
    fn set_position(&mut self, position: Point);
    fn set_size(&mut self, size: Size);
    fn set_box(&mut self, rect: Rect);
}

/// Scalar sprite properties that a number animation can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberProperty {
    Angle,
    Opacity,
    X,
    Y,
    Width,
    Height,
}

/// Point-valued sprite properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointProperty {
    Position,
}

/// Size-valued sprite properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeProperty {
    Size,
}

/// Rectangle-valued sprite properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectProperty {
    Box,
}

/// Per-value-type interpolation strategy.
///
/// `distance` is component-wise subtraction, `progress` is component-wise
/// `start + distance * t` for a normalized (and eased) `t`, and `apply` routes
/// the value to the sprite property selected by `Self::Property`.
pub trait Animatable: Copy + fmt::Debug + 'static {
    type Property: Copy + fmt::Debug + 'static;

    fn distance(start: Self, end: Self) -> Self;

    fn progress(start: Self, distance: Self, t: f64) -> Self;

    fn apply(property: Self::Property, target: &mut dyn AnimationTarget, value: Self);
}

impl Animatable for f64 {
    type Property = NumberProperty;

    fn distance(start: Self, end: Self) -> Self {
        end - start
    }

    fn progress(start: Self, distance: Self, t: f64) -> Self {
        start + distance * t
    }

    fn apply(property: Self::Property, target: &mut dyn AnimationTarget, value: Self) {
        match property {
            NumberProperty::Angle => target.set_angle(value),
            NumberProperty::Opacity => target.set_opacity(value),
            NumberProperty::X => target.set_x(value),
            NumberProperty::Y => target.set_y(value),
            NumberProperty::Width => target.set_width(value),
            NumberProperty::Height => target.set_height(value),
        }
    }
}

impl Animatable for Point {
    type Property = PointProperty;

    fn distance(start: Self, end: Self) -> Self {
        Point::new(end.x - start.x, end.y - start.y)
    }

    fn progress(start: Self, distance: Self, t: f64) -> Self {
        Point::new(start.x + distance.x * t, start.y + distance.y * t)
    }

    fn apply(property: Self::Property, target: &mut dyn AnimationTarget, value: Self) {
        match property {
            PointProperty::Position => target.set_position(value),
        }
    }
}

impl Animatable for Size {
    type Property = SizeProperty;

    fn distance(start: Self, end: Self) -> Self {
        Size::new(end.width - start.width, end.height - start.height)
    }

    fn progress(start: Self, distance: Self, t: f64) -> Self {
        Size::new(
            start.width + distance.width * t,
            start.height + distance.height * t,
        )
    }

    fn apply(property: Self::Property, target: &mut dyn AnimationTarget, value: Self) {
        match property {
            SizeProperty::Size => target.set_size(value),
        }
    }
}

impl Animatable for Rect {
    type Property = RectProperty;

    fn distance(start: Self, end: Self) -> Self {
        Rect::new(
            end.x0 - start.x0,
            end.y0 - start.y0,
            end.x1 - start.x1,
            end.y1 - start.y1,
        )
    }

    fn progress(start: Self, distance: Self, t: f64) -> Self {
        Rect::new(
            start.x0 + distance.x0 * t,
            start.y0 + distance.y0 * t,
            start.x1 + distance.x1 * t,
            start.y1 + distance.y1 * t,
        )
    }

    fn apply(property: Self::Property, target: &mut dyn AnimationTarget, value: Self) {
        match property {
            RectProperty::Box => target.set_box(value),
        }
    }
}

/// Playback contract shared by single-property and keyframe animations.
pub trait Animate: fmt::Debug {
    /// Begin playback. No-op while already playing; use [`Animate::restart`] to force.
    fn start(&mut self);

    /// Reset to the first-frame state and play.
    fn restart(&mut self);

    /// Halt playback. A later [`Animate::start`] begins from the first frame.
    fn stop(&mut self);

    fn is_playing(&self) -> bool;

    fn is_looping(&self) -> bool;

    fn set_looping(&mut self, looping: bool);

    /// Play with the time window already open at `timestamp`, without
    /// touching any target. The next update interpolates inside that window.
    fn prime(&mut self, timestamp: f64);

    /// Advance to `timestamp` (milliseconds), writing into `target`.
    ///
    /// A no-op when not playing.
    fn update(&mut self, timestamp: f64, target: &mut dyn AnimationTarget);
}

/// Time-based interpolation of one sprite property from `start_value` to `end_value`.
///
/// The first update after a start snaps the target to `start_value` and opens
/// the window `[timestamp, timestamp + duration]`. Later updates interpolate
/// inside the window and clamp to exactly `end_value` once it has elapsed; a
/// looping animation then reopens the window at that frame's timestamp.
///
/// A non-positive (or NaN) duration completes on the update after the first
/// frame.
#[derive(Clone, Debug)]
pub struct Animation<T: Animatable> {
    property: T::Property,
    start_value: T,
    end_value: T,
    duration: f64,
    looping: bool,
    ease: Ease,
    distance: T,
    playing: bool,
    first_frame: bool,
    start_time: f64,
    end_time: f64,
}

/// Animation over a scalar property.
pub type NumberAnimation = Animation<f64>;
/// Animation over a sprite position.
pub type PointAnimation = Animation<Point>;
/// Animation over a sprite size.
pub type SizeAnimation = Animation<Size>;
/// Animation over a sprite box.
pub type RectAnimation = Animation<Rect>;

impl<T: Animatable> Animation<T> {
    pub fn new(property: T::Property, start_value: T, end_value: T, duration_ms: f64) -> Self {
        Self {
            property,
            start_value,
            end_value,
            duration: duration_ms,
            looping: false,
            ease: Ease::Linear,
            distance: T::distance(start_value, end_value),
            playing: false,
            first_frame: true,
            start_time: 0.0,
            end_time: 0.0,
        }
    }

    /// Construct an animation that is already playing.
    pub fn started(property: T::Property, start_value: T, end_value: T, duration_ms: f64) -> Self {
        let mut anim = Self::new(property, start_value, end_value, duration_ms);
        anim.playing = true;
        anim
    }

    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn property(&self) -> T::Property {
        self.property
    }

    pub fn start_value(&self) -> T {
        self.start_value
    }

    pub fn end_value(&self) -> T {
        self.end_value
    }

    /// Takes effect from the next first frame.
    pub fn set_start_value(&mut self, value: T) {
        self.start_value = value;
    }

    /// Takes effect from the next first frame.
    pub fn set_end_value(&mut self, value: T) {
        self.end_value = value;
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Takes effect from the next first frame.
    pub fn set_duration(&mut self, duration_ms: f64) {
        self.duration = duration_ms;
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Start of the current playback window, valid once the first frame ran.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// End of the current playback window, valid once the first frame ran.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    fn open_window(&mut self, timestamp: f64) {
        self.start_time = timestamp;
        self.end_time = timestamp + self.duration;
    }
}

impl<T: Animatable> Animate for Animation<T> {
    fn start(&mut self) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.first_frame = true;
    }

    fn restart(&mut self) {
        self.playing = true;
        self.first_frame = true;
    }

    fn stop(&mut self) {
        self.playing = false;
        self.first_frame = true;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn is_looping(&self) -> bool {
        self.looping
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn prime(&mut self, timestamp: f64) {
        self.playing = true;
        self.first_frame = false;
        self.distance = T::distance(self.start_value, self.end_value);
        self.open_window(timestamp);
    }

    fn update(&mut self, timestamp: f64, target: &mut dyn AnimationTarget) {
        if !self.playing {
            return;
        }

        if self.first_frame {
            self.distance = T::distance(self.start_value, self.end_value);
            self.open_window(timestamp);
            T::apply(self.property, target, self.start_value);
            self.first_frame = false;
            return;
        }

        // `!(d > 0)` also catches NaN durations.
        if timestamp >= self.end_time || !(self.duration > 0.0) {
            T::apply(self.property, target, self.end_value);
            if self.looping {
                self.open_window(timestamp);
            } else {
                self.stop();
            }
            return;
        }

        let t = self
            .ease
            .progress(timestamp - self.start_time, self.duration);
        T::apply(
            self.property,
            target,
            T::progress(self.start_value, self.distance, t),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
