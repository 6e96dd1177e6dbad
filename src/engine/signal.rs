use std::{collections::BTreeMap, fmt};

use crate::{
    foundation::ids::NodeId,
    render::surface::Surface,
    scene::{
        event::{
            KeyEventKind, KeyboardEvent, MouseEvent, MouseEventKind, TouchEvent, TouchEventKind,
        },
        stage::Stage,
    },
};

/// Canonical signal names.
pub mod names {
    pub const LOADING: &str = "loading";
    pub const READY: &str = "ready";
    pub const SHUTDOWN: &str = "shutdown";
    pub const UPDATE: &str = "update";
    /// Emitted after every rendered frame. The spelling is part of the public
    /// signal vocabulary.
    pub const RENDER: &str = "rander";
    pub const FAULT: &str = "fault";
    pub const MOUSE_DOWN: &str = "mousedown";
    pub const MOUSE_UP: &str = "mouseup";
    pub const MOUSE_MOVE: &str = "mousemove";
    pub const MOUSE_ENTER: &str = "mouseenter";
    pub const MOUSE_LEAVE: &str = "mouseleave";
    pub const TOUCH_START: &str = "touchstart";
    pub const TOUCH_END: &str = "touchend";
    pub const TOUCH_MOVE: &str = "touchmove";
    pub const TOUCH_CANCEL: &str = "touchcancel";
    pub const KEY_DOWN: &str = "keydown";
    pub const KEY_UP: &str = "keyup";
}

/// Payload handed to subscribers.
pub enum Signal<'a> {
    Loading { progress: f64 },
    Ready,
    Shutdown,
    Update { timestamp: f64 },
    Render { surface: &'a mut dyn Surface },
    Fault { reason: &'a str },
    Mouse(&'a MouseEvent),
    Touch(&'a TouchEvent),
    Keyboard(&'a KeyboardEvent),
    Notice {
        name: &'a str,
        source: Option<&'a NodeId>,
        payload: &'a serde_json::Value,
    },
}

impl Signal<'_> {
    /// Name subscribers register under.
    pub fn name(&self) -> &str {
        match self {
            Signal::Loading { .. } => names::LOADING,
            Signal::Ready => names::READY,
            Signal::Shutdown => names::SHUTDOWN,
            Signal::Update { .. } => names::UPDATE,
            Signal::Render { .. } => names::RENDER,
            Signal::Fault { .. } => names::FAULT,
            Signal::Mouse(ev) => match ev.kind() {
                MouseEventKind::Down => names::MOUSE_DOWN,
                MouseEventKind::Up => names::MOUSE_UP,
                MouseEventKind::Move => names::MOUSE_MOVE,
                MouseEventKind::Enter => names::MOUSE_ENTER,
                MouseEventKind::Leave => names::MOUSE_LEAVE,
            },
            Signal::Touch(ev) => match ev.kind() {
                TouchEventKind::Start => names::TOUCH_START,
                TouchEventKind::End => names::TOUCH_END,
                TouchEventKind::Move => names::TOUCH_MOVE,
                TouchEventKind::Cancel => names::TOUCH_CANCEL,
            },
            Signal::Keyboard(ev) => match ev.kind() {
                KeyEventKind::Down => names::KEY_DOWN,
                KeyEventKind::Up => names::KEY_UP,
            },
            Signal::Notice { name, .. } => *name,
        }
    }
}

impl fmt::Debug for Signal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Loading { progress } => {
                f.debug_struct("Loading").field("progress", progress).finish()
            }
            Signal::Update { timestamp } => {
                f.debug_struct("Update").field("timestamp", timestamp).finish()
            }
            Signal::Fault { reason } => f.debug_struct("Fault").field("reason", reason).finish(),
            Signal::Mouse(ev) => f.debug_tuple("Mouse").field(ev).finish(),
            Signal::Touch(ev) => f.debug_tuple("Touch").field(ev).finish(),
            Signal::Keyboard(ev) => f.debug_tuple("Keyboard").field(ev).finish(),
            Signal::Notice { name, source, payload } => f
                .debug_struct("Notice")
                .field("name", name)
                .field("source", source)
                .field("payload", payload)
                .finish(),
            other => f.write_str(other.name()),
        }
    }
}

/// Handle returned by [`SignalHub::on`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&mut Stage, &mut Signal<'_>)>;

/// Named subscriber lists.
///
/// Subscribers run in registration order and receive the stage, so they can
/// mutate the scene between tree walks.
#[derive(Default)]
pub struct SignalHub {
    next_id: u64,
    subscribers: BTreeMap<String, Vec<(SubscriptionId, Subscriber)>>,
}

impl SignalHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(
        &mut self,
        name: impl Into<String>,
        subscriber: impl FnMut(&mut Stage, &mut Signal<'_>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers
            .entry(name.into())
            .or_default()
            .push((id, Box::new(subscriber)));
        id
    }

    /// Remove one subscription. Returns whether it existed.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let mut removed = false;
        self.subscribers.retain(|_, subs| {
            let before = subs.len();
            subs.retain(|(sid, _)| *sid != id);
            removed |= subs.len() != before;
            !subs.is_empty()
        });
        removed
    }

    /// Drop every subscriber of `name`.
    pub fn clear(&mut self, name: &str) {
        self.subscribers.remove(name);
    }

    pub fn count(&self, name: &str) -> usize {
        self.subscribers.get(name).map_or(0, Vec::len)
    }

    /// Invoke every subscriber of `signal.name()`; returns how many ran.
    pub fn emit(&mut self, stage: &mut Stage, signal: &mut Signal<'_>) -> usize {
        let Some(subs) = self.subscribers.get_mut(signal.name()) else {
            return 0;
        };
        tracing::trace!(signal = signal.name(), subscribers = subs.len(), "emit");
        for (_, subscriber) in subs.iter_mut() {
            subscriber(stage, signal);
        }
        subs.len()
    }
}

impl fmt::Debug for SignalHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: BTreeMap<&str, usize> = self
            .subscribers
            .iter()
            .map(|(name, subs)| (name.as_str(), subs.len()))
            .collect();
        f.debug_struct("SignalHub").field("subscribers", &counts).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/signal.rs"]
mod tests;
