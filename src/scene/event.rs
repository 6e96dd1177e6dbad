use std::{any::Any, fmt, rc::Rc};

use crate::foundation::{core::Point, ids::NodeId};

/// Propagation state shared by every event kind.
///
/// `stop_propagation` is write-once within a dispatch pass: nothing in the
/// crate ever clears it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventHeader {
    source: Option<NodeId>,
    target: Option<NodeId>,
    stopped: bool,
}

impl EventHeader {
    pub fn source(&self) -> Option<&NodeId> {
        self.source.as_ref()
    }

    pub fn set_source(&mut self, source: Option<NodeId>) {
        self.source = source;
    }

    /// First node (or the most specific node) that claimed the event.
    pub fn target(&self) -> Option<&NodeId> {
        self.target.as_ref()
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }

    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// Mark `id` as the target and stop propagation to later siblings.
    pub fn claim(&mut self, id: &NodeId) {
        self.target = Some(id.clone());
        self.stopped = true;
    }
}

/// Access to the propagation header of any event.
pub trait Event {
    fn header(&self) -> &EventHeader;

    fn header_mut(&mut self) -> &mut EventHeader;

    fn target(&self) -> Option<&NodeId> {
        self.header().target()
    }

    fn is_propagation_stopped(&self) -> bool {
        self.header().is_propagation_stopped()
    }
}

macro_rules! impl_event {
    ($($ty:ty),* $(,)?) => {
        $(impl Event for $ty {
            fn header(&self) -> &EventHeader {
                &self.header
            }

            fn header_mut(&mut self) -> &mut EventHeader {
                &mut self.header
            }
        })*
    };
}

/// Host cursor hint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    Move,
    Text,
    Grab,
    Grabbing,
    Crosshair,
    NotAllowed,
    Custom(String),
}

/// Opaque per-interaction state a node attaches to a captured pointer event.
///
/// The engine hands the context back on the next pointer event so a node can
/// recognise a continuing interaction such as a drag.
#[derive(Clone)]
pub struct CaptureContext {
    owner: NodeId,
    data: Rc<dyn Any>,
}

impl CaptureContext {
    pub fn new<T: Any>(owner: NodeId, data: T) -> Self {
        Self {
            owner,
            data: Rc::new(data),
        }
    }

    pub fn owner(&self) -> &NodeId {
        &self.owner
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }
}

impl fmt::Debug for CaptureContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureContext")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
    Other(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down,
    Up,
    Move,
    Enter,
    Leave,
}

/// Shared capture bookkeeping for pointer events.
#[derive(Clone, Debug, Default)]
struct Capture {
    captured: bool,
    context: Option<CaptureContext>,
}

impl Capture {
    fn capture(&mut self, context: CaptureContext) {
        self.captured = true;
        self.context = Some(context);
    }

    fn release(&mut self) {
        self.captured = false;
    }

    fn take(&mut self) -> Option<CaptureContext> {
        if self.captured {
            self.context.take()
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
pub struct MouseEvent {
    header: EventHeader,
    kind: MouseEventKind,
    position: Point,
    button: Option<MouseButton>,
    cursor: Cursor,
    capture: Capture,
}

impl MouseEvent {
    pub fn new(kind: MouseEventKind, position: Point) -> Self {
        Self {
            header: EventHeader::default(),
            kind,
            position,
            button: None,
            cursor: Cursor::Default,
            capture: Capture::default(),
        }
    }

    pub fn with_button(mut self, button: Option<MouseButton>) -> Self {
        self.button = button;
        self
    }

    pub fn kind(&self) -> MouseEventKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn button(&self) -> Option<MouseButton> {
        self.button
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    pub fn is_captured(&self) -> bool {
        self.capture.captured
    }

    /// Context carried over from the previous captured pointer event, if any.
    pub fn capture_context(&self) -> Option<&CaptureContext> {
        self.capture.context.as_ref()
    }

    /// Keep the pointer interaction alive past this event.
    pub fn capture(&mut self, context: CaptureContext) {
        self.capture.capture(context);
    }

    pub fn release_capture(&mut self) {
        self.capture.release();
    }

    pub(crate) fn attach_capture(&mut self, context: Option<CaptureContext>) {
        self.capture.context = context;
    }

    pub(crate) fn take_capture(&mut self) -> Option<CaptureContext> {
        self.capture.take()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchEventKind {
    Start,
    End,
    Move,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

#[derive(Clone, Debug)]
pub struct TouchEvent {
    header: EventHeader,
    kind: TouchEventKind,
    touches: Vec<TouchPoint>,
    capture: Capture,
}

impl TouchEvent {
    pub fn new(kind: TouchEventKind, touches: Vec<TouchPoint>) -> Self {
        Self {
            header: EventHeader::default(),
            kind,
            touches,
            capture: Capture::default(),
        }
    }

    pub fn kind(&self) -> TouchEventKind {
        self.kind
    }

    pub fn touches(&self) -> &[TouchPoint] {
        &self.touches
    }

    /// Position of the first touch; used for hit-testing.
    pub fn position(&self) -> Option<Point> {
        self.touches.first().map(|t| t.position)
    }

    pub fn is_captured(&self) -> bool {
        self.capture.captured
    }

    pub fn capture_context(&self) -> Option<&CaptureContext> {
        self.capture.context.as_ref()
    }

    pub fn capture(&mut self, context: CaptureContext) {
        self.capture.capture(context);
    }

    pub fn release_capture(&mut self) {
        self.capture.release();
    }

    pub(crate) fn attach_capture(&mut self, context: Option<CaptureContext>) {
        self.capture.context = context;
    }

    pub(crate) fn take_capture(&mut self) -> Option<CaptureContext> {
        self.capture.take()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

#[derive(Clone, Debug)]
pub struct KeyboardEvent {
    header: EventHeader,
    kind: KeyEventKind,
    key: String,
    code: String,
    modifiers: Modifiers,
    repeat: bool,
}

impl KeyboardEvent {
    pub fn new(kind: KeyEventKind, key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            header: EventHeader::default(),
            kind,
            key: key.into(),
            code: code.into(),
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn kind(&self) -> KeyEventKind {
        self.kind
    }

    /// Logical key value, e.g. `"a"` or `"Enter"`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Physical key code, e.g. `"KeyA"`.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat
    }
}

/// Named application-level message walked through the tree.
#[derive(Clone, Debug)]
pub struct NoticeEvent {
    header: EventHeader,
    name: String,
    broadcast: bool,
    payload: serde_json::Value,
}

impl NoticeEvent {
    pub fn new(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            header: EventHeader::default(),
            name: name.into(),
            broadcast: false,
            payload,
        }
    }

    pub fn with_source(mut self, source: Option<NodeId>) -> Self {
        self.header.set_source(source);
        self
    }

    pub fn with_broadcast(mut self, broadcast: bool) -> Self {
        self.broadcast = broadcast;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_broadcast(&self) -> bool {
        self.broadcast
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}

impl_event!(MouseEvent, TouchEvent, KeyboardEvent, NoticeEvent);

#[cfg(test)]
#[path = "../../tests/unit/scene/event.rs"]
mod tests;
