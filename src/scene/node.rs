use std::{any::Any, fmt};

use crate::{
    foundation::{error::MarqueeResult, ids::NodeId},
    render::surface::Surface,
    scene::event::{KeyboardEvent, MouseEvent, NoticeEvent, TouchEvent},
};

/// Capability shared by every scene-graph participant.
///
/// Dispatch methods mutate the event in place. A node claims a pointer event
/// through [`crate::EventHeader::claim`]; containers stop visiting siblings as
/// soon as propagation is stopped. `forced` delivery skips hit-testing and is
/// used for synthetic enter/leave events aimed at a known target.
pub trait ObjectNode: fmt::Debug + Any {
    fn id(&self) -> &NodeId;

    fn is_visible(&self) -> bool;

    fn dispatch_mouse(&mut self, ev: &mut MouseEvent, forced: bool);

    fn dispatch_touch(&mut self, ev: &mut TouchEvent, forced: bool);

    fn dispatch_keyboard(&mut self, ev: &mut KeyboardEvent);

    fn dispatch_notice(&mut self, ev: &mut NoticeEvent);

    /// Advance per-frame state to `timestamp` (milliseconds).
    fn update(&mut self, timestamp: f64);

    fn render(&self, surface: &mut dyn Surface) -> MarqueeResult<()>;

    /// Descendant lookup for container nodes. Leaves have no descendants.
    fn find(&self, _id: &NodeId) -> Option<&(dyn ObjectNode + 'static)> {
        None
    }

    fn find_mut(&mut self, _id: &NodeId) -> Option<&mut (dyn ObjectNode + 'static)> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn ObjectNode {
    pub fn downcast_ref<T: ObjectNode>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: ObjectNode>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
