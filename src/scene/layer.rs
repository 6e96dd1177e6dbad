use std::any::Any;

use crate::{
    foundation::{error::MarqueeResult, ids::NodeId},
    render::surface::Surface,
    scene::{
        event::{Event, KeyboardEvent, MouseEvent, NoticeEvent, TouchEvent},
        node::ObjectNode,
    },
};

/// Ordered container of nodes.
///
/// Insertion order is dispatch order: the first node added is hit-tested
/// first. Rendering walks the list backwards, so earlier nodes paint last and
/// cover later ones.
#[derive(Debug)]
pub struct Layer {
    id: NodeId,
    nodes: Vec<Box<dyn ObjectNode>>,
    visible: bool,
    event_transparent: bool,
    update_for_hide: bool,
}

impl Default for Layer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer {
    pub fn new() -> Self {
        Self::with_id(NodeId::generate())
    }

    pub fn with_id(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            nodes: Vec::new(),
            visible: true,
            event_transparent: true,
            update_for_hide: false,
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// An opaque layer claims pointer and keyboard events no child claimed.
    pub fn with_event_transparent(mut self, transparent: bool) -> Self {
        self.event_transparent = transparent;
        self
    }

    /// Keep updating (animating) nodes while the layer is hidden.
    pub fn with_update_for_hide(mut self, update_for_hide: bool) -> Self {
        self.update_for_hide = update_for_hide;
        self
    }

    pub fn with_node(mut self, node: impl ObjectNode) -> Self {
        self.add(node);
        self
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_event_transparent(&self) -> bool {
        self.event_transparent
    }

    pub fn set_event_transparent(&mut self, transparent: bool) {
        self.event_transparent = transparent;
    }

    pub fn updates_when_hidden(&self) -> bool {
        self.update_for_hide
    }

    pub fn set_update_for_hide(&mut self, update_for_hide: bool) {
        self.update_for_hide = update_for_hide;
    }

    /// Append a node and return its id.
    pub fn add(&mut self, node: impl ObjectNode) -> NodeId {
        self.add_boxed(Box::new(node))
    }

    pub fn add_boxed(&mut self, node: Box<dyn ObjectNode>) -> NodeId {
        let id = node.id().clone();
        tracing::trace!(layer = %self.id, node = %id, "add node");
        self.nodes.push(node);
        id
    }

    /// Remove every direct child with `id`; returns how many were removed.
    pub fn remove(&mut self, id: &NodeId) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id() != id);
        before - self.nodes.len()
    }

    pub fn remove_all(&mut self) {
        self.nodes.clear();
    }

    /// First direct child with `id`.
    pub fn get(&self, id: &NodeId) -> Option<&(dyn ObjectNode + 'static)> {
        self.nodes.iter().find(|n| n.id() == id).map(|n| n.as_ref())
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut (dyn ObjectNode + 'static)> {
        self.nodes
            .iter_mut()
            .find(|n| n.id() == id)
            .map(|n| n.as_mut())
    }

    /// Direct child with `id`, downcast to its concrete type.
    pub fn get_as<T: ObjectNode>(&self, id: &NodeId) -> Option<&T> {
        self.get(id).and_then(|n| n.downcast_ref::<T>())
    }

    pub fn get_as_mut<T: ObjectNode>(&mut self, id: &NodeId) -> Option<&mut T> {
        self.get_mut(id).and_then(|n| n.downcast_mut::<T>())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children in dispatch order.
    pub fn nodes(&self) -> impl Iterator<Item = &(dyn ObjectNode + 'static)> + '_ {
        self.nodes.iter().map(|n| n.as_ref())
    }

    fn claim_if_opaque<E: Event>(&self, ev: &mut E) {
        if !self.event_transparent && !ev.is_propagation_stopped() {
            ev.header_mut().claim(&self.id);
        }
    }
}

impl ObjectNode for Layer {
    fn id(&self) -> &NodeId {
        &self.id
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn dispatch_mouse(&mut self, ev: &mut MouseEvent, forced: bool) {
        if !self.visible {
            return;
        }
        if forced {
            ev.header_mut().claim(&self.id);
            return;
        }
        for node in &mut self.nodes {
            node.dispatch_mouse(ev, false);
            if ev.is_propagation_stopped() {
                return;
            }
        }
        self.claim_if_opaque(ev);
    }

    fn dispatch_touch(&mut self, ev: &mut TouchEvent, forced: bool) {
        if !self.visible {
            return;
        }
        if forced {
            ev.header_mut().claim(&self.id);
            return;
        }
        for node in &mut self.nodes {
            node.dispatch_touch(ev, false);
            if ev.is_propagation_stopped() {
                return;
            }
        }
        self.claim_if_opaque(ev);
    }

    fn dispatch_keyboard(&mut self, ev: &mut KeyboardEvent) {
        if !self.visible {
            return;
        }
        for node in &mut self.nodes {
            node.dispatch_keyboard(ev);
            if ev.is_propagation_stopped() {
                return;
            }
        }
        self.claim_if_opaque(ev);
    }

    fn dispatch_notice(&mut self, ev: &mut NoticeEvent) {
        for node in &mut self.nodes {
            node.dispatch_notice(ev);
            if ev.is_propagation_stopped() {
                return;
            }
        }
    }

    fn update(&mut self, timestamp: f64) {
        if !self.visible && !self.update_for_hide {
            return;
        }
        for node in &mut self.nodes {
            node.update(timestamp);
        }
    }

    fn render(&self, surface: &mut dyn Surface) -> MarqueeResult<()> {
        if !self.visible {
            return Ok(());
        }
        for node in self.nodes.iter().rev() {
            node.render(surface)?;
        }
        Ok(())
    }

    fn find(&self, id: &NodeId) -> Option<&(dyn ObjectNode + 'static)> {
        self.get(id)
            .or_else(|| self.nodes.iter().find_map(|n| n.find(id)))
    }

    fn find_mut(&mut self, id: &NodeId) -> Option<&mut (dyn ObjectNode + 'static)> {
        let direct = self.nodes.iter().position(|n| n.id() == id);
        match direct {
            Some(index) => Some(self.nodes[index].as_mut()),
            None => self.nodes.iter_mut().find_map(|n| n.find_mut(id)),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layer.rs"]
mod tests;
