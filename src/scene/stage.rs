use crate::{
    foundation::{
        error::{MarqueeError, MarqueeResult},
        ids::NodeId,
    },
    render::surface::Surface,
    scene::{
        event::{Event, KeyboardEvent, MouseEvent, NoticeEvent, TouchEvent},
        layer::Layer,
        node::ObjectNode,
    },
};

/// Root of the scene graph: an ordered list of layers.
///
/// Index 0 is the front. Dispatch walks front to back; rendering walks back
/// to front so the front layer paints last.
#[derive(Debug, Default)]
pub struct Stage {
    layers: Vec<Layer>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `layer` in front of every existing layer.
    pub fn add_layer(&mut self, layer: Layer) -> NodeId {
        let id = layer.id().clone();
        tracing::debug!(layer = %id, "add layer");
        self.layers.insert(0, layer);
        id
    }

    pub fn remove_layer(&mut self, id: &NodeId) -> Option<Layer> {
        let index = self.index_of(id)?;
        Some(self.layers.remove(index))
    }

    pub fn layer(&self, id: &NodeId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn layer_mut(&mut self, id: &NodeId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    /// Layers from front to back.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Move a layer to the front.
    pub fn move_to_top(&mut self, id: &NodeId) -> MarqueeResult<()> {
        let layer = self.take_layer(id)?;
        self.layers.insert(0, layer);
        Ok(())
    }

    /// Move a layer to the back.
    pub fn move_to_bottom(&mut self, id: &NodeId) -> MarqueeResult<()> {
        let layer = self.take_layer(id)?;
        self.layers.push(layer);
        Ok(())
    }

    /// Layer or node anywhere in the tree with `id`. Layers match first.
    pub fn find_node(&self, id: &NodeId) -> Option<&(dyn ObjectNode + 'static)> {
        if let Some(layer) = self.layer(id) {
            return Some(layer);
        }
        self.layers.iter().find_map(|l| l.find(id))
    }

    pub fn find_node_mut(&mut self, id: &NodeId) -> Option<&mut (dyn ObjectNode + 'static)> {
        if let Some(index) = self.index_of(id) {
            return Some(&mut self.layers[index]);
        }
        self.layers.iter_mut().find_map(|l| l.find_mut(id))
    }

    pub fn dispatch_mouse(&mut self, ev: &mut MouseEvent) {
        for layer in &mut self.layers {
            layer.dispatch_mouse(ev, false);
            if ev.is_propagation_stopped() {
                break;
            }
        }
    }

    pub fn dispatch_touch(&mut self, ev: &mut TouchEvent) {
        for layer in &mut self.layers {
            layer.dispatch_touch(ev, false);
            if ev.is_propagation_stopped() {
                break;
            }
        }
    }

    pub fn dispatch_keyboard(&mut self, ev: &mut KeyboardEvent) {
        for layer in &mut self.layers {
            layer.dispatch_keyboard(ev);
            if ev.is_propagation_stopped() {
                break;
            }
        }
    }

    pub fn dispatch_notice(&mut self, ev: &mut NoticeEvent) {
        for layer in &mut self.layers {
            layer.dispatch_notice(ev);
            if ev.is_propagation_stopped() {
                break;
            }
        }
    }

    /// Forced delivery of `ev` to the node with id `target`, skipping hit
    /// tests. Returns `false` when no such node exists.
    pub fn deliver_mouse(&mut self, target: &NodeId, ev: &mut MouseEvent) -> bool {
        match self.find_node_mut(target) {
            Some(node) => {
                node.dispatch_mouse(ev, true);
                true
            }
            None => false,
        }
    }

    pub fn deliver_touch(&mut self, target: &NodeId, ev: &mut TouchEvent) -> bool {
        match self.find_node_mut(target) {
            Some(node) => {
                node.dispatch_touch(ev, true);
                true
            }
            None => false,
        }
    }

    pub fn update(&mut self, timestamp: f64) {
        for layer in &mut self.layers {
            layer.update(timestamp);
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) -> MarqueeResult<()> {
        for layer in self.layers.iter().rev() {
            layer.render(surface)?;
        }
        Ok(())
    }

    fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.layers.iter().position(|l| l.id() == id)
    }

    fn take_layer(&mut self, id: &NodeId) -> MarqueeResult<Layer> {
        self.remove_layer(id)
            .ok_or_else(|| MarqueeError::scene(format!("no layer with id \"{id}\"")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;
