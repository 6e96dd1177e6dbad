use crate::scene::event::Cursor;

/// Services the embedding environment provides to the engine.
pub trait Host {
    /// Ask for one more [`crate::Engine::on_frame`] callback before the next paint.
    fn request_frame(&mut self);

    /// Change the pointer cursor. Only called when the cursor actually changes.
    fn set_cursor(&mut self, cursor: &Cursor);
}

/// Host without a window. Records requests so a driver loop can act on them.
#[derive(Clone, Debug, Default)]
pub struct HeadlessHost {
    pending_frame: bool,
    frame_requests: u64,
    cursor: Cursor,
    cursor_changes: Vec<Cursor>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending frame request, if any.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.pending_frame)
    }

    pub fn frame_requests(&self) -> u64 {
        self.frame_requests
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_changes(&self) -> &[Cursor] {
        &self.cursor_changes
    }
}

impl Host for HeadlessHost {
    fn request_frame(&mut self) {
        self.pending_frame = true;
        self.frame_requests += 1;
    }

    fn set_cursor(&mut self, cursor: &Cursor) {
        self.cursor = cursor.clone();
        self.cursor_changes.push(cursor.clone());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/host.rs"]
mod tests;
