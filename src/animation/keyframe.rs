use crate::animation::anim::{Animate, AnimationTarget};

/// Sequential composition of animations.
///
/// Frames play one after another. Looping is a property of the sequence only:
/// every frame's own loop flag is forced off when added and again on every
/// update. When a frame finishes, the next one has its window opened at that
/// timestamp without writing the target, so consecutive frames share window
/// boundaries and every update writes at most once.
#[derive(Debug, Default)]
pub struct KeyframeAnimation {
    frames: Vec<Box<dyn Animate>>,
    cursor: usize,
    looping: bool,
    playing: bool,
}

impl KeyframeAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_frame(mut self, frame: impl Animate + 'static) -> Self {
        self.add_frame(Box::new(frame));
        self
    }

    /// Append a frame; its loop flag is cleared.
    pub fn add_frame(&mut self, mut frame: Box<dyn Animate>) {
        frame.set_looping(false);
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the frame driven by the next update.
    pub fn current_frame(&self) -> usize {
        self.cursor
    }

    pub fn frame(&self, index: usize) -> Option<&dyn Animate> {
        self.frames.get(index).map(|f| f.as_ref())
    }

    fn reset_frames(&mut self) {
        for frame in &mut self.frames {
            frame.stop();
        }
        self.cursor = 0;
    }

    fn drive_current(&mut self, timestamp: f64, target: &mut dyn AnimationTarget) -> bool {
        let frame = &mut self.frames[self.cursor];
        frame.set_looping(false);
        if !frame.is_playing() {
            frame.start();
        }
        frame.update(timestamp, target);
        !frame.is_playing()
    }
}

impl Animate for KeyframeAnimation {
    fn start(&mut self) {
        if self.playing {
            return;
        }
        self.reset_frames();
        self.playing = true;
    }

    fn restart(&mut self) {
        self.reset_frames();
        self.playing = true;
    }

    fn stop(&mut self) {
        self.reset_frames();
        self.playing = false;
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

    fn update(&mut self, timestamp: f64, target: &mut dyn AnimationTarget) {
        if !self.playing {
            return;
        }
        if self.frames.is_empty() {
            tracing::warn!("keyframe animation has no frames; stopping");
            self.playing = false;
            return;
        }

        if !self.drive_current(timestamp, target) {
            return;
        }

        self.cursor += 1;
        if self.cursor >= self.frames.len() {
            self.cursor = 0;
            if !self.looping {
                self.playing = false;
                return;
            }
        }
        let next = &mut self.frames[self.cursor];
        next.set_looping(false);
        next.prime(timestamp);
    }

    fn prime(&mut self, timestamp: f64) {
        self.reset_frames();
        self.playing = true;
        if let Some(first) = self.frames.first_mut() {
            first.set_looping(false);
            first.prime(timestamp);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframe.rs"]
mod tests;
