use std::ops::{Deref, DerefMut};

use crate::foundation::{
    core::{BezPath, Rect, Rgba, Vec2},
    error::MarqueeResult,
};

/// Abstract 2D drawing surface driven by the scene graph.
///
/// Mirrors the immediate-mode canvas model: a stack of saved states, an
/// affine transform mutated by `translate`/`rotate`, and drawing primitives.
/// Pixel work is entirely up to the implementor.
pub trait Surface {
    fn save(&mut self);

    /// Pop the last saved state. Extra restores are ignored.
    fn restore(&mut self);

    fn translate(&mut self, offset: Vec2);

    fn rotate(&mut self, radians: f64);

    /// Multiplies subsequent drawing by `alpha` until the state is restored.
    fn set_global_alpha(&mut self, alpha: f64);

    fn fill_path(&mut self, path: &BezPath, color: Rgba) -> MarqueeResult<()>;

    fn stroke_path(&mut self, path: &BezPath, color: Rgba, width: f64) -> MarqueeResult<()>;

    /// Copy the `src` region of the image registered under `image` into `dst`.
    fn blit(&mut self, image: &str, src: Rect, dst: Rect) -> MarqueeResult<()>;
}

/// Scoped `save`/`restore` pair.
///
/// The state is restored when the guard drops, including on early return
/// through `?`.
pub struct SurfaceGuard<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> SurfaceGuard<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<'a> Deref for SurfaceGuard<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl DerefMut for SurfaceGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for SurfaceGuard<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

impl std::fmt::Debug for SurfaceGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceGuard").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
