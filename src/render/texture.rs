use std::{fmt, rc::Rc};

use crate::{
    foundation::core::Rect,
    foundation::error::MarqueeResult,
    render::surface::Surface,
};

/// Drawable image region consumed by render-capable leaf nodes.
pub trait Texture: fmt::Debug {
    fn width(&self) -> f64;

    fn height(&self) -> f64;

    /// Draw the whole texture scaled into `dst`.
    fn draw(&self, surface: &mut dyn Surface, dst: Rect) -> MarqueeResult<()>;

    /// Sub-texture covering `region`, in this texture's own coordinates.
    fn clip(&self, region: Rect) -> Rc<dyn Texture>;
}

/// Texture backed by an image the surface knows by key.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageTexture {
    key: String,
    region: Rect,
}

impl ImageTexture {
    pub fn new(key: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            key: key.into(),
            region: Rect::new(0.0, 0.0, width, height),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Source region inside the backing image.
    pub fn region(&self) -> Rect {
        self.region
    }
}

impl Texture for ImageTexture {
    fn width(&self) -> f64 {
        self.region.width()
    }

    fn height(&self) -> f64 {
        self.region.height()
    }

    fn draw(&self, surface: &mut dyn Surface, dst: Rect) -> MarqueeResult<()> {
        surface.blit(&self.key, self.region, dst)
    }

    fn clip(&self, region: Rect) -> Rc<dyn Texture> {
        let origin = self.region.origin().to_vec2();
        // `intersect` collapses disjoint regions to zero size.
        let region = (region.abs() + origin).intersect(self.region);
        Rc::new(Self {
            key: self.key.clone(),
            region,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/texture.rs"]
mod tests;
