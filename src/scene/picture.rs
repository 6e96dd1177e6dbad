use std::rc::Rc;

use crate::{
    foundation::{core::Rect, error::MarqueeResult, ids::NodeId},
    render::{surface::Surface, texture::Texture},
    scene::sprite::{Sprite, SpriteState, Visual},
};

/// Visual that stretches a texture over the sprite box.
#[derive(Clone, Debug)]
pub struct Picture {
    texture: Rc<dyn Texture>,
}

/// Sprite drawing a [`Picture`].
pub type PictureSprite = Sprite<Picture>;

impl Picture {
    pub fn new(texture: Rc<dyn Texture>) -> Self {
        Self { texture }
    }

    /// Picture showing only `region` of `texture`.
    pub fn clipped(texture: &dyn Texture, region: Rect) -> Self {
        Self {
            texture: texture.clip(region),
        }
    }

    pub fn texture(&self) -> &Rc<dyn Texture> {
        &self.texture
    }

    pub fn set_texture(&mut self, texture: Rc<dyn Texture>) {
        self.texture = texture;
    }
}

impl PictureSprite {
    /// Sprite whose box starts at the origin and matches the texture size.
    pub fn sized_to(id: impl Into<NodeId>, picture: Picture) -> Self {
        let rect = Rect::new(0.0, 0.0, picture.texture.width(), picture.texture.height());
        Sprite::with_id(id, picture).with_rect(rect)
    }
}

impl Visual for Picture {
    fn draw(&self, state: &SpriteState, surface: &mut dyn Surface) -> MarqueeResult<()> {
        let rect = state.rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Ok(());
        }
        self.texture.draw(surface, rect)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/picture.rs"]
mod tests;
