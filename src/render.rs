pub mod recording;
pub mod surface;
pub mod texture;
