pub mod description;
pub mod event;
pub mod layer;
pub mod node;
pub mod picture;
pub mod shape;
pub mod sprite;
pub mod stage;
