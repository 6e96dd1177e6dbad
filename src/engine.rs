pub mod config;
pub mod host;
pub mod input;
pub mod resource;
pub mod runtime;
pub mod signal;
pub mod state;
