//! Browser rendering module
//!
//! The scene is redrawn from scratch every animation frame with the 2D
//! canvas context.

pub mod canvas2d;

pub use canvas2d::SceneRenderer;
