//! WebGPU rendering module
//!
//! The scene is built as a flat triangle list in canvas pixels and drawn
//! with a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
