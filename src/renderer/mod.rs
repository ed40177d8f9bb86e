//! WebGPU rendering module
//!
//! Flat-colored triangle lists: the boundary disk and outline, then one disk
//! per body.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, world_to_ndc};
pub use scene::SceneBuilder;
pub use vertex::Vertex;
