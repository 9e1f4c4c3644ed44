//! Shader-subroutines engine crate.
//!
//! Owns the platform + GPU runtime pieces and the per-draw lighting-function
//! selection used by the demo binary.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;

pub mod camera;
pub mod lighting;
pub mod mesh;
pub mod vertex;

pub use vertex::{PI, VertexFormat};
