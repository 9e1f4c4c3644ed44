//! GPU rendering subsystem.
//!
//! Convention:
//! - world space is right-handed, +Y up
//! - every draw shares one pipeline; per-draw state lives in a uniform buffer
//! - color + depth targets are cleared by `core::FrameCtx::render` before
//!   renderers run, so renderers always load

mod ctx;
mod subroutine;

pub use ctx::{RenderCtx, RenderTarget};
pub use subroutine::{DrawItem, SubroutineRenderer};
