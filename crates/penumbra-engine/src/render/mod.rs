//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers, textures) and record
//! passes into the frame encoder handed to them through `RenderTarget`.
//!
//! Convention:
//! - world space is right-handed, +Y up
//! - clip-space depth is 0..1, smaller is closer (compare `Less`)

mod ctx;
mod depth;
pub mod shadow;

pub use ctx::{RenderCtx, RenderTarget};
pub use depth::DepthTarget;
