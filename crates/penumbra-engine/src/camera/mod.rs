//! Viewer camera.
//!
//! Right-handed, +Y up, depth range 0..1 (wgpu clip space).

mod controls;
mod projection;
mod wasd;

pub use controls::CameraInput;
pub use projection::Projection;
pub use wasd::WasdCamera;
