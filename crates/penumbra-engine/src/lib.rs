//! Penumbra engine crate.
//!
//! Shadow-mapped 3D rendering on wgpu: procedural and loaded meshes, a
//! two-pass shadow renderer, a fly camera, and the window/GPU runtime that
//! drives them.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod camera;
pub mod mesh;
pub mod render;
