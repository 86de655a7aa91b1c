use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Scene uniform shared by both passes (`Scene` in the shaders).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneUniform {
    pub light_view_proj: [[f32; 4]; 4],
    pub camera_view_proj: [[f32; 4]; 4],
    pub light_pos: [f32; 3],
    pub _pad: f32,
}

impl SceneUniform {
    pub const LIGHT_VIEW_PROJ_OFFSET: u64 =
        std::mem::offset_of!(SceneUniform, light_view_proj) as u64;
    pub const CAMERA_VIEW_PROJ_OFFSET: u64 =
        std::mem::offset_of!(SceneUniform, camera_view_proj) as u64;
    pub const LIGHT_POS_OFFSET: u64 = std::mem::offset_of!(SceneUniform, light_pos) as u64;

    pub fn new(light_view_proj: Mat4, camera_view_proj: Mat4, light_pos: Vec3) -> Self {
        Self {
            light_view_proj: light_view_proj.to_cols_array_2d(),
            camera_view_proj: camera_view_proj.to_cols_array_2d(),
            light_pos: light_pos.to_array(),
            _pad: 0.0,
        }
    }
}

/// Per-mesh model matrix (`Model` in the shaders).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}
