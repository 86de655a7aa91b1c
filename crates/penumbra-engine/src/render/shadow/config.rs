use anyhow::{ensure, Context, Result};

use super::LightRig;

/// Construction parameters for `ShadowRenderer`.
#[derive(Debug, Clone)]
pub struct ShadowConfig {
    /// Edge length of the square shadow map, in texels.
    pub map_size: u32,

    /// Clear color of the shaded pass.
    pub clear_color: wgpu::Color,

    /// Initial light.
    pub light: LightRig,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            map_size: 1024,
            clear_color: wgpu::Color {
                r: 0.5,
                g: 0.5,
                b: 0.5,
                a: 1.0,
            },
            light: LightRig::default(),
        }
    }
}

impl ShadowConfig {
    /// Checks the config against the device's texture limit.
    pub fn validate(&self, max_texture_dimension_2d: u32) -> Result<()> {
        ensure!(self.map_size > 0, "shadow map size must be positive");
        ensure!(
            self.map_size <= max_texture_dimension_2d,
            "shadow map size {} exceeds device limit {}",
            self.map_size,
            max_texture_dimension_2d
        );
        self.light.validate().context("invalid light")
    }
}
