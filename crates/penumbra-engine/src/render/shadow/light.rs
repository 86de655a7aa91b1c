use anyhow::{ensure, Result};
use glam::{Mat4, Vec3};

/// Directional light modelled as an orthographic camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(50.0, 100.0, -100.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            left: -80.0,
            right: 80.0,
            bottom: -80.0,
            top: 80.0,
            near: -200.0,
            far: 300.0,
        }
    }
}

impl LightRig {
    /// Light at `position` aimed at `target`, default frustum.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }

    /// World -> light clip space.
    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.position.is_finite() && self.target.is_finite() && self.up.is_finite(),
            "light vectors must be finite"
        );
        let dir = self.target - self.position;
        ensure!(dir.length_squared() > 0.0, "light position equals its target");
        ensure!(
            dir.cross(self.up).length_squared() > 0.0,
            "light up vector is parallel to its direction"
        );
        ensure!(
            self.left != self.right && self.bottom != self.top && self.near != self.far,
            "light frustum is degenerate"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_lands_in_the_middle_of_the_shadow_map() {
        let p = LightRig::default().view_proj().project_point3(Vec3::ZERO);
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5, "{p:?}");
        // 150 units from the light, near -200, far 300.
        assert!((p.z - 0.7).abs() < 1e-5, "{p:?}");
    }

    #[test]
    fn frustum_edges_map_to_clip_bounds() {
        let light = LightRig::looking_at(Vec3::new(0.0, 100.0, 0.01), Vec3::ZERO);
        let vp = light.view_proj();
        let view_right = light.view().inverse().transform_vector3(Vec3::X);
        let p = vp.project_point3(view_right * 80.0);
        assert!((p.x - 1.0).abs() < 1e-4, "{p:?}");
    }

    #[test]
    fn validate_rejects_degenerate_rigs() {
        assert!(LightRig::default().validate().is_ok());

        let same = LightRig::looking_at(Vec3::ONE, Vec3::ONE);
        assert!(same.validate().is_err());

        let straight_down = LightRig::looking_at(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        assert!(straight_down.validate().is_err());

        let flat = LightRig {
            near: 1.0,
            far: 1.0,
            ..LightRig::default()
        };
        assert!(flat.validate().is_err());
    }
}
