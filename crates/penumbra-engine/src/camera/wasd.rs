use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Mat4, Vec3};

use super::CameraInput;

/// Pitch stays just short of vertical so the view basis never degenerates.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 1.0e-3;

/// Units each wheel line moves the camera along its view direction.
const ZOOM_STEP: f32 = 2.0;

/// First-person fly camera.
///
/// Yaw is measured around +Y from +Z towards +X; pitch is positive looking up.
/// Movement eases towards the requested velocity instead of snapping to it.
#[derive(Debug, Clone, PartialEq)]
pub struct WasdCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub velocity: Vec3,

    /// Movement speed, units per second.
    pub movement_speed: f32,
    /// Radians per logical pixel of drag, per second of frame time.
    pub rotation_speed: f32,
    /// Fraction of the velocity error removed per second, in `[0, 1)`.
    pub friction: f32,
}

impl Default for WasdCamera {
    fn default() -> Self {
        Self::looking_at(Vec3::new(0.0, 30.0, -80.0), Vec3::new(0.0, 15.0, 0.0))
    }
}

impl WasdCamera {
    /// Creates a camera at `position` facing `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut cam = Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            velocity: Vec3::ZERO,
            movement_speed: 10.0,
            rotation_speed: 1.0,
            friction: 0.99,
        };
        cam.face(target - position);
        cam
    }

    /// Points the camera along `dir`. A zero direction is ignored.
    pub fn face(&mut self, dir: Vec3) {
        let dir = dir.normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        self.yaw = dir.x.atan2(dir.z);
        self.pitch = dir.y.clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp)
    }

    /// Unit horizontal right vector.
    pub fn right(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(-cy, 0.0, sy)
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    /// Applies one frame of input and returns the new view matrix.
    pub fn update(&mut self, dt: f32, input: &CameraInput) -> Mat4 {
        let sign = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;

        self.yaw -= input.look.0 * dt * self.rotation_speed;
        self.pitch -= input.look.1 * dt * self.rotation_speed;
        self.yaw = (self.yaw + PI).rem_euclid(TAU) - PI;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let forward = self.forward();
        let target = (self.right() * sign(input.right, input.left)
            + Vec3::Y * sign(input.up, input.down)
            + forward * sign(input.forward, input.backward))
            .normalize_or_zero()
            * self.movement_speed;

        // Weight kept on the previous velocity after `dt` seconds.
        let keep = (1.0 - self.friction).powf(dt);
        self.velocity = target.lerp(self.velocity, keep);

        self.position += self.velocity * dt + forward * input.zoom * ZOOM_STEP;
        self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn looking_at_faces_the_target() {
        let eye = Vec3::new(0.0, 30.0, -80.0);
        let target = Vec3::new(0.0, 15.0, 0.0);
        let cam = WasdCamera::looking_at(eye, target);
        assert!(close(cam.forward(), (target - eye).normalize()));

        // The target projects to the view axis (-Z in view space).
        let v = cam.view().transform_point3(target);
        assert!(v.x.abs() < 1e-3 && v.y.abs() < 1e-3 && v.z < 0.0, "{v:?}");
    }

    #[test]
    fn right_is_perpendicular_and_horizontal() {
        let mut cam = WasdCamera::default();
        cam.yaw = 0.7;
        cam.pitch = 0.3;
        assert!(cam.right().dot(cam.forward()).abs() < 1e-5);
        assert_eq!(cam.right().y, 0.0);
        // View-space +X must be the camera's right.
        let v = cam.view().transform_vector3(cam.right());
        assert!(close(v, Vec3::X), "{v:?}");
    }

    #[test]
    fn velocity_eases_towards_target() {
        let mut cam = WasdCamera::looking_at(Vec3::ZERO, Vec3::Z);
        let input = CameraInput {
            forward: true,
            ..Default::default()
        };

        cam.update(1.0 / 60.0, &input);
        let first = cam.velocity.length();
        assert!(first > 0.0 && first < cam.movement_speed);

        for _ in 0..600 {
            cam.update(1.0 / 60.0, &input);
        }
        assert!(close(cam.velocity, Vec3::Z * cam.movement_speed));
        assert!(cam.position.z > 0.0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut cam = WasdCamera::looking_at(Vec3::ZERO, Vec3::Z);
        let input = CameraInput {
            left: true,
            right: true,
            ..Default::default()
        };
        cam.update(0.5, &input);
        assert_eq!(cam.velocity, Vec3::ZERO);
        assert_eq!(cam.position, Vec3::ZERO);
    }

    #[test]
    fn dragging_right_turns_right() {
        let mut cam = WasdCamera::looking_at(Vec3::ZERO, Vec3::Z);
        let right_before = cam.right();
        let input = CameraInput {
            look: (10.0, 0.0),
            ..Default::default()
        };
        cam.update(0.05, &input);
        assert!(cam.forward().dot(right_before) > 0.0);
    }

    #[test]
    fn pitch_is_clamped_and_yaw_wraps() {
        let mut cam = WasdCamera::default();
        let input = CameraInput {
            look: (0.0, -10_000.0),
            ..Default::default()
        };
        cam.update(1.0, &input);
        assert!(cam.pitch <= FRAC_PI_2);

        cam.yaw = 3.0;
        let input = CameraInput {
            look: (-1.0, 0.0),
            ..Default::default()
        };
        cam.update(1.0, &input);
        assert!((-PI..PI).contains(&cam.yaw), "{}", cam.yaw);
    }

    #[test]
    fn wheel_moves_along_view() {
        let mut cam = WasdCamera::looking_at(Vec3::ZERO, Vec3::X);
        let input = CameraInput {
            zoom: 1.0,
            ..Default::default()
        };
        cam.update(0.016, &input);
        assert!(close(cam.position, Vec3::X * ZOOM_STEP));
    }
}
