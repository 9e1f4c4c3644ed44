//! Perspective look-at camera.

use glam::{Mat4, Quat, Vec3};

/// Right-handed perspective camera producing wgpu clip space (depth 0..1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_radians: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_radians: 45f32.to_radians(),
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

impl Camera {
    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection for the given width / height ratio.
    ///
    /// Non-positive or non-finite aspects fall back to 1.0 so a minimized
    /// window never produces NaNs.
    #[inline]
    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective_rh(self.fov_y_radians, aspect, self.z_near, self.z_far)
    }

    #[inline]
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// Rotates the eye around the target about the up axis.
    pub fn orbit(&mut self, angle_radians: f32) {
        let offset = self.eye - self.target;
        let rotation = Quat::from_axis_angle(self.up.normalize_or(Vec3::Y), angle_radians);
        self.eye = self.target + rotation * offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = Camera::default();
        let clip = cam.view_proj(16.0 / 9.0) * cam.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn near_and_far_map_to_depth_range() {
        let cam = Camera::default();
        let vp = cam.view_proj(1.0);
        let near = vp * Vec3::new(0.0, 0.0, cam.eye.z - cam.z_near).extend(1.0);
        let far = vp * Vec3::new(0.0, 0.0, cam.eye.z - cam.z_far).extend(1.0);
        assert!((near.z / near.w).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_aspect_falls_back() {
        let cam = Camera::default();
        assert_eq!(cam.projection(0.0), cam.projection(1.0));
        assert_eq!(cam.projection(f32::NAN), cam.projection(1.0));
        assert!(!cam.projection(-2.0).is_nan());
    }

    #[test]
    fn orbit_keeps_distance() {
        let mut cam = Camera::default();
        let before = cam.eye.distance(cam.target);
        cam.orbit(0.7);
        assert!((cam.eye.distance(cam.target) - before).abs() < 1e-4);
    }

    #[test]
    fn orbit_quarter_turn() {
        let mut cam = Camera::default();
        cam.orbit(std::f32::consts::FRAC_PI_2);
        assert!(approx(cam.eye, Vec3::new(5.0, 0.0, 0.0)), "eye = {:?}", cam.eye);
    }
}
