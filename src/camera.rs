//! Perspective orbit camera.

use glam::{Mat4, Vec3};

use crate::params::OrbitCameraParams;

/// Keeps the eye off the pole, where the look-at basis degenerates
const MIN_POLAR_ANGLE: f32 = 1.0e-3;

/// Perspective camera orbiting a target point.
///
/// The eye sits at `target + radius * (sin(polar) sin(azimuth), cos(polar),
/// sin(polar) cos(azimuth))`.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    params: OrbitCameraParams,
    target: Vec3,
    radius: f32,
    polar: f32,
    azimuth: f32,
    aspect: f32,
}

impl OrbitCamera {
    /// Create a camera at `params.position` looking at `params.target`
    pub fn new(params: OrbitCameraParams, aspect: f32) -> Self {
        let target = Vec3::from_array(params.target);
        let offset = Vec3::from_array(params.position) - target;
        let radius = offset.length().max(params.min_distance_m);
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);

        let mut camera = Self {
            params,
            target,
            radius,
            polar,
            azimuth,
            aspect,
        };
        camera.clamp();
        camera
    }

    fn clamp(&mut self) {
        self.polar = self
            .polar
            .clamp(MIN_POLAR_ANGLE, self.params.max_polar_angle);
        self.radius = self
            .radius
            .clamp(self.params.min_distance_m, self.params.max_distance_m);
    }

    /// Orbit by a mouse drag measured in pixels
    pub fn rotate(&mut self, dx_pixels: f32, dy_pixels: f32) {
        self.azimuth -= dx_pixels * self.params.rotate_speed;
        self.polar -= dy_pixels * self.params.rotate_speed;
        self.clamp();
    }

    /// Dolly toward (positive) or away from (negative) the target
    pub fn zoom(&mut self, wheel_lines: f32) {
        self.radius *= (1.0 - self.params.zoom_speed).powf(wheel_lines);
        self.clamp();
    }

    /// Update the aspect ratio from a viewport size.
    ///
    /// Returns true when the projection changed.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        let aspect = width as f32 / height as f32;
        if aspect == self.aspect {
            return false;
        }
        self.aspect = aspect;
        true
    }

    pub fn position(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + self.radius * Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a)
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn polar_angle(&self) -> f32 {
        self.polar
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.params.near_plane_m
    }

    pub fn far(&self) -> f32 {
        self.params.far_plane_m
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.params.fov_degrees.to_radians(),
            self.aspect,
            self.params.near_plane_m,
            self.params.far_plane_m,
        )
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position_round_trips() {
        let params = OrbitCameraParams::default();
        let camera = OrbitCamera::new(params.clone(), 16.0 / 9.0);

        let expected = Vec3::from_array(params.position);
        assert!((camera.position() - expected).length() < 1e-4);
        assert_eq!(camera.target(), Vec3::ZERO);
    }

    #[test]
    fn test_polar_angle_clamped() {
        let params = OrbitCameraParams::default();
        let mut camera = OrbitCamera::new(params.clone(), 1.0);

        // Drag far downward: the eye must stay above the horizon limit
        camera.rotate(0.0, -100_000.0);
        assert!(camera.polar_angle() <= params.max_polar_angle);
        assert!(camera.position().y > camera.target().y);

        camera.rotate(0.0, 100_000.0);
        assert!(camera.polar_angle() >= MIN_POLAR_ANGLE);
        assert!(camera.position().is_finite());
    }

    #[test]
    fn test_zoom_respects_distance_limits() {
        let params = OrbitCameraParams::default();
        let mut camera = OrbitCamera::new(params.clone(), 1.0);

        camera.zoom(500.0);
        assert_eq!(camera.distance(), params.min_distance_m);

        camera.zoom(-500.0);
        assert_eq!(camera.distance(), params.max_distance_m);
    }

    #[test]
    fn test_set_viewport_is_idempotent() {
        let mut camera = OrbitCamera::new(OrbitCameraParams::default(), 1.0);

        assert!(camera.set_viewport(1920, 1080));
        let aspect = camera.aspect();
        assert!(!camera.set_viewport(1920, 1080));
        assert_eq!(camera.aspect(), aspect);

        // Minimized windows report zero size; keep the last aspect
        assert!(!camera.set_viewport(0, 0));
        assert_eq!(camera.aspect(), aspect);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let camera = OrbitCamera::new(OrbitCameraParams::default(), 1.5);
        let view_proj = camera.view_proj();

        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);
        assert!(view_proj.is_finite());
    }
}
