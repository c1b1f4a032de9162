//! Orbit camera configuration.

use std::f32::consts::PI;

/// Perspective orbit camera parameters
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCameraParams {
    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    pub far_plane_m: f32,

    /// Initial eye position (meters)
    pub position: [f32; 3],

    /// Orbit target (meters)
    pub target: [f32; 3],

    /// Largest angle from straight up (radians); keeps the eye above the horizon
    pub max_polar_angle: f32,

    /// Closest and farthest orbit distances (meters)
    pub min_distance_m: f32,
    pub max_distance_m: f32,

    /// Orbit rotation per dragged pixel (radians)
    pub rotate_speed: f32,

    /// Distance factor per wheel line
    pub zoom_speed: f32,
}

impl Default for OrbitCameraParams {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near_plane_m: 0.01,
            far_plane_m: 500.0,
            position: [-25.0, 10.0, -4.0],
            target: [0.0, 0.0, 0.0],
            max_polar_angle: PI / 2.2,
            min_distance_m: 1.0,
            max_distance_m: 400.0,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
        }
    }
}
