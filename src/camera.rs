//! Camera for the consuming renderer.
//!
//! The simulation itself is camera-agnostic; this orbit camera exists so the
//! render collaborator has a ready-made view-projection over the glyph, and so
//! viewport resizes have somewhere to land without touching particle state.

use glam::{Mat4, Vec3};

/// Orbit camera looking at the glyph plane.
#[derive(Debug)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport aspect ratio (width / height).
    aspect: f32,
}

impl Camera {
    /// Create a camera with default positioning for a `world_width`-sized
    /// glyph.
    pub fn new(world_width: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: world_width * 1.4,
            target: Vec3::ZERO,
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect: 16.0 / 9.0,
        }
    }

    /// Update the aspect ratio from a viewport size in pixels.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }

    /// Current aspect ratio.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// The camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// View matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Combined view-projection matrix for draw submission.
    pub fn view_proj(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, 0.1, 100.0) * self.view_matrix()
    }
}
