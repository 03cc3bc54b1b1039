//! Orbiting camera.
//!
//! The eye circles the origin at `radius` on the XZ plane. `theta` fixes the
//! start angle, `alpha` is the user-controlled azimuth offset. Angles are
//! plain radians.

use billboard_engine::math::{identity_matrix, mul_matrix, projection_matrix, view_matrix};
use glam::{Mat4, Vec3};

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    position: Vec3,
    target: Vec3,
    radius: f32,
    interval: f32,
    theta: f32,
    alpha: f32,
    auto_rotate: bool,
    view: Mat4,
    projection: Mat4,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, -4.0),
            target: Vec3::ZERO,
            radius: 4.0,
            interval: 0.025,
            theta: 5.0,
            alpha: 90.0,
            auto_rotate: false,
            view: identity_matrix(),
            projection: identity_matrix(),
        }
    }
}

impl OrbitCamera {
    /// Moves the eye onto the orbit, rebuilds the view matrix and, with
    /// auto-rotation on, advances the azimuth by one step.
    pub fn update(&mut self) {
        let x = self.radius * self.theta.cos();
        let z = self.radius * self.theta.sin();
        let (sin_a, cos_a) = self.alpha.sin_cos();
        self.position.x = z * cos_a - x * sin_a;
        self.position.z = x * cos_a + z * sin_a;

        // Target Y and Z are swapped; both are zero by default.
        let at = Vec3::new(self.target.x, self.target.z, self.target.y);
        self.view = view_matrix(self.position, at, Vec3::Y);

        if self.auto_rotate {
            self.alpha += self.interval;
        }
    }

    pub fn set_projection(&mut self, fov_y_degrees: f32, aspect: f32, near: f32, far: f32) {
        self.projection = projection_matrix(fov_y_degrees, aspect, near, far);
    }

    pub fn view_projection(&self) -> Mat4 {
        mul_matrix(self.view, self.projection)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn move_forward(&mut self) {
        self.radius -= 2.0 * self.interval;
    }

    pub fn move_backward(&mut self) {
        self.radius += 2.0 * self.interval;
    }

    pub fn orbit_left(&mut self) {
        self.alpha += self.interval;
    }

    pub fn orbit_right(&mut self) {
        self.alpha -= self.interval;
    }

    pub fn raise(&mut self) {
        self.position.y += 2.0 * self.interval;
    }

    pub fn lower(&mut self) {
        self.position.y -= 2.0 * self.interval;
    }

    /// Flips auto-rotation and returns the new state.
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }
}
