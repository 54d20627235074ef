use glam::{Mat4, Vec3};
use ringrun_common::Pose;

/// Projection parameters for the scene. The eye itself comes from the
/// sim's chase camera each frame; this type only owns the lens.
pub struct SceneCamera {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self {
            fov: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.001,
            far: 1000.0,
        }
    }
}

impl SceneCamera {
    pub fn view_matrix(&self, eye: &Pose) -> Mat4 {
        Mat4::look_at_rh(eye.position, eye.position + eye.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// World-to-clip transform for the given camera pose.
    pub fn view_projection(&self, eye: &Pose) -> Mat4 {
        self.projection_matrix() * self.view_matrix(eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_projection_is_finite() {
        let cam = SceneCamera::default();
        let vp = cam.view_projection(&Pose::at(Vec3::new(0.0, 0.002, 0.01)));
        assert!(!vp.col(0).x.is_nan());
        assert!(vp.is_finite());
    }

    #[test]
    fn point_ahead_projects_in_front() {
        let cam = SceneCamera::default();
        let vp = cam.view_projection(&Pose::default());
        // A point straight down -Z from the identity pose lands on the
        // view axis with positive clip-space w.
        let clip = vp * glam::Vec4::new(0.0, 0.0, -10.0, 1.0);
        assert!(clip.w > 0.0);
        assert!(clip.x.abs() < 1e-3);
    }
}
