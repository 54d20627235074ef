use glam::{Mat3, Quat, Vec3};
use ringrun_common::Pose;

/// Distance the camera trails behind the craft, measured along the
/// camera's own forward direction from the previous tick.
pub const BACK_OFFSET: f32 = 0.01;

/// Fixed vertical lift applied to the camera position.
pub const UP_OFFSET: f32 = 0.002;

/// Chase camera: derives its pose each tick from the craft position.
///
/// The backward offset is computed from the camera's orientation BEFORE
/// this tick's update, which gives the view a one-tick trailing lag when
/// the craft turns. That lag is part of the observable behavior; do not
/// reorder the position and orientation updates.
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    pose: Pose,
}

impl ChaseCamera {
    /// Place the camera behind the craft at setup, seeding the trailing
    /// direction from the craft's initial facing.
    pub fn new(craft: &Pose) -> Self {
        let position = craft.position - craft.forward() * BACK_OFFSET + Vec3::Y * UP_OFFSET;
        let rotation = look_rotation(craft.position - position).unwrap_or(craft.rotation);
        Self {
            pose: Pose { position, rotation },
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Re-derive the camera pose from the craft's (already updated)
    /// position: trail the previous forward, then re-aim at the craft.
    /// Pure look-at, Y-up, no roll, no smoothing.
    pub fn update(&mut self, craft_position: Vec3) {
        let trail = self.pose.forward();
        let position = craft_position - trail * BACK_OFFSET + Vec3::Y * UP_OFFSET;

        // A (near-)vertical aim direction has no well-defined Y-up basis;
        // keep the previous orientation for that frame.
        if let Some(rotation) = look_rotation(craft_position - position) {
            self.pose.rotation = rotation;
        }
        self.pose.position = position;
    }
}

/// Orientation looking along `dir` with +Y as the up reference. `None`
/// when `dir` is degenerate (zero or parallel to +Y).
fn look_rotation(dir: Vec3) -> Option<Quat> {
    let f = dir.try_normalize()?;
    let right = f.cross(Vec3::Y);
    if right.length_squared() < 1e-8 {
        return None;
    }
    let r = right.normalize();
    let u = r.cross(f);
    Some(Quat::from_mat3(&Mat3::from_cols(r, u, -f)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_places_camera_behind_and_above() {
        let craft = Pose::default(); // at origin facing -Z
        let cam = ChaseCamera::new(&craft);
        let p = cam.pose().position;
        assert!((p - Vec3::new(0.0, UP_OFFSET, BACK_OFFSET)).length() < 1e-6);
    }

    #[test]
    fn update_uses_previous_forward_for_the_offset() {
        let craft = Pose::default();
        let mut cam = ChaseCamera::new(&craft);
        let prev_forward = cam.pose().forward();

        let craft_position = Vec3::new(0.0, 0.0, -0.03);
        cam.update(craft_position);

        let expected = craft_position - prev_forward * BACK_OFFSET + Vec3::Y * UP_OFFSET;
        assert!((cam.pose().position - expected).length() < 1e-6);
    }

    #[test]
    fn camera_reaims_at_the_craft() {
        let craft = Pose::default();
        let mut cam = ChaseCamera::new(&craft);
        let craft_position = Vec3::new(0.5, 0.2, -3.0);
        cam.update(craft_position);

        let aim = (craft_position - cam.pose().position).normalize();
        assert!((cam.pose().forward() - aim).length() < 1e-5);
    }

    #[test]
    fn vertical_aim_keeps_previous_orientation() {
        let before = look_rotation(Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert!(look_rotation(Vec3::Y).is_none());
        assert!(look_rotation(Vec3::ZERO).is_none());
        // Sanity: the non-degenerate case produced a unit quaternion.
        assert!((before.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn look_rotation_identity_for_negative_z() {
        let q = look_rotation(Vec3::NEG_Z).unwrap();
        assert!((q * Vec3::NEG_Z - Vec3::NEG_Z).length() < 1e-6);
        assert!((q * Vec3::Y - Vec3::Y).length() < 1e-6);
    }
}
