use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position + orientation of an entity in 3D space.
///
/// The forward direction is derivable from the rotation; entities never
/// store a separate forward vector that could drift out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    /// Pose at a position with identity orientation (facing -Z).
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Unit forward direction. Identity orientation faces -Z,
    /// matching the right-handed camera convention.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// A handle referencing a mesh uploaded to the render backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// Per-entity material configuration passed to the renderer each frame.
///
/// A plain value, not a callback closing over shared lighting state: the
/// renderer receives everything it needs alongside the pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialDesc {
    pub color: [f32; 4],
    pub shininess: f32,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            color: [0.7, 0.2, 0.4, 1.0],
            shininess: 10.0,
        }
    }
}

/// Renderable binding: mesh + material for one scene entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderBinding {
    pub mesh: MeshHandle,
    pub material: MaterialDesc,
}

/// Mesh handle for the ring (torus) geometry.
pub const RING_MESH: MeshHandle = MeshHandle(0);
/// Mesh handle for the craft geometry.
pub const CRAFT_MESH: MeshHandle = MeshHandle(1);

/// One drawable scene entity: pose + render binding, kept in a single
/// ordered collection shared by the obstacle set and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneEntity {
    pub pose: Pose,
    pub binding: RenderBinding,
}

/// Discrete steering signals sampled once per tick from held keys.
///
/// Each held signal applies a fixed angular increment per tick; the craft
/// kinematics consume this, never raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Steer {
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
}

impl Steer {
    /// No steering input at all this tick.
    pub fn is_neutral(&self) -> bool {
        !(self.pitch_up || self.pitch_down || self.yaw_left || self.yaw_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_default_is_identity() {
        let p = Pose::default();
        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(p.rotation, Quat::IDENTITY);
    }

    #[test]
    fn identity_pose_faces_negative_z() {
        let p = Pose::default();
        assert!((p.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn yawed_pose_turns_forward() {
        let p = Pose {
            position: Vec3::ZERO,
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        };
        // 90 degrees left of -Z is -X
        assert!((p.forward() - Vec3::NEG_X).length() < 1e-5);
    }
}
