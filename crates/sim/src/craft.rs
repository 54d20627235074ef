use glam::{EulerRot, Quat};
use ringrun_common::{Pose, Steer};

/// Forward distance covered per tick. Constant speed, no acceleration.
pub const FORWARD_STEP: f32 = 0.03;

/// Angular increment in radians applied per tick per held steering signal.
/// Fixed per tick rather than scaled by elapsed time, so turn rate is
/// frame-rate-dependent (known inconsistency, kept for fidelity).
pub const TURN_STEP: f32 = 0.005;

/// The player craft: owns its pose and advances it each tick from the
/// sampled steering input.
#[derive(Debug, Clone)]
pub struct Craft {
    pose: Pose,
    yaw: f32,
    pitch: f32,
}

impl Craft {
    /// Craft at the given pose. Yaw and pitch accumulators start at zero;
    /// the pose rotation is treated as the zero reference only when it is
    /// identity, which is how every run starts.
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Advance one tick: translate forward along the current facing, then
    /// fold in this tick's rotation increments. The new orientation takes
    /// effect on the next tick's translation.
    ///
    /// Total function: no error conditions, one pose transition per call.
    pub fn advance(&mut self, steer: Steer) {
        self.pose.position += self.pose.forward() * FORWARD_STEP;

        if steer.yaw_left {
            self.yaw += TURN_STEP;
        }
        if steer.yaw_right {
            self.yaw -= TURN_STEP;
        }
        if steer.pitch_up {
            self.pitch += TURN_STEP;
        }
        if steer.pitch_down {
            self.pitch -= TURN_STEP;
        }

        // Yaw about the vertical axis, then pitch about the lateral axis.
        self.pose.rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
    }
}

impl Default for Craft {
    fn default() -> Self {
        Self::new(Pose::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn straight_flight_covers_forward_step_per_tick() {
        let mut craft = Craft::default();
        for _ in 0..100 {
            craft.advance(Steer::default());
        }
        let p = craft.pose().position;
        assert!((p.z - (-100.0 * FORWARD_STEP)).abs() < 1e-4);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn yaw_left_bends_the_path_toward_negative_x() {
        let mut craft = Craft::default();
        for _ in 0..200 {
            craft.advance(Steer {
                yaw_left: true,
                ..Steer::default()
            });
        }
        // Identity forward is -Z; a left (counterclockwise about +Y) turn
        // swings the heading toward -X.
        assert!(craft.pose().position.x < -1e-3);
    }

    #[test]
    fn pitch_up_raises_the_craft() {
        let mut craft = Craft::default();
        for _ in 0..200 {
            craft.advance(Steer {
                pitch_up: true,
                ..Steer::default()
            });
        }
        assert!(craft.pose().position.y > 1e-3);
    }

    #[test]
    fn rotation_applies_after_translation_within_a_tick() {
        let mut craft = Craft::default();
        craft.advance(Steer {
            yaw_left: true,
            ..Steer::default()
        });
        // First tick translated along the pre-rotation facing (-Z).
        let p = craft.pose().position;
        assert_eq!(p.x, 0.0);
        assert!((p.z + FORWARD_STEP).abs() < 1e-6);
        // But the orientation already carries the increment.
        assert!(craft.pose().forward().x < 0.0);
    }

    #[test]
    fn opposite_signals_cancel() {
        let mut craft = Craft::default();
        for _ in 0..50 {
            craft.advance(Steer {
                yaw_left: true,
                yaw_right: true,
                ..Steer::default()
            });
        }
        let f = craft.pose().forward();
        assert!((f - Vec3::NEG_Z).length() < 1e-5);
    }
}
