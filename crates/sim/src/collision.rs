use crate::course::{Course, DEPTH_TOLERANCE, PASS_HALF_EXTENT};
use crate::flight::RunState;
use glam::Vec3;

/// Evaluate the craft position against every ring in the course.
///
/// A ring is "at" the craft when the depth offset is strictly inside
/// [`DEPTH_TOLERANCE`]; the run then fails when the lateral or vertical
/// offset reaches [`PASS_HALF_EXTENT`] (boundary value included). Every
/// ring is tested every call with no early break; the outcome is a one-way
/// flag, so multiple violations in the same tick are idempotent.
///
/// There is no passed/not-yet-reached bookkeeping: a ring whose depth the
/// craft revisits would trigger again.
pub fn check(craft_position: Vec3, course: &Course) -> RunState {
    let mut state = RunState::Running;
    for ring in course.rings() {
        let d = craft_position - ring.center;
        if d.z.abs() < DEPTH_TOLERANCE
            && (d.x.abs() >= PASS_HALF_EXTENT || d.y.abs() >= PASS_HALF_EXTENT)
        {
            state = RunState::GameOver;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_ring() -> Course {
        Course::new(vec![Vec3::new(0.0, 0.0, -12.0)]).unwrap()
    }

    #[test]
    fn centered_pass_keeps_running() {
        let state = check(Vec3::new(0.0, 0.0, -12.0), &single_ring());
        assert_eq!(state, RunState::Running);
    }

    #[test]
    fn lateral_miss_at_ring_depth_ends_the_run() {
        let state = check(Vec3::new(1.2, 0.0, -12.0), &single_ring());
        assert_eq!(state, RunState::GameOver);
    }

    #[test]
    fn small_lateral_offset_passes() {
        let state = check(Vec3::new(0.5, 0.0, -12.0), &single_ring());
        assert_eq!(state, RunState::Running);
    }

    #[test]
    fn vertical_miss_also_ends_the_run() {
        let state = check(Vec3::new(0.0, -1.5, -12.0), &single_ring());
        assert_eq!(state, RunState::GameOver);
    }

    #[test]
    fn offset_exactly_at_threshold_is_a_miss() {
        let state = check(Vec3::new(PASS_HALF_EXTENT, 0.0, -12.0), &single_ring());
        assert_eq!(state, RunState::GameOver);
    }

    #[test]
    fn just_under_threshold_passes() {
        let state = check(
            Vec3::new(PASS_HALF_EXTENT - 1e-4, 0.0, -12.0),
            &single_ring(),
        );
        assert_eq!(state, RunState::Running);
    }

    #[test]
    fn off_axis_outside_depth_window_is_ignored() {
        // Way off center, but nowhere near the ring's plane.
        let state = check(Vec3::new(5.0, 5.0, -6.0), &single_ring());
        assert_eq!(state, RunState::Running);

        // Outside the depth window the lateral test never applies.
        let state = check(
            Vec3::new(5.0, 0.0, -12.0 + 2.0 * DEPTH_TOLERANCE),
            &single_ring(),
        );
        assert_eq!(state, RunState::Running);
    }

    #[test]
    fn every_ring_is_tested() {
        let course = Course::new(vec![
            Vec3::new(0.0, 0.0, -12.0),
            Vec3::new(0.0, 0.0, -24.0),
        ])
        .unwrap();
        // Misses the second ring even though the first is long gone.
        let state = check(Vec3::new(2.0, 0.0, -24.0), &course);
        assert_eq!(state, RunState::GameOver);
    }
}
