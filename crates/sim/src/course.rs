use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Half-extent of the passable opening on the lateral (x) and vertical (y)
/// axes. An offset at or beyond this value while at the ring's plane is a
/// miss.
pub const PASS_HALF_EXTENT: f32 = 1.0;

/// Depth window around a ring's plane within which the lateral/vertical
/// test applies. Strictly larger than half the per-tick forward step, so a
/// ring plane cannot be stepped over without being sampled.
pub const DEPTH_TOLERANCE: f32 = 0.05;

/// A fixed ring obstacle. The craft must pass within [`PASS_HALF_EXTENT`]
/// of the center on x and y while inside the [`DEPTH_TOLERANCE`] window
/// on z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub center: Vec3,
}

/// Errors raised while constructing a course.
#[derive(Debug, Error)]
pub enum CourseError {
    #[error("course must contain at least one ring")]
    Empty,
    #[error("ring {index} has a non-finite center")]
    NonFinite { index: usize },
}

/// Immutable, ordered set of ring obstacles along the flight path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    rings: Vec<Ring>,
}

/// Lateral/vertical layout of the default nine-ring course. Depth advances
/// by 12 units per ring.
const DEFAULT_LAYOUT: [(f32, f32); 9] = [
    (0.0, 0.0),
    (1.0, 1.8),
    (2.0, 1.2),
    (3.0, 3.0),
    (3.0, 0.0),
    (-2.0, -1.0),
    (-3.0, -3.0),
    (-2.0, -1.2),
    (-1.0, -1.8),
];

impl Course {
    /// Build a course from ring center positions, validating the data once
    /// at setup. After this succeeds the course is total: the per-tick
    /// collision check has no failure modes.
    pub fn new(centers: Vec<Vec3>) -> Result<Self, CourseError> {
        if centers.is_empty() {
            return Err(CourseError::Empty);
        }
        for (index, c) in centers.iter().enumerate() {
            if !c.is_finite() {
                return Err(CourseError::NonFinite { index });
            }
        }
        Ok(Self {
            rings: centers.into_iter().map(|center| Ring { center }).collect(),
        })
    }

    /// Ordered, read-only view of the rings.
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}

impl Default for Course {
    /// The built-in nine-ring course flown by the demo.
    fn default() -> Self {
        let rings = DEFAULT_LAYOUT
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Ring {
                center: Vec3::new(x, y, -12.0 * (i as f32 + 1.0)),
            })
            .collect();
        Self { rings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_course_has_nine_rings() {
        let course = Course::default();
        assert_eq!(course.len(), 9);
        assert_eq!(course.rings()[0].center, Vec3::new(0.0, 0.0, -12.0));
    }

    #[test]
    fn default_course_depth_is_strictly_decreasing() {
        let course = Course::default();
        for pair in course.rings().windows(2) {
            assert!(pair[1].center.z < pair[0].center.z);
        }
    }

    #[test]
    fn empty_course_is_rejected() {
        assert!(matches!(Course::new(vec![]), Err(CourseError::Empty)));
    }

    #[test]
    fn non_finite_center_is_rejected() {
        let err = Course::new(vec![Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)]);
        assert!(matches!(err, Err(CourseError::NonFinite { index: 1 })));
    }

    #[test]
    fn valid_centers_are_accepted_in_order() {
        let centers = vec![Vec3::new(0.0, 0.0, -5.0), Vec3::new(1.0, 0.0, -10.0)];
        let course = Course::new(centers.clone()).unwrap();
        let got: Vec<Vec3> = course.rings().iter().map(|r| r.center).collect();
        assert_eq!(got, centers);
    }
}
