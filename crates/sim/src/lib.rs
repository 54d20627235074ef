//! Flight simulation kernel: per-tick craft kinematics, chase-camera
//! tracking, and the collision/termination state machine.
//!
//! # Invariants
//! - Each tick runs craft kinematics, then the collision checker, then the
//!   chase camera; all observers within a tick see the post-update poses.
//! - The run state transitions at most once, from `Running` to `GameOver`;
//!   after that no craft or camera update occurs.
//! - The course never mutates after construction.

pub mod camera;
pub mod collision;
pub mod course;
pub mod craft;
pub mod flight;

pub use camera::ChaseCamera;
pub use course::{Course, CourseError, Ring};
pub use craft::Craft;
pub use flight::{FlightSim, RunState, SimEvent};
