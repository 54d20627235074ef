//! Input layer: discrete key states sampled once per tick and mapped to
//! steering signals and side-channel commands.
//!
//! # Invariants
//! - The simulation consumes [`ringrun_common::Steer`], never raw key
//!   events; any frontend producing the same signals behaves identically.
//! - The tracker is advanced exactly once per tick, so just-pressed and
//!   just-released fire for exactly one tick per edge.

pub mod keys;
pub mod map;

pub use keys::{Button, KeyTracker};
pub use map::{SideCommand, side_commands, steer};
