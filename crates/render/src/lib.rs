//! Rendering adapter: renderer-agnostic interface over the simulation.
//!
//! # Invariants
//! - Renderers read pose/state snapshots produced earlier in the tick and
//!   never mutate simulation state.
//! - Render output derives entirely from the scene snapshot and the view.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
