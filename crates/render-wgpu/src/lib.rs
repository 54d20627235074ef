//! wgpu render backend for the ringrun demo.
//!
//! Draws the ring course as instanced tori, the craft as a small dart, and
//! a distance-faded floor strip that marks the course axis. Per-entity
//! materials arrive as plain instance data each frame.
//!
//! # Invariants
//! - The renderer never mutates simulation state.
//! - The view is derived from the sim's chase-camera pose; the backend has
//!   no camera motion of its own.

mod camera;
mod gpu;
mod shaders;

pub use camera::SceneCamera;
pub use gpu::WgpuRenderer;
