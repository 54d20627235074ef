//! Shared value types for the ringrun demo.
//!
//! # Invariants
//! - A `Pose` is owned by exactly one entity and mutated only by that
//!   entity's own update step.
//! - Render bindings and materials are plain values, never live references
//!   into simulation state.

pub mod types;

pub use types::{
    CRAFT_MESH, MaterialDesc, MeshHandle, Pose, RING_MESH, RenderBinding, SceneEntity, Steer,
};
