//! Developer tooling: read-only telemetry over a running flight.
//!
//! # Invariants
//! - Tooling only reads snapshots; it never feeds anything back into the
//!   simulation.

pub mod telemetry;

pub use telemetry::{FlightSummary, FlightTelemetry};
