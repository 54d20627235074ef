use ringrun_sim::{FlightSim, RunState};

/// Read-only telemetry queries against a flight in progress.
///
/// Backs the debug overlay and the CLI output: frame time, run state, and
/// pose readouts.
pub struct FlightTelemetry;

impl FlightTelemetry {
    /// Produce a summary of the current tick.
    pub fn summary(sim: &FlightSim) -> FlightSummary {
        let craft = sim.craft_pose().position;
        let camera = sim.camera_pose().position;
        FlightSummary {
            tick: sim.tick(),
            state: sim.state(),
            frame_ms: sim.last_dt().as_secs_f32() * 1000.0,
            craft_position: [craft.x, craft.y, craft.z],
            camera_position: [camera.x, camera.y, camera.z],
            rings: sim.course().len(),
        }
    }
}

/// Snapshot of the simulation for display surfaces.
#[derive(Debug, Clone)]
pub struct FlightSummary {
    pub tick: u64,
    pub state: RunState,
    pub frame_ms: f32,
    pub craft_position: [f32; 3],
    pub camera_position: [f32; 3],
    pub rings: usize,
}

impl FlightSummary {
    /// Text shown by the overlay's run-state banner; empty while running.
    pub fn banner(&self) -> &'static str {
        match self.state {
            RunState::Running => "",
            RunState::GameOver => "GAME OVER",
        }
    }
}

impl std::fmt::Display for FlightSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tick={} state={} frame={:.3}ms craft=({:.2}, {:.2}, {:.2}) rings={}",
            self.tick,
            self.state,
            self.frame_ms,
            self.craft_position[0],
            self.craft_position[1],
            self.craft_position[2],
            self.rings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use ringrun_common::Steer;
    use ringrun_sim::Course;
    use std::time::Duration;

    #[test]
    fn summary_of_fresh_run() {
        let summary = FlightTelemetry::summary(&FlightSim::default());
        assert_eq!(summary.tick, 0);
        assert_eq!(summary.state, RunState::Running);
        assert_eq!(summary.rings, 9);
        assert_eq!(summary.banner(), "");
    }

    #[test]
    fn summary_reflects_frame_time() {
        let mut sim = FlightSim::default();
        sim.step(Steer::default(), Duration::from_millis(16));
        let summary = FlightTelemetry::summary(&sim);
        assert_eq!(summary.tick, 1);
        assert!((summary.frame_ms - 16.0).abs() < 0.5);
    }

    #[test]
    fn banner_appears_on_game_over() {
        let mut sim =
            FlightSim::new(Course::new(vec![Vec3::new(0.0, 2.0, -0.03)]).unwrap());
        sim.step(Steer::default(), Duration::from_millis(16));
        let summary = FlightTelemetry::summary(&sim);
        assert_eq!(summary.state, RunState::GameOver);
        assert_eq!(summary.banner(), "GAME OVER");
        assert!(summary.to_string().contains("game over"));
    }
}
