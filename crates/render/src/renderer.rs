use glam::Vec3;
use ringrun_sim::FlightSim;

/// Camera/view configuration handed to a renderer for one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl RenderView {
    /// View derived from the sim's chase camera for the current tick.
    pub fn from_sim(sim: &FlightSim) -> Self {
        let cam = sim.camera_pose();
        Self {
            eye: cam.position,
            target: cam.position + cam.forward(),
            fov_degrees: 60.0,
        }
    }
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 6.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
        }
    }
}

/// Renderer-agnostic interface. All backends implement this trait.
///
/// A renderer reads the simulation snapshot and a view, then produces its
/// output. It never mutates the sim — the flight controller owns the truth.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given sim snapshot and view.
    fn render(&self, sim: &FlightSim, view: &RenderView) -> Self::Output;
}

/// Text renderer for CLI output, logging, and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, sim: &FlightSim, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Flight (tick={}, state={}) ===\n",
            sim.tick(),
            sim.state()
        ));
        let craft = sim.craft_pose().position;
        out.push_str(&format!(
            "Craft: ({:.2}, {:.2}, {:.2})\n",
            craft.x, craft.y, craft.z
        ));
        out.push_str(&format!(
            "Camera: eye=({:.3}, {:.3}, {:.3}) target=({:.3}, {:.3}, {:.3}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        for (i, ring) in sim.course().rings().iter().enumerate() {
            let c = ring.center;
            out.push_str(&format!(
                "  ring[{i}] center=({:.2}, {:.2}, {:.2})\n",
                c.x, c.y, c.z
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringrun_common::Steer;
    use ringrun_sim::{Course, RunState};
    use std::time::Duration;

    #[test]
    fn debug_renderer_fresh_run() {
        let sim = FlightSim::default();
        let output = DebugTextRenderer::new().render(&sim, &RenderView::from_sim(&sim));

        assert!(output.contains("tick=0"));
        assert!(output.contains("state=running"));
        assert!(output.contains("ring[8]"));
    }

    #[test]
    fn debug_renderer_reports_game_over() {
        let mut sim = FlightSim::new(
            Course::new(vec![Vec3::new(0.0, 2.0, -0.03)]).unwrap(),
        );
        sim.step(Steer::default(), Duration::from_millis(16));
        assert_eq!(sim.state(), RunState::GameOver);

        let output = DebugTextRenderer::new().render(&sim, &RenderView::from_sim(&sim));
        assert!(output.contains("state=game over"));
    }

    #[test]
    fn view_follows_the_chase_camera() {
        let mut sim = FlightSim::default();
        for _ in 0..5 {
            sim.step(Steer::default(), Duration::from_millis(16));
        }
        let view = RenderView::from_sim(&sim);
        assert_eq!(view.eye, sim.camera_pose().position);
        let aim = (view.target - view.eye).normalize();
        assert!((aim - sim.camera_pose().forward()).length() < 1e-5);
    }
}
