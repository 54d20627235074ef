use crate::camera::ChaseCamera;
use crate::collision;
use crate::course::Course;
use crate::craft::Craft;
use ringrun_common::{
    CRAFT_MESH, MaterialDesc, Pose, RING_MESH, RenderBinding, SceneEntity, Steer,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simulation lifecycle flag. Starts at `Running` and transitions at most
/// once, irreversibly, to `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    GameOver,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Running => write!(f, "running"),
            RunState::GameOver => write!(f, "game over"),
        }
    }
}

/// An event record produced by the simulation each tick.
///
/// Drained by the embedding application for tracing and telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SimEvent {
    /// The simulation advanced one tick.
    Stepped { tick: u64 },
    /// A ring was missed and the run ended on this tick.
    Ended { tick: u64 },
}

/// Material for the ring obstacles.
fn ring_material() -> MaterialDesc {
    MaterialDesc::default()
}

/// Material for the craft.
fn craft_material() -> MaterialDesc {
    MaterialDesc {
        color: [0.85, 0.85, 0.9, 1.0],
        shininess: 32.0,
    }
}

/// The per-frame simulation core: craft, chase camera, course, and the
/// run/game-over state machine.
///
/// `step` is the only mutating entry point. Ordering within a tick is
/// fixed: craft kinematics, collision check, chase camera. The camera
/// still re-aims on the tick that detects a collision (the tick began in
/// `Running`); every later call is a no-op and the poses stay frozen.
#[derive(Debug, Clone)]
pub struct FlightSim {
    craft: Craft,
    camera: ChaseCamera,
    course: Course,
    state: RunState,
    tick: u64,
    last_dt: Duration,
    event_log: Vec<SimEvent>,
}

impl FlightSim {
    /// Fresh run over the given course, craft at the origin facing -Z.
    pub fn new(course: Course) -> Self {
        let craft = Craft::default();
        let camera = ChaseCamera::new(&craft.pose());
        Self {
            craft,
            camera,
            course,
            state: RunState::Running,
            tick: 0,
            last_dt: Duration::ZERO,
            event_log: Vec::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn craft_pose(&self) -> Pose {
        self.craft.pose()
    }

    pub fn camera_pose(&self) -> Pose {
        self.camera.pose()
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    /// Elapsed wall time of the most recent tick, for telemetry only; no
    /// motion is scaled by it.
    pub fn last_dt(&self) -> Duration {
        self.last_dt
    }

    /// Read-only access to the pending event log.
    pub fn events(&self) -> &[SimEvent] {
        &self.event_log
    }

    /// Drain and return the pending events.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Advance one tick while `Running`; a no-op once the run has ended.
    pub fn step(&mut self, steer: Steer, dt: Duration) {
        if self.state == RunState::GameOver {
            return;
        }

        self.last_dt = dt;
        self.craft.advance(steer);

        if collision::check(self.craft.pose().position, &self.course) == RunState::GameOver {
            self.state = RunState::GameOver;
            self.event_log.push(SimEvent::Ended { tick: self.tick + 1 });
            tracing::info!(tick = self.tick + 1, "run ended: ring missed");
        }

        self.camera.update(self.craft.pose().position);

        self.tick += 1;
        self.event_log.push(SimEvent::Stepped { tick: self.tick });
    }

    /// Snapshot of all drawable entities as one ordered collection:
    /// the rings in course order, then the craft. Renderers consume this
    /// and never reach back into simulation state.
    pub fn scene(&self) -> Vec<SceneEntity> {
        let mut entities: Vec<SceneEntity> = self
            .course
            .rings()
            .iter()
            .map(|ring| SceneEntity {
                pose: Pose::at(ring.center),
                binding: RenderBinding {
                    mesh: RING_MESH,
                    material: ring_material(),
                },
            })
            .collect();
        entities.push(SceneEntity {
            pose: self.craft.pose(),
            binding: RenderBinding {
                mesh: CRAFT_MESH,
                material: craft_material(),
            },
        });
        entities
    }
}

impl Default for FlightSim {
    fn default() -> Self {
        Self::new(Course::default())
    }
}
