use clap::{Parser, Subcommand};
use ringrun_common::Steer;
use ringrun_render::{DebugTextRenderer, RenderView, Renderer};
use ringrun_sim::{FlightSim, RunState};
use ringrun_tools::FlightTelemetry;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ringrun-cli", about = "Headless ringrun flights and course inspection")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and a fresh-run summary
    Info,
    /// Simulate a flight without a window and report the outcome
    Fly {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "500")]
        ticks: u64,
        /// Hold yaw-left for the first N ticks
        #[arg(long, default_value = "0")]
        yaw_left: u64,
        /// Assumed frame time in milliseconds (telemetry only)
        #[arg(long, default_value = "16")]
        dt_ms: u64,
    },
    /// Print the ring course
    Course {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("ringrun-cli v{}", env!("CARGO_PKG_VERSION"));
            let sim = FlightSim::default();
            println!("{}", FlightTelemetry::summary(&sim));
        }
        Commands::Fly {
            ticks,
            yaw_left,
            dt_ms,
        } => {
            let mut sim = FlightSim::default();
            let dt = Duration::from_millis(dt_ms);
            for tick in 0..ticks {
                let steer = Steer {
                    yaw_left: tick < yaw_left,
                    ..Steer::default()
                };
                sim.step(steer, dt);
                if sim.state() == RunState::GameOver {
                    break;
                }
            }

            let renderer = DebugTextRenderer::new();
            print!("{}", renderer.render(&sim, &RenderView::from_sim(&sim)));
            println!("{}", FlightTelemetry::summary(&sim));
            match sim.state() {
                RunState::Running => println!("Outcome: still flying after {} ticks", sim.tick()),
                RunState::GameOver => println!("Outcome: ring missed on tick {}", sim.tick()),
            }
        }
        Commands::Course { json } => {
            let sim = FlightSim::default();
            if json {
                println!("{}", serde_json::to_string_pretty(sim.course())?);
            } else {
                for (i, ring) in sim.course().rings().iter().enumerate() {
                    let c = ring.center;
                    println!("ring[{i}] center=({:.2}, {:.2}, {:.2})", c.x, c.y, c.z);
                }
            }
        }
    }

    Ok(())
}
