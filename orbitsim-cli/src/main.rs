mod camera;
mod viewer;

use clap::{Parser, Subcommand};
use orbitsim_core::{ScenarioConfig, Simulation};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use viewer::OrbitApp;

#[derive(Parser)]
#[command(name = "orbitsim")]
#[command(about = "orbitsim - point masses falling around a fixed central body", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Step a scenario without a window and print body states
    Run {
        /// JSON scenario file (stock scene when omitted)
        #[arg(short, long)]
        scenario: Option<PathBuf>,
        /// Number of ticks to simulate
        #[arg(long, default_value_t = 1000)]
        steps: u64,
        /// Print states every N ticks
        #[arg(long, default_value_t = 100)]
        every: u64,
    },
    /// Open the interactive 3D viewer
    View {
        /// JSON scenario file, reloaded when it changes on disk
        #[arg(short, long)]
        scenario: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            scenario,
            steps,
            every,
        } => run_headless(scenario.as_deref(), steps, every),
        Commands::View { scenario } => run_viewer(scenario),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_scenario(path: Option<&Path>) -> Result<ScenarioConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(ScenarioConfig::load(path)?),
        None => Ok(ScenarioConfig::default()),
    }
}

fn run_headless(
    scenario: Option<&Path>,
    steps: u64,
    every: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_scenario(scenario)?;
    let stdout = io::stdout();
    run_scenario(&config, steps, every, &mut stdout.lock())
}

/// Step `config` for `steps` ticks, writing body states every `every` ticks
fn run_scenario(
    config: &ScenarioConfig,
    steps: u64,
    every: u64,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = config.build_simulation()?;
    let every = every.max(1);

    write_states(out, &sim)?;
    for _ in 0..steps {
        for err in sim.step_once().stalled {
            log::warn!("{}", err);
        }
        if sim.ticks() % every == 0 {
            write_states(out, &sim)?;
        }
    }

    Ok(())
}

fn write_states(out: &mut dyn Write, sim: &Simulation) -> io::Result<()> {
    for slot in sim.bodies() {
        let body = &slot.body;
        writeln!(
            out,
            "t={:.0}s {} pos=({:.6e}, {:.6e}, {:.6e}) vel=({:.6e}, {:.6e}, {:.6e}) r={:.6e}{}",
            sim.elapsed(),
            body.name,
            body.pos.x,
            body.pos.y,
            body.pos.z,
            body.vel.x,
            body.vel.y,
            body.vel.z,
            body.altitude(&sim.constants().central),
            if slot.stalled { " [stalled]" } else { "" }
        )?;
    }
    Ok(())
}

fn run_viewer(scenario: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("orbitsim"),
        ..Default::default()
    };

    eframe::run_native(
        "orbitsim",
        options,
        Box::new(move |cc| Ok(Box::new(OrbitApp::new(scenario, cc)))),
    )?;
    Ok(())
}
