use pairsim::{respond, ApiConfig, Scenario, ScenarioConfig, SimulateResponse, Status};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(about = "Pairwise inverse-square particle toy")]
struct Args {
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Batch run of a YAML scenario, trajectory printed as JSON
    Run {
        #[arg(short, default_value = "two_body.yaml")]
        file_name: String,
    },
    /// Answer a JSON trajectory request read from a file or stdin
    Respond {
        #[arg(short)]
        file_name: Option<PathBuf>,
        #[arg(long, default_value_t = pairsim::simulation::params::DEFAULT_MAX_WORK)]
        max_work: u64,
    },
    /// Real-time loop: one step per frame with wall-clock dt
    Live {
        #[arg(short, default_value = "charges.yaml")]
        file_name: String,
        #[arg(long, default_value_t = 120)]
        frames: usize,
        #[arg(long, default_value_t = 16)]
        frame_ms: u64,
    },
}

// bare names resolve against the crate's scenarios/ directory
fn load_scenario_from_yaml(file_name: &str) -> Result<Scenario> {
    let given = PathBuf::from(file_name);
    let config_path = if given.exists() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let src = fs::read_to_string(&config_path)
        .with_context(|| format!("reading scenario {}", config_path.display()))?;
    let scenario_cfg = ScenarioConfig::from_yaml(&src)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;

    Ok(Scenario::build_scenario(scenario_cfg)?)
}

fn run(file_name: &str) -> Result<()> {
    let scenario = load_scenario_from_yaml(file_name)?;
    let positions = scenario.run()?;
    println!("{}", serde_json::to_string(&SimulateResponse { positions })?);
    Ok(())
}

fn respond_to(file_name: Option<PathBuf>, max_work: u64) -> Result<()> {
    let raw = match file_name {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("reading request {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading request from stdin")?;
            buf
        }
    };

    let cfg = ApiConfig {
        max_work,
        ..ApiConfig::default()
    };
    let reply = respond(&cfg, &raw, &mut rand::rng());
    println!("{}", reply.body);

    if reply.status == Status::ClientError {
        bail!("request rejected");
    }
    Ok(())
}

fn live(file_name: &str, frames: usize, frame_ms: u64) -> Result<()> {
    let mut scenario = load_scenario_from_yaml(file_name)?;
    let mut rng = scenario.rng();
    let tick = Duration::from_millis(frame_ms);

    let mut last = Instant::now();
    for frame in 0..frames {
        thread::sleep(tick);
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f64();
        last = now;

        scenario.engine.step(&mut scenario.system.bodies, dt, &mut rng)?;
        scenario.system.t += dt;

        let bodies = &scenario.system.bodies;
        let mean_speed = bodies.iter().map(|b| b.v.norm()).sum::<f64>() / bodies.len().max(1) as f64;
        log::debug!("frame {frame}: dt = {dt:.4}, mean speed = {mean_speed:.3}");
    }

    log::info!("live: {} frames, t = {:.3}", frames, scenario.system.t);
    println!("{}", serde_json::to_string(&scenario.system.snapshot())?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    pairsim::logger::init(args.log_level);

    match args.command {
        Command::Run { file_name } => run(&file_name),
        Command::Respond { file_name, max_work } => respond_to(file_name, max_work),
        Command::Live { file_name, frames, frame_ms } => live(&file_name, frames, frame_ms),
    }
}
