//! Nubscene demo host.
//!
//! Builds the demo scene, attaches the headless backend, replays a pointer
//! trace through the pointer feed from a second thread and runs the
//! scheduler for a fixed duration.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --shapes 20 --duration-ms 2000
//! RUST_LOG=trace cargo run -- --trace pointer.json
//! ```

use std::path::PathBuf;
use std::thread;

use clap::Parser;
use log::{error, info, warn};

use nubscene::game::{DemoStats, TraceStep, build_demo_scene, demo_trace, load_trace};
use nubscene::resources::backend::HeadlessBackend;
use nubscene::resources::sceneconfig::SceneConfig;
use nubscene::{Clock, Scene, Scheduler, SystemClock};

/// Retained-mode 2D scene graph demo
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./scene.ini")]
    config: PathBuf,

    /// How long to run the scheduler, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 1500)]
    duration_ms: u64,

    /// JSON pointer trace to replay. Defaults to a built-in click sequence.
    #[arg(long, value_name = "PATH")]
    trace: Option<PathBuf>,

    /// Number of random circles to add to the scene.
    #[arg(long, value_name = "N", default_value_t = 8)]
    shapes: usize,

    /// Seed for circle placement.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write the effective configuration back to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = SceneConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    if cli.write_config {
        match config.save_to_file() {
            Ok(()) => println!("Configuration written to {}", cli.config.display()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let (width, height) = config.surface_size();
    let mut scheduler = Scheduler::new(&config);
    let mut scene = Scene::new(config);
    let mut rng = fastrand::Rng::with_seed(cli.seed);
    let demo = match build_demo_scene(&mut scene, cli.shapes, &mut rng) {
        Ok(demo) => demo,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    scene.attach_backend(HeadlessBackend::new(width, height));

    let trace: Vec<TraceStep> = match &cli.trace {
        Some(path) => match load_trace(path) {
            Ok(trace) => trace,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => demo_trace(&scene, &demo),
    };
    info!("replaying {} pointer inputs", trace.len());

    let clock = SystemClock::new();
    let sender = scene.pointer_sender();
    let deadline_ms = cli.duration_ms;
    let replay = thread::spawn(move || {
        for step in trace.into_iter().take_while(|step| step.at_ms < deadline_ms) {
            let now = clock.now_ms();
            if step.at_ms > now {
                clock.sleep_ms(step.at_ms - now);
            }
            if sender.send(step.input).is_err() {
                break;
            }
        }
    });

    scheduler.run(&mut scene, &clock, cli.duration_ms);
    if replay.join().is_err() {
        warn!("pointer replay thread panicked");
    }

    let time = scene.time();
    let stats = scene
        .world()
        .get_resource::<DemoStats>()
        .cloned()
        .unwrap_or_default();
    let drawn = scene
        .backend::<HeadlessBackend>()
        .map(|b| b.drawn().len())
        .unwrap_or(0);
    info!(
        "{} ticks, {} frames, {} nodes drawn in the last frame",
        time.tick_count, time.frame_count, drawn
    );
    info!(
        "clicks {}, releases {}, hover ticks {}, hover exits {}, longest hold {} ticks, {} tweens finished",
        stats.clicks,
        stats.releases,
        stats.hover_ticks,
        stats.hover_exits,
        stats.longest_hold,
        stats.tweens_finished
    );
}
