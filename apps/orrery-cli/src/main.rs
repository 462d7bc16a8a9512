use clap::{Parser, Subcommand};
use orrery_kernel::{Body, BodySnapshot, DEFAULT_DAY_STEP, DEFAULT_START_DAY, SceneState};
use orrery_render::{DebugTextRenderer, LookAtCamera, Renderer};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orrery-cli", about = "Headless tool for orrery scene inspection")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Advance the scene and print body positions
    Simulate {
        /// Number of frames to advance
        #[arg(short, long, default_value = "24")]
        frames: u64,
        /// Simulated day to start from
        #[arg(long, default_value_t = DEFAULT_START_DAY)]
        start_day: f64,
        /// Simulated days added per frame
        #[arg(long, default_value_t = DEFAULT_DAY_STEP)]
        day_step: f64,
        /// Print every Nth frame
        #[arg(short, long, default_value = "1")]
        every: u64,
        /// Body the camera looks at
        #[arg(long, default_value = "moon")]
        look_at: Body,
        /// Emit one JSON object per sample instead of text
        #[arg(long)]
        json: bool,
    },
}

/// One JSON line of `simulate --json` output.
#[derive(Serialize)]
struct Sample {
    frame: u64,
    day: f64,
    bodies: [BodySnapshot; 3],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("orrery-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", orrery_kernel::crate_info());
            println!("render: {}", orrery_render::crate_info());
            println!("input: {}", orrery_input::crate_info());
            println!("capture: {}", orrery_capture::crate_info());
            let scene = SceneState::default();
            println!(
                "defaults: start_day={} day_step={:.6}",
                scene.day(),
                scene.day_step()
            );
        }
        Commands::Simulate {
            frames,
            start_day,
            day_step,
            every,
            look_at,
            json,
        } => {
            anyhow::ensure!(every > 0, "--every must be at least 1");
            let mut scene = SceneState::new(start_day, day_step)?;
            let camera = LookAtCamera::looking_at(look_at);
            let renderer = DebugTextRenderer::new();
            tracing::debug!(frames, start_day, day_step, "simulating");

            for _ in 0..frames {
                scene.advance();
                if scene.frame() % every != 0 {
                    continue;
                }
                if json {
                    let sample = Sample {
                        frame: scene.frame(),
                        day: scene.day(),
                        bodies: scene.snapshot(),
                    };
                    println!("{}", serde_json::to_string(&sample)?);
                } else {
                    print!("{}", renderer.render(&scene, &camera));
                }
            }
        }
    }

    Ok(())
}
