use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use faultscape_terrain::{HeightField, Terrain, TerrainConfig};
use faultscape_view::{CameraAction, CameraMode, Scene, SceneConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "faultscape-cli", about = "Fault-displacement terrain and camera tool")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config (JSON); flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the terrain section of the scene config.
#[derive(Args, Debug, Default)]
struct TerrainArgs {
    /// Vertices along each side of the grid
    #[arg(short, long)]
    resolution: Option<usize>,
    /// Number of fault lines
    #[arg(short, long)]
    faults: Option<usize>,
    /// RNG seed for reproducible terrain
    #[arg(short, long)]
    seed: Option<u64>,
    /// Displacement of the first fault
    #[arg(long)]
    initial_delta: Option<f32>,
    /// Per-fault multiplier on the displacement
    #[arg(long)]
    attenuation: Option<f32>,
}

impl TerrainArgs {
    fn apply(&self, config: &mut TerrainConfig) {
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(faults) = self.faults {
            config.faults = faults;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(delta) = self.initial_delta {
            config.initial_delta = delta;
        }
        if let Some(attenuation) = self.attenuation {
            config.attenuation = attenuation;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Generate a terrain and report or export it
    Generate {
        #[command(flatten)]
        terrain: TerrainArgs,
        /// Write the mesh as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sample the terrain height under a point
    Height {
        #[command(flatten)]
        terrain: TerrainArgs,
        /// Horizontal position in [-1, 1]
        #[arg(allow_negative_numbers = true)]
        x: f32,
        #[arg(allow_negative_numbers = true)]
        y: f32,
    },
    /// Print the model, view and projection matrices for one frame
    Frame {
        #[command(flatten)]
        terrain: TerrainArgs,
        #[arg(long, default_value = "1280")]
        width: u32,
        #[arg(long, default_value = "720")]
        height: u32,
        /// Start in walk mode
        #[arg(long)]
        walk: bool,
        /// Forward steps to take before the frame
        #[arg(long, default_value = "0")]
        steps: usize,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(path) => SceneConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(SceneConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("faultscape-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("math: {}", faultscape_math::crate_info());
            println!("terrain: {}", faultscape_terrain::crate_info());
            println!("view: {}", faultscape_view::crate_info());
        }
        Commands::Generate { terrain, output } => {
            terrain.apply(&mut config.terrain);
            let generated = Terrain::generate(&config.terrain)?;
            let extent = generated.extent();
            println!(
                "Terrain: resolution={}, vertices={}, triangles={}",
                generated.resolution(),
                generated.mesh().vertex_count(),
                generated.mesh().triangle_count()
            );
            println!(
                "Faulted heights: min={:.4}, max={:.4}",
                extent.min.z(),
                extent.max.z()
            );

            if let Some(path) = output {
                let file = std::fs::File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                serde_json::to_writer(&mut writer, generated.mesh())?;
                writer.flush()?;
                tracing::info!(path = %path.display(), "mesh written");
            }
        }
        Commands::Height { terrain, x, y } => {
            terrain.apply(&mut config.terrain);
            let generated = Terrain::generate(&config.terrain)?;
            match generated.height_at(x, y) {
                Some(h) => println!("height({x}, {y}) = {h:.6}"),
                None => anyhow::bail!("({x}, {y}) is outside the terrain"),
            }
        }
        Commands::Frame {
            terrain,
            width,
            height,
            walk,
            steps,
        } => {
            terrain.apply(&mut config.terrain);
            if walk {
                config.camera.mode = CameraMode::Walk;
            }
            let mut scene = Scene::new(&config)?;
            scene.resize(width, height)?;
            let actions = vec![CameraAction::Forward; steps];
            let frame = scene.step(&actions);
            println!("{}", serde_json::to_string_pretty(&frame)?);
        }
    }

    Ok(())
}
