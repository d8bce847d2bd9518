use anyhow::{Context, Result};
use cellgene_core::rng::derive_world_seed;
use cellgene_core::world::World;
use cellgene_core::{SimConfig, SimParams};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

const WARMUP_TICKS: usize = 10;
const BENCHMARK_TICKS: usize = 200;
const TARGET_TPS: f64 = 60.0;

#[derive(Parser)]
#[command(name = "cellgene")]
#[command(about = "Headless tile-grid gene simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate a world and run it for a number of ticks
    Run {
        /// Path to config file (JSON); defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for summary.json (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Number of ticks to simulate
        #[arg(long, default_value_t = 1000)]
        steps: usize,

        /// Record metrics every N ticks
        #[arg(long, default_value_t = 100)]
        sample_every: usize,
    },
    /// Measure ticks per second on a few grid sizes
    Benchmark {
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let file = File::open(path).context("failed to open config file")?;
    let reader = BufReader::new(file);
    let config: SimConfig = serde_json::from_reader(reader).context("failed to parse config")?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn run_benchmark(width: u32, height: u32, seed: u64) -> Result<()> {
    let config = SimConfig {
        seed,
        width,
        height,
        params: SimParams {
            population_density: 0.2,
            ..SimParams::default()
        },
    };
    let mut world = World::new(config).context("benchmark config validation error")?;
    world.regenerate();

    for _ in 0..WARMUP_TICKS {
        world.step();
    }

    let start = Instant::now();
    for _ in 0..BENCHMARK_TICKS {
        world.step();
    }
    let elapsed = start.elapsed().as_secs_f64();
    let ticks_per_sec = BENCHMARK_TICKS as f64 / elapsed.max(f64::EPSILON);
    let avg_tick_us = elapsed * 1_000_000.0 / BENCHMARK_TICKS as f64;

    println!("--- {width}x{height} grid ({} tiles) ---", width * height);
    println!("  Avg tick:      {avg_tick_us:.0} us ({ticks_per_sec:.1} ticks/sec)");
    println!(
        "  Population:    {} alive, {} live genes, {} species",
        world.alive_tile_count(),
        world.genes().live_count(),
        world.genes().species_count()
    );
    let verdict = if ticks_per_sec >= TARGET_TPS {
        "GO"
    } else {
        "NO-GO"
    };
    println!("  Verdict:       {verdict} (target: >={TARGET_TPS} ticks/sec)");
    println!();
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SimConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Benchmark { seed } => {
            if cfg!(debug_assertions) {
                warn!("running in debug mode; results are not representative");
            }
            println!("=== cellgene benchmark ===");
            println!("Warmup: {WARMUP_TICKS} ticks, Benchmark: {BENCHMARK_TICKS} ticks");
            println!();

            let sizes = [(64, 64), (128, 128), (256, 256), (512, 512)];
            for (index, (width, height)) in sizes.into_iter().enumerate() {
                run_benchmark(width, height, derive_world_seed(seed, index))?;
            }
        }
        Commands::Run {
            config,
            out,
            steps,
            sample_every,
        } => {
            let sim_config = load_config(config.as_ref())?;
            let mut world = World::new(sim_config).context("config validation error")?;
            world.regenerate();
            info!(
                width = world.width(),
                height = world.height(),
                alive = world.alive_tile_count(),
                steps,
                "simulating"
            );

            let summary = world
                .run_experiment(steps, sample_every)
                .context("invalid experiment parameters")?;

            if let Some(out_dir) = out {
                std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;
                let summary_path = out_dir.join("summary.json");
                let file = File::create(summary_path).context("failed to create summary file")?;
                serde_json::to_writer_pretty(file, &summary).context("failed to write summary")?;
                println!("Run complete. Results saved to {:?}", out_dir);
            } else {
                println!(
                    "Run complete. Final alive: {}, species: {}, births: {}, mutations: {}",
                    summary.final_alive_count,
                    summary.final_species_count,
                    summary.total_births,
                    summary.total_mutations
                );
            }
        }
    }
    Ok(())
}
