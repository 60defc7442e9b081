use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use maze_core::trace_file::{TraceWriter, load_trace_from_file};
use maze_core::{Agent, DecisionTrace, PolicyConfig, Snapshot, TraceRecord, replay_trace};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a recorded trace and report the first diverging decision
    Verify {
        /// Path to the JSONL trace file
        #[arg(short, long)]
        trace: PathBuf,
        /// TOML policy config overriding the one stored in the trace header
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Play the agent on a text layout and record every decision
    Record {
        /// Text layout: `%` wall, `.` food, `o` capsule, `G` adversary, `P` agent
        #[arg(short, long)]
        layout: PathBuf,
        /// Output JSONL trace file
        #[arg(short, long)]
        out: PathBuf,
        #[arg(long, default_value_t = 100)]
        ticks: u32,
        #[arg(long, default_value_t = 1)]
        episodes: u32,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .init();

    match Args::parse().command {
        Command::Verify { trace, config } => verify(&trace, config.as_deref()),
        Command::Record { layout, out, ticks, episodes, config } => {
            record(&layout, &out, ticks, episodes, config.as_deref())
        }
    }
}

fn load_config(path: &Path) -> Result<PolicyConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: PolicyConfig =
        toml::from_str(&text).with_context(|| format!("invalid config: {}", path.display()))?;
    config.validate().with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(config)
}

fn verify(trace_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let loaded = load_trace_from_file(trace_path)
        .with_context(|| format!("failed to load trace: {}", trace_path.display()))?;
    let mut trace: DecisionTrace = loaded.trace;
    if let Some(path) = config_path {
        trace.config = load_config(path)?;
    }
    tracing::info!(records = trace.records.len(), seed = trace.config.seed, "replaying trace");

    let result = replay_trace(&trace).context("replay failed during execution")?;

    println!("Replay complete.");
    println!("Ticks: {}", result.ticks);
    println!("Episodes: {}", result.episodes);
    println!("Memory Fingerprint: {:016x}", result.final_fingerprint);
    println!("Last Record SHA-256: {}", loaded.last_sha256_hex);

    if let Some(divergence) = result.divergence {
        bail!(
            "diverged at tick {}: recorded {:?}, replayed {:?}",
            divergence.tick,
            divergence.recorded,
            divergence.replayed
        );
    }
    Ok(())
}

fn record(
    layout_path: &Path,
    out: &Path,
    ticks: u32,
    episodes: u32,
    config_path: Option<&Path>,
) -> Result<()> {
    let layout = fs::read_to_string(layout_path)
        .with_context(|| format!("failed to read layout: {}", layout_path.display()))?;
    let start = Snapshot::from_ascii(&layout)
        .with_context(|| format!("invalid layout: {}", layout_path.display()))?;
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => PolicyConfig::default(),
    };

    let mut agent = Agent::new(config.clone())?;
    let mut writer = TraceWriter::create(out, &config)
        .with_context(|| format!("failed to create trace: {}", out.display()))?;
    let forages = !start.food.is_empty() || !start.capsules.is_empty();
    let mut tick = 0u64;

    for episode in 0..episodes {
        let mut snapshot = start.clone();
        for step in 0..ticks {
            let action = agent.get_action(&snapshot)?;
            let next = snapshot.advanced(action);
            let cleared = forages && next.food.is_empty() && next.capsules.is_empty();
            let episode_end = cleared || step + 1 == ticks;
            writer.append(&TraceRecord { tick, snapshot, action, episode_end })?;
            tick += 1;
            snapshot = next;
            if episode_end {
                break;
            }
        }
        agent.end_episode(&snapshot);
        tracing::info!(episode, ticks = tick, "episode recorded");
    }

    println!("Recorded {} decisions to {}", writer.records_written(), out.display());
    Ok(())
}
