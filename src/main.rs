use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use cycles_autopilot::arena::ArenaConfig;
use cycles_autopilot::benchmark::{resolve_strategies, run_benchmark, run_match, BenchmarkConfig};
use cycles_autopilot::runner::StopReason;
use cycles_autopilot::strategy::{create_strategy, describe_strategies, strategy_ids};
use cycles_autopilot::util::{parse_seed, parse_seed_csv, seed_sequence, seed_to_hex};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(name = "cycles-autopilot")]
#[command(about = "Autonomous pilots for grid-based light-cycle matches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available pilot strategies
    ListStrategies,
    /// Play one seeded local match
    Run {
        #[arg(long, default_value = "terminator")]
        strategy: String,
        #[arg(long, default_value = "pilot")]
        name: String,
        /// Comma-separated rival strategy ids
        #[arg(long, default_value = "zigzag")]
        rivals: String,
        #[arg(long, default_value_t = 32)]
        width: i32,
        #[arg(long, default_value_t = 32)]
        height: i32,
        #[arg(long, default_value = "0xA57E0001")]
        seed: String,
        #[arg(long, default_value_t = 1_000)]
        max_ticks: u32,
        /// Optional path for the JSON match report
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run every selected strategy across a seed list and rank the results
    Benchmark {
        #[arg(long)]
        strategies: Option<String>,
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 12)]
        seed_count: u32,
        #[arg(long, default_value = "zigzag")]
        rivals: String,
        #[arg(long, default_value_t = 32)]
        width: i32,
        #[arg(long, default_value_t = 32)]
        height: i32,
        #[arg(long, default_value_t = 1_000)]
        max_ticks: u32,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long)]
        jobs: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let Cli { command } = Cli::parse();

    match command {
        Commands::ListStrategies => {
            for (id, description) in describe_strategies() {
                println!("{id:12} {description}");
            }
        }
        Commands::Run {
            strategy,
            name,
            rivals,
            width,
            height,
            seed,
            max_ticks,
            output,
        } => {
            if create_strategy(&strategy).is_none() {
                let available = strategy_ids().join(", ");
                return Err(anyhow!("unknown strategy '{strategy}'. available: {available}"));
            }
            let seed = parse_seed(&seed)?;
            let rivals = split_ids(&rivals)?;

            let outcome = match run_match(
                &strategy,
                &name,
                ArenaConfig {
                    width,
                    height,
                    max_ticks,
                    rivals,
                    seed,
                },
            ) {
                Ok(outcome) => outcome,
                Err(err) => {
                    // Startup/connection failures get their own exit status.
                    tracing::error!(%err, "match could not be started");
                    std::process::exit(2);
                }
            };

            println!("strategy={}", outcome.report.strategy_id);
            println!("pilot={}", outcome.report.pilot_name);
            println!("seed={}", seed_to_hex(seed));
            println!("ticks={}", outcome.report.ticks);
            println!("moves_sent={}", outcome.report.moves_sent);
            println!(
                "moves=north:{},east:{},south:{},west:{}",
                outcome.report.north_moves,
                outcome.report.east_moves,
                outcome.report.south_moves,
                outcome.report.west_moves
            );
            println!("stop_reason={:?}", outcome.report.stop_reason);
            println!("pilot_alive={}", outcome.pilot_alive);
            println!("rivals_alive={}", outcome.rivals_alive);
            println!("won={}", outcome.pilot_won);

            if let Some(path) = output {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, serde_json::to_vec_pretty(&outcome)?)?;
                println!("output={}", path.display());
            }

            if outcome.report.stop_reason == StopReason::SelfMissing {
                return Err(anyhow!("pilot '{name}' vanished from a snapshot mid-match"));
            }
        }
        Commands::Benchmark {
            strategies,
            seeds,
            seed_start,
            seed_count,
            rivals,
            width,
            height,
            max_ticks,
            out_dir,
            jobs,
        } => {
            let strategies = resolve_strategies(strategies.as_deref())?;
            let seeds = resolve_seeds(seeds.as_deref(), seed_start.as_deref(), seed_count)?;
            let rivals = split_ids(&rivals)?;
            let out_dir =
                out_dir.unwrap_or_else(|| PathBuf::from(format!("benchmarks/{}", timestamp_suffix())));

            let report = run_benchmark(BenchmarkConfig {
                strategies,
                seeds,
                width,
                height,
                rivals,
                max_ticks,
                out_dir: out_dir.clone(),
                jobs,
            })?;

            println!("matches={}", report.match_count);
            println!(
                "jobs={}",
                report
                    .jobs
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "auto".to_string())
            );
            println!("out_dir={}", out_dir.display());
            println!("rankings:");
            for (idx, entry) in report.rankings.iter().enumerate() {
                println!(
                    "  {}. {}  wins={}/{} win_rate={:.0}% survival={:.0}% avg_ticks={:.1}",
                    idx + 1,
                    entry.strategy_id,
                    entry.wins,
                    entry.matches,
                    entry.win_rate * 100.0,
                    entry.survival_rate * 100.0,
                    entry.avg_ticks,
                );
            }
        }
    }

    Ok(())
}

fn split_ids(raw: &str) -> Result<Vec<String>> {
    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        return Err(anyhow!("empty strategy id list"));
    }
    Ok(ids)
}

fn resolve_seeds(seeds: Option<&str>, seed_start: Option<&str>, seed_count: u32) -> Result<Vec<u32>> {
    if let Some(csv) = seeds {
        return parse_seed_csv(csv);
    }
    let start = if let Some(start) = seed_start {
        parse_seed(start)?
    } else {
        0xA57E_0001
    };
    Ok(seed_sequence(start, seed_count))
}

fn timestamp_suffix() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{now}")
}
