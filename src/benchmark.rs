//! Multi-seed strategy benchmark: every selected strategy plays the same
//! seeded matches, results are aggregated and written as CSV plus JSON.

use crate::arena::{Arena, ArenaConfig};
use crate::runner::{Pilot, RunReport, StopReason};
use crate::strategy::{create_strategy, strategy_ids};
use crate::util::seed_to_hex;
use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub strategies: Vec<String>,
    pub seeds: Vec<u32>,
    pub width: i32,
    pub height: i32,
    pub rivals: Vec<String>,
    pub max_ticks: u32,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MatchOutcome {
    pub report: RunReport,
    pub pilot_won: bool,
    pub pilot_alive: bool,
    pub rivals_alive: usize,
    pub arena_ticks: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct MatchRecord {
    pub strategy_id: String,
    pub seed: u32,
    pub seed_hex: String,
    pub ticks: u32,
    pub moves_sent: u32,
    pub stop_reason: StopReason,
    pub pilot_won: bool,
    pub pilot_survived: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct StrategyAggregate {
    pub strategy_id: String,
    pub matches: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub survival_rate: f64,
    pub avg_ticks: f64,
    pub max_ticks: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub max_ticks: u32,
    pub jobs: Option<usize>,
    pub strategies: Vec<String>,
    pub seeds: Vec<u32>,
    pub match_count: usize,
    pub rankings: Vec<StrategyAggregate>,
    pub matches: Vec<MatchRecord>,
}

pub fn resolve_strategies(input: Option<&str>) -> Result<Vec<String>> {
    match input {
        None => Ok(strategy_ids().iter().map(|id| (*id).to_string()).collect()),
        Some(raw) => {
            let mut strategies = Vec::new();
            for token in raw.split(',') {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                strategies.push(token.to_string());
            }
            if strategies.is_empty() {
                return Err(anyhow!("--strategies resolved to empty list"));
            }
            Ok(strategies)
        }
    }
}

/// Plays one full arena match with `strategy_id` at the helm.
pub fn run_match(
    strategy_id: &str,
    pilot_name: &str,
    config: ArenaConfig,
) -> Result<MatchOutcome> {
    let strategy =
        create_strategy(strategy_id).ok_or_else(|| anyhow!("unknown strategy '{strategy_id}'"))?;
    let arena = Arena::connect(pilot_name, config)?;
    let mut pilot = Pilot::new(arena, pilot_name, strategy)?;
    let report = pilot.run()?;
    let arena = pilot.into_transport();

    Ok(MatchOutcome {
        pilot_won: arena.pilot_won(),
        pilot_alive: arena.pilot_alive(),
        rivals_alive: arena.rivals_alive(),
        arena_ticks: arena.tick(),
        report,
    })
}

pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }
    if config.strategies.is_empty() {
        return Err(anyhow!("benchmark requires at least one strategy"));
    }
    if let Some(jobs) = config.jobs {
        if jobs == 0 {
            return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
        }
    }
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let match_jobs: Vec<(String, u32)> = config
        .strategies
        .iter()
        .flat_map(|strategy| config.seeds.iter().map(move |seed| (strategy.clone(), *seed)))
        .collect();

    let run_one = |(strategy_id, seed): &(String, u32)| -> Result<MatchRecord> {
        let outcome = run_match(
            strategy_id,
            "pilot",
            ArenaConfig {
                width: config.width,
                height: config.height,
                max_ticks: config.max_ticks,
                rivals: config.rivals.clone(),
                seed: *seed,
            },
        )
        .with_context(|| format!("match failed for strategy={strategy_id} seed={seed:#x}"))?;

        Ok(MatchRecord {
            strategy_id: strategy_id.clone(),
            seed: *seed,
            seed_hex: seed_to_hex(*seed),
            ticks: outcome.report.ticks,
            moves_sent: outcome.report.moves_sent,
            stop_reason: outcome.report.stop_reason,
            pilot_won: outcome.pilot_won,
            pilot_survived: outcome.pilot_alive,
        })
    };

    let match_results: Vec<Result<MatchRecord>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| match_jobs.par_iter().map(run_one).collect())
    } else {
        match_jobs.par_iter().map(run_one).collect()
    };

    let mut matches = Vec::with_capacity(match_results.len());
    for result in match_results {
        matches.push(result?);
    }

    let mut grouped: HashMap<String, Vec<&MatchRecord>> = HashMap::new();
    for record in &matches {
        grouped
            .entry(record.strategy_id.clone())
            .or_default()
            .push(record);
    }

    let mut rankings = Vec::new();
    for (strategy_id, records) in grouped {
        let count = records.len();
        let wins = records.iter().filter(|r| r.pilot_won).count();
        let survived = records.iter().filter(|r| r.pilot_survived).count();
        let sum_ticks: u64 = records.iter().map(|r| r.ticks as u64).sum();
        let max_ticks = records.iter().map(|r| r.ticks).max().unwrap_or_default();

        rankings.push(StrategyAggregate {
            strategy_id,
            matches: count,
            wins,
            win_rate: wins as f64 / count as f64,
            survival_rate: survived as f64 / count as f64,
            avg_ticks: sum_ticks as f64 / count as f64,
            max_ticks,
        });
    }

    rankings.sort_by(|a, b| {
        b.win_rate
            .total_cmp(&a.win_rate)
            .then_with(|| b.survival_rate.total_cmp(&a.survival_rate))
            .then_with(|| b.avg_ticks.total_cmp(&a.avg_ticks))
    });

    matches.sort_by(|a, b| {
        a.strategy_id
            .cmp(&b.strategy_id)
            .then_with(|| a.seed.cmp(&b.seed))
    });

    write_matches_csv(&config.out_dir.join("runs.csv"), &matches)?;
    write_rankings_csv(&config.out_dir.join("rankings.csv"), &rankings)?;

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        max_ticks: config.max_ticks,
        jobs: config.jobs,
        strategies: config.strategies,
        seeds: config.seeds,
        match_count: matches.len(),
        rankings,
        matches,
    };

    let report_path = config.out_dir.join("summary.json");
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&report).context("failed to serialize summary json")?,
    )
    .with_context(|| format!("failed writing {}", report_path.display()))?;

    Ok(report)
}

fn write_matches_csv(path: &Path, rows: &[MatchRecord]) -> Result<()> {
    let mut csv =
        String::from("strategy_id,seed_hex,seed,ticks,moves_sent,stop_reason,pilot_won,pilot_survived\n");
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{:?},{},{}\n",
            row.strategy_id,
            row.seed_hex,
            row.seed,
            row.ticks,
            row.moves_sent,
            row.stop_reason,
            row.pilot_won,
            row.pilot_survived
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}

fn write_rankings_csv(path: &Path, rows: &[StrategyAggregate]) -> Result<()> {
    let mut csv =
        String::from("rank,strategy_id,matches,wins,win_rate,survival_rate,avg_ticks,max_ticks\n");
    for (idx, row) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{},{:.4},{:.4},{:.2},{}\n",
            idx + 1,
            row.strategy_id,
            row.matches,
            row.wins,
            row.win_rate,
            row.survival_rate,
            row.avg_ticks,
            row.max_ticks
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}
