mod config;
mod input;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use config::Config;
use dotenv::dotenv;
use input::parse_line;
use pickgrade_core::{League, Resolution, ResolveStats, TeamCanonicalizer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// One output record per resolved input line.
#[derive(Debug, Serialize)]
struct OutputRecord<'a> {
    line: usize,
    league: League,
    input: &'a str,
    #[serde(flatten)]
    resolution: &'a Resolution,
}

/// Audit summary logged at the end of a run.
#[derive(Debug, Serialize)]
struct BatchSummary {
    generated_at: DateTime<Utc>,
    rejected_lines: usize,
    leagues: BTreeMap<League, ResolveStats>,
    overall: ResolveStats,
}

fn main() -> Result<()> {
    dotenv().ok();

    // Logs go to stderr; stdout carries the JSON lines
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    info!("Starting team resolver...");

    let config = Config::from_env().context("Failed to load configuration")?;
    for league in config.unbundled_leagues() {
        warn!("No bundled {} team data; set TEAM_DATA_DIR to load it", league);
    }

    let (canon, failures) = TeamCanonicalizer::load_lenient(&config.canon);
    for (league, e) in &failures {
        warn!("League {} unavailable: {}", league, e);
    }
    if canon.is_empty() {
        bail!("No league team data could be loaded");
    }
    info!("Loaded leagues: {:?}", canon.leagues());

    let reader: Box<dyn BufRead> = match &config.input_path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            info!("Reading picks from {}", path.display());
            Box::new(BufReader::new(file))
        }
        None => {
            info!("Reading picks from stdin");
            Box::new(BufReader::new(io::stdin()))
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = run(&canon, reader, &mut out, config.unresolved_sample_limit)?;
    out.flush().context("Failed to flush output")?;

    info!(
        "Resolved {}/{} inputs ({:.1}%), {} rejected lines",
        summary.overall.resolved(),
        summary.overall.total,
        summary.overall.resolution_rate() * 100.0,
        summary.rejected_lines
    );
    if summary.overall.unresolved > 0 {
        warn!(
            "{} unresolved inputs, samples: {:?}",
            summary.overall.unresolved, summary.overall.unresolved_samples
        );
    }
    info!("Summary: {}", serde_json::to_string(&summary)?);

    Ok(())
}

/// Resolve every line of `reader`, writing one JSON record per input.
fn run<R, W>(
    canon: &TeamCanonicalizer,
    reader: R,
    out: &mut W,
    sample_limit: usize,
) -> Result<BatchSummary>
where
    R: BufRead,
    W: Write,
{
    let mut leagues: BTreeMap<League, ResolveStats> = BTreeMap::new();
    let mut rejected_lines = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("Failed to read input line {}", line_no))?;

        let parsed = match parse_line(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(reason) => {
                warn!("Rejected line {}: {}", line_no, reason);
                rejected_lines += 1;
                continue;
            }
        };

        if !canon.contains(parsed.league) {
            warn!("Rejected line {}: league {} not loaded", line_no, parsed.league);
            rejected_lines += 1;
            continue;
        }

        let resolution = canon.resolve(parsed.league, &parsed.raw);
        leagues
            .entry(parsed.league)
            .or_insert_with(|| ResolveStats::new(sample_limit))
            .record(&parsed.raw, &resolution);

        let record = OutputRecord {
            line: line_no,
            league: parsed.league,
            input: &parsed.raw,
            resolution: &resolution,
        };
        serde_json::to_writer(&mut *out, &record)?;
        out.write_all(b"\n")?;
    }

    let mut overall = ResolveStats::new(sample_limit);
    for stats in leagues.values() {
        overall.merge(stats);
    }

    Ok(BatchSummary {
        generated_at: Utc::now(),
        rejected_lines,
        leagues,
        overall,
    })
}
