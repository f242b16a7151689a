use std::{collections::HashMap, path::PathBuf};

use anyhow::bail;
use clap::{Parser, Subcommand};
use rand::rngs::ThreadRng;

use roleta_core::{
    decompose, derive_hash_hex, spin_once, spin_with_seeds, EngineParams, RngSource, SpinOutcome,
};
use roleta_shared::{ReplayReport, SpinLogEntry, SpinResponse};

#[derive(Parser)]
#[command(name = "roleta-cli", about = "Inspect and simulate the roleta prize engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the prize table with its effective odds, symbols and fixed decompositions
    Table,
    /// Run many spins and compare observed frequencies with the effective odds
    Simulate {
        #[arg(long, default_value_t = 100_000)]
        spins: u64,
        /// Use the provably-fair stream (nonce 1..=spins) instead of the thread RNG
        #[arg(long, env = "ROLETA_SERVER_SEED")]
        server_seed: Option<String>,
        #[arg(long, env = "ROLETA_CLIENT_SEED")]
        client_seed: Option<String>,
        /// Write every spin to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Reproduce one provably-fair spin
    Replay {
        #[arg(long, env = "ROLETA_SERVER_SEED")]
        server_seed: String,
        #[arg(long, env = "ROLETA_CLIENT_SEED")]
        client_seed: String,
        #[arg(long)]
        nonce: u64,
        /// Fail unless the replayed reels equal these, in display order
        #[arg(long, num_args = 3, value_name = "REEL")]
        expect_reels: Option<Vec<f64>>,
    },
    /// Split a value into three reel symbols
    Decompose {
        value: f64,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn to_response(outcome: SpinOutcome) -> SpinResponse {
    SpinResponse {
        total_label: outcome.total_label,
        total_value: outcome.total_value,
        reels: outcome.reels,
    }
}

fn print_table(params: &EngineParams) {
    let odds = params.prizes.effective_odds(&params.fallback);
    println!("{:<12} {:>9} {:>11} {:>8}", "prize", "chance%", "effective%", "value");
    for (entry, eff) in params.prizes.entries().iter().zip(&odds.entries) {
        println!(
            "{:<12} {:>9.2} {:>11.4} {:>8.2}",
            entry.label,
            entry.chance_percent,
            eff.probability * 100.0,
            entry.value
        );
    }
    println!(
        "{:<12} {:>9} {:>11.4} {:>8.2}",
        format!("{} (fallback)", params.fallback.label),
        "-",
        odds.fallback_probability * 100.0,
        params.fallback.value
    );
    println!("expected payout per spin: {:.4}", odds.expected_value);
    println!("symbols: {:?}", params.symbols.values());
    for (target, reels) in params.decompositions.entries() {
        println!("  {target:>6} = {reels:?}");
    }
}

fn simulate(
    params: &EngineParams,
    spins: u64,
    seeds: Option<(String, String)>,
    csv: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut thread: RngSource<ThreadRng> = RngSource::thread();
    let mut wtr = match &csv {
        Some(path) => Some(csv::Writer::from_path(path)?),
        None => None,
    };

    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut total_payout = 0.0;
    for n in 1..=spins {
        let outcome = match &seeds {
            Some((server, client)) => spin_with_seeds(server, client, n, params),
            None => spin_once(&mut thread, params),
        };
        total_payout += outcome.total_value;
        *counts.entry(outcome.total_label.clone()).or_default() += 1;
        if let Some(w) = wtr.as_mut() {
            w.serialize(SpinLogEntry::new(n, &to_response(outcome)))?;
        }
    }
    if let Some(mut w) = wtr {
        w.flush()?;
    }

    // labels can repeat (the fallback shares its label with the last entry)
    let odds = params.prizes.effective_odds(&params.fallback);
    let mut expected: Vec<(String, f64)> = Vec::new();
    let labelled = odds
        .entries
        .iter()
        .map(|e| (&e.label, e.probability))
        .chain(std::iter::once((&params.fallback.label, odds.fallback_probability)));
    for (label, p) in labelled {
        match expected.iter_mut().find(|(l, _)| l == label) {
            Some((_, acc)) => *acc += p,
            None => expected.push((label.clone(), p)),
        }
    }

    println!("{:<12} {:>9} {:>10} {:>10}", "prize", "count", "observed%", "expected%");
    for (label, p) in &expected {
        let count = counts.get(label).copied().unwrap_or(0);
        println!(
            "{:<12} {:>9} {:>10.4} {:>10.4}",
            label,
            count,
            count as f64 * 100.0 / spins.max(1) as f64,
            p * 100.0
        );
    }
    println!(
        "mean payout {:.4} (expected {:.4}) over {} spins",
        total_payout / spins.max(1) as f64,
        odds.expected_value,
        spins
    );
    if let Some(path) = csv {
        println!("Exported {} rows to {}", spins, path.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let params = EngineParams::standard();
    params.validate()?;

    match cli.command {
        Commands::Table => print_table(&params),
        Commands::Simulate {
            spins,
            server_seed,
            client_seed,
            csv,
        } => {
            let seeds = match (server_seed, client_seed) {
                (Some(s), Some(c)) => Some((s, c)),
                (None, None) => None,
                _ => bail!("--server-seed and --client-seed must be given together"),
            };
            simulate(&params, spins, seeds, csv)?;
        }
        Commands::Replay {
            server_seed,
            client_seed,
            nonce,
            expect_reels,
        } => {
            let spin = to_response(spin_with_seeds(&server_seed, &client_seed, nonce, &params));
            let matches = expect_reels
                .as_deref()
                .map(|expected| expected == spin.reels.as_slice());
            let report = ReplayReport {
                server_seed_hash: derive_hash_hex(server_seed.as_bytes()),
                client_seed,
                nonce,
                spin,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            if matches == Some(false) {
                bail!("replayed reels do not match the expected reels");
            }
        }
        Commands::Decompose { value, seed } => {
            let reels = match seed {
                Some(seed) => decompose(
                    value,
                    &params.symbols,
                    &params.decompositions,
                    &mut RngSource::seeded(seed),
                ),
                None => decompose(
                    value,
                    &params.symbols,
                    &params.decompositions,
                    &mut RngSource::thread(),
                ),
            };
            let sum: f64 = reels.iter().sum();
            println!("{value} -> {reels:?} (sum {sum:.2})");
        }
    }

    Ok(())
}
