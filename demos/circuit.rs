use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use rev_rs::circuit::Circuit;
use rev_rs::gate::{Gate, Side};
use rev_rs::row::Row;
use rev_rs::table::TruthTable;

#[derive(Parser)]
#[command(author, version, about = "Random reversible circuit explorer")]
struct Cli {
    /// Number of wires
    #[arg(short, long, default_value_t = 4)]
    width: usize,

    /// Number of gates
    #[arg(short, long, default_value_t = 8)]
    gates: usize,

    /// Random seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: simplelog::LevelFilter,
}

fn random_gate(rng: &mut impl Rng, width: usize) -> Result<Gate> {
    let target = rng.random_range(0..width);
    let controls: Vec<usize> = (0..width)
        .filter(|&w| w != target && rng.random_bool(0.5))
        .collect();
    Ok(Gate::new(width, controls, target)?)
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    simplelog::TermLogger::init(
        cli.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    if cli.width == 0 || cli.width > 12 {
        return Err(eyre!("width should be in the range 1..=12, got {}", cli.width));
    }

    let time_total = std::time::Instant::now();

    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
    let mut circuit = Circuit::new();
    for _ in 0..cli.gates {
        circuit.push(random_gate(&mut rng, cli.width)?)?;
    }
    log::info!(
        "Built circuit with {} gates ({} controls) on {} wires",
        circuit.len(),
        circuit.controls_num(),
        cli.width
    );

    for gate in &circuit {
        println!("{}", gate);
    }
    println!();
    println!("{}", circuit);
    println!();

    let tt = circuit
        .truth_table()
        .ok_or_else(|| eyre!("empty circuit has no truth table"))?;
    println!("{}", tt);
    println!();

    log::info!("Checking reversibility on all {} rows...", tt.len());
    let inverse = circuit.reversed();
    for v in 0..tt.len() as u64 {
        let original = Row::from_value(cli.width, v);
        let mut row = original.clone();
        circuit.apply(&mut row)?;
        inverse.apply(&mut row)?;
        if row != original {
            return Err(eyre!("row {} was not restored: got {}", original, row));
        }
    }
    println!("reversible = {}", tt.is_reversible());
    println!("identity = {}", tt.is_identity());

    let mut perm = TruthTable::new(cli.width);
    perm.shuffle(&mut rng);
    let mut front = perm.clone();
    circuit.apply_to_table(&mut front, Side::Input)?;
    if front != tt.compose(&perm)? {
        return Err(eyre!("circuit before a random permutation disagrees with composition"));
    }
    log::info!("Circuit composes with a random permutation of {} rows", perm.len());

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
