//! Throws command - sample the stick distribution

use anyhow::Result;
use clap::Args;

use senet_core::{RngSticks, StickSource};

use crate::config::SessionConfig;

/// Expected sixteenths for steps 1..=5
const EXPECTED: [u32; 5] = [4, 6, 4, 1, 1];

#[derive(Args)]
pub struct ThrowsArgs {
    /// Number of throws to sample
    #[arg(long, default_value = "16000")]
    pub count: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
struct Tally {
    total: usize,
    /// Throws per step count, index 0 = one step
    steps: [usize; 5],
    extra_turns: usize,
}

pub fn run(args: ThrowsArgs, config: SessionConfig) -> Result<()> {
    tracing::info!("Sampling {} throws (seed={:?})", args.count, config.seed);

    let mut sticks = RngSticks::new(config.create_rng());
    let tally = sample(&mut sticks, args.count);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tally)?);
        return Ok(());
    }

    println!("\n=== Throw Distribution ===");
    println!("steps  observed  expected");
    for (i, &count) in tally.steps.iter().enumerate() {
        println!(
            "{:>5}  {:>7.2}%  {:>7.2}%",
            i + 1,
            share(count, tally.total),
            EXPECTED[i] as f64 / 16.0 * 100.0
        );
    }
    println!(
        "extra turns: {:.2}% (expected 37.50%)",
        share(tally.extra_turns, tally.total)
    );
    Ok(())
}

fn sample<S: StickSource + ?Sized>(sticks: &mut S, count: usize) -> Tally {
    let mut tally = Tally {
        total: count,
        ..Default::default()
    };
    for _ in 0..count {
        let throw = sticks.throw();
        tally.steps[throw.steps as usize - 1] += 1;
        if throw.extra_turn {
            tally.extra_turns += 1;
        }
    }
    tally
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
