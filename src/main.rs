// Trains a [2, 2, 1] network on one logic gate and prints its predictions.
//
//   cargo run -- [GATE] [CONFIG.json]
//
// GATE is one of and, nand, or, nor, xor, xnor (default: and). CONFIG is an
// optional TrainConfig JSON file; missing keys take their defaults.
// Set RUST_LOG=info to follow the loss while training.
use std::process::ExitCode;

use lamp_nn::{seeded_rng, train_loop, LogicGate, Network, TrainConfig};

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let gate: LogicGate = args.next().as_deref().unwrap_or("and").parse()?;
    let config = match args.next() {
        Some(path) => TrainConfig::load_json(&path)?,
        None => TrainConfig::default(),
    };

    let dataset = gate.dataset()?;
    let mut network = Network::build(&[2, 2, 1])?;
    network.randomize(&mut seeded_rng(config.seed));

    let loss = train_loop(&mut network, &dataset, &config)?;
    println!("{gate}: final loss = {loss:.6}");

    for (input, target) in dataset.iter() {
        let output = network.predict(input)?;
        println!("{:?} -> {:.4} ({})", input, output[0], target[0]);
    }

    Ok(())
}
