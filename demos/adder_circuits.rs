/// Half adder on [2, 2, 2] and full adder on [3, 4, 2].
///
/// The full adder tends to plateau around a loss of 0.375 with these
/// hyper-parameters; adding hidden layers does not reliably help.
///
/// Run with:
///   cargo run --example adder_circuits --release
use lamp_nn::{full_adder, half_adder, seeded_rng, train_loop, Dataset, Network, TrainConfig};

fn report(network: &mut Network, dataset: &Dataset) -> lamp_nn::Result<()> {
    for (input, target) in dataset.iter() {
        let output = network.predict(input)?;
        println!("  {:?} -> [{:.4}, {:.4}] {:?}", input, output[0], output[1], target);
    }
    println!();
    Ok(())
}

fn main() -> lamp_nn::Result<()> {
    env_logger::init();
    let mut rng = seeded_rng(None);

    let dataset = half_adder()?;
    let mut network = Network::build(&[2, 2, 2])?;
    network.randomize(&mut rng);
    let loss = train_loop(&mut network, &dataset, &TrainConfig::new(10_000, 0.1, 0.1))?;
    println!("half adder (loss {loss:.6}):");
    report(&mut network, &dataset)?;

    let dataset = full_adder()?;
    let mut network = Network::build(&[3, 4, 2])?;
    network.randomize(&mut rng);
    println!("{network}");

    let mut config = TrainConfig::new(100_000, 0.1, 0.01);
    config.report_every = 10_000;
    let loss = train_loop(&mut network, &dataset, &config)?;
    println!("full adder (loss {loss:.6}):");
    report(&mut network, &dataset)?;
    println!("{network}");

    Ok(())
}
