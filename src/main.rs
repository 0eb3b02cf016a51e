use std::env;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use simple_logger::SimpleLogger;

use netsiege::{EndCondition, SimConfig, SimError, Simulator};

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init()
        .unwrap();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        println!("Usage: simulator <num_computers> <percent_success> <percent_detect>");
        process::exit(1);
    }

    let num_computers = parse_arg(&args[1], "num_computers");
    let percent_success = parse_arg(&args[2], "percent_success");
    let percent_detect = parse_arg(&args[3], "percent_detect");

    // Wall-clock seed: each invocation plays out a different battle.
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let config = SimConfig::new(num_computers as usize, percent_success, percent_detect)
        .with_seed(seed)
        .with_echo(true);

    let mut simulator = match Simulator::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    println!("STARTING SIMULATION");
    match simulator.run() {
        Ok(EndCondition::NetworkConquered) => println!("Attacker wins"),
        Ok(EndCondition::NetworkDefended) => {
            println!("Sysadmin wins");
            println!();
            println!("-------------------------------------------------------------------");
            println!();
            println!("****, we're dealing with a sysadmin (https://xkcd.com/705/)");
            println!();
            println!("-------------------------------------------------------------------");
            println!();
        }
        Ok(EndCondition::TimedOut) => println!("Draw"),
        Err(SimError::EmptyQueue) => {
            eprintln!("The queue is empty. This is not intended. Simulation terminating.");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            process::exit(1);
        }
    }
}

fn parse_arg(raw: &str, name: &str) -> u32 {
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Invalid value for {}: {}", name, raw);
            process::exit(1);
        }
    }
}
