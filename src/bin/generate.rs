//! `generate`: print a random weighted-graph adjacency matrix.
//!
//! Demo collaborator with no connection to the simulation core.

use std::env;
use std::process;

use netsiege::Graph;

fn main() {
    let args: Vec<String> = env::args().collect();
    let seed = match args.len() {
        2 => rand::random::<u64>(),
        3 => match args[2].parse() {
            Ok(seed) => seed,
            Err(_) => {
                eprintln!("Invalid seed: {}", args[2]);
                process::exit(1);
            }
        },
        _ => {
            println!("Usage: generate <num_nodes> [<seed>]");
            process::exit(1);
        }
    };

    let num_nodes: usize = match args[1].parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Invalid node count: {}", args[1]);
            process::exit(1);
        }
    };

    let graph = Graph::new(num_nodes, seed);
    for row in graph.adj_matrix() {
        for cost in row {
            // Right-aligned 3-wide columns keep the matrix readable.
            print!("{:>3} ", cost);
        }
        println!();
    }
}
