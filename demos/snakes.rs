use std::env;
use std::process::exit;

use npdiff::algorithms::{onp, SnakeTrace};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: {} <str1> <str2>", args[0]);
        exit(1);
    }

    let old = args[1].chars().collect::<Vec<_>>();
    let new = args[2].chars().collect::<Vec<_>>();
    let mut trace = SnakeTrace::new(&old, &new);
    match onp::calculate(&mut trace) {
        Ok(()) => {}
        Err(never) => match never {},
    }

    if let Some((m, n, delta)) = trace.dimensions() {
        println!("M={}, N={}, delta={}", m, n, delta);
    }

    for snake in trace.snakes() {
        print!("  fp[{}] -> fp[{}]", snake.k0, snake.k);
        if !snake.is_empty() {
            print!(
                ", snake [{},{}):[{},{}) {:?}:{:?}",
                snake.old.start,
                snake.old.end,
                snake.new.start,
                snake.new.end,
                old[snake.old.clone()].iter().collect::<String>(),
                new[snake.new.clone()].iter().collect::<String>(),
            );
        }
        println!();
    }
    if let Some((p, d)) = trace.outcome() {
        println!("p={}, D={}", p, d);
    }
}
