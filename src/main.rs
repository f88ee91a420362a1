use std::process;

use clap::Parser;
use pareto_plot::cli::{self, Cli, Outcome};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    match cli::run(&cli) {
        Ok(Outcome::Saved(path)) => println!("Saved Pareto plot to {}", path.display()),
        Ok(Outcome::NoValidData) => println!("No valid data points."),
        Ok(Outcome::Viewed) => {}
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
