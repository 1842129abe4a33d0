use clap::Parser;
use plaincat::cli::{Cli, run_cli};
use plaincat::output::OutputFormatter;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_cli(&cli) {
        OutputFormatter::error(&format!("Error: {}", e));
        process::exit(1);
    }
}
