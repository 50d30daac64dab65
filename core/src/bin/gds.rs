//! GDS command-line runner
//!
//! Runs, traces and checks dialogue scripts stored as JSON instruction trees.

use gds_core::cli;

fn main() {
    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
