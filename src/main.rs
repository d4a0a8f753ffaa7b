use clap::Parser;
use colored::*;
use inflation_csv2json::cli::{self, Args};
use std::process;

fn main() {
    let args = Args::parse();

    match cli::run(&args) {
        Ok(_stats) => {
            // Success - the summary is logged at info level (visible with --verbose)
            process::exit(0);
        }
        Err(error) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
            process::exit(1);
        }
    }
}
