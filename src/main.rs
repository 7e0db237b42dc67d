#![warn(clippy::pedantic, clippy::cargo)]
mod build;
mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use crate::build::run_build;

#[derive(Parser)]
#[command(name = "folio", about = "Renders a portfolio site from config.yml", version)]
struct Cli {
    /// The site root, holding config.yml, templates/ and build/
    #[arg(short, long, default_value = "./")]
    dir: PathBuf
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run_build(&cli.dir) {
        Ok(()) => {
            println!("Static site generated successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // printed regardless of RUST_LOG
            eprintln!("{}", e.report());
            ExitCode::FAILURE
        }
    }
}
