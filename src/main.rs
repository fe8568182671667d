//! Lanzar CLI
//!
//! Training-run entry point.
//!
//! # Usage
//!
//! ```bash
//! # Fit then evaluate a binary classifier
//! lanzar train --task binary --logdir runs/binary
//!
//! # Data-parallel over four devices with a tighter epoch budget
//! lanzar train --task multiclass --logdir runs/mc --devices 4 --epochs 5
//!
//! # Check arguments without training
//! lanzar validate --task regression --logdir runs/reg
//! ```

use clap::Parser;
use lanzar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
