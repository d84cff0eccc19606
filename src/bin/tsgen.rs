use tsgen::cli::run_cli;
use tsgen::logging::{init_logging, LogConfig};

fn main() {
    if let Err(e) = init_logging(&LogConfig::from_env()) {
        eprintln!("Warning: {e:#}");
    }
    if let Err(e) = run_cli() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
