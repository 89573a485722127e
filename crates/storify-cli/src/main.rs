mod cli;

use crate::cli::CliCommand;

fn main() {
    // Logging is installed inside, once the config is known.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("storify error: {:#}", err);
        std::process::exit(1);
    }
}
