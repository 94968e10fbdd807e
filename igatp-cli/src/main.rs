//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use igatp_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match igatp_cli::run() {
        Ok(()) => {}
        // Clap renders help, version and usage errors with its own exit codes.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("igatp: {err}");
            std::process::exit(1);
        }
    }
}
