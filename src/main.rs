use std::process::ExitCode;

use clap::Parser;
use mccmnc_lib::commands::Cli;

fn main() -> ExitCode {
    // Initialize logging - default to info level for our crate
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("mccmnc=info,mccmnc_lib=info"),
    )
    .init();

    let cli = Cli::parse();
    match cli.command.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
