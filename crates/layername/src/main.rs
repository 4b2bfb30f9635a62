use std::process::ExitCode;

use clap::Parser;
use layername::cli::Status;

fn main() -> ExitCode {
    let cli = layername::cli::Cli::parse();
    layername::init(cli.verbose);

    match layername::cli::run(cli) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {err:?}");
            Status::Failed.into()
        }
    }
}
