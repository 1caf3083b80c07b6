use std::process::ExitCode;

use clap::Parser;
use env_logger::Builder;
use log::{error, LevelFilter};
use pdb_objects::application::{main_to_wrap, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
    } else {
        let mut verbosity_level = LevelFilter::Info;
        if cli.verbose {
            verbosity_level = LevelFilter::Debug
        };
        if cli.trace {
            verbosity_level = LevelFilter::Trace
        };

        let mut builder = Builder::new();
        builder
            .filter_module("pdb_objects", verbosity_level)
            .filter_module("pdb_objects_cli", verbosity_level)
            .format_target(false)
            .init();
    }

    let stdout = std::io::stdout();
    let mut output = stdout.lock();
    match main_to_wrap(cli, &mut output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}
