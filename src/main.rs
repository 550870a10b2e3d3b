mod app;
mod cli;
mod config;
mod consts;
mod error;
mod output;
mod publish;
mod source;
mod stats;
mod store;
mod utils;

use std::process::ExitCode;

use clap::Parser;

use app::{run_collect, run_publish, run_summary};
use cli::{Cli, RunCommand};
use config::Config;
use error::AppError;

fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::load(cli.config.as_deref())?;
    let cli = cli.with_config(&config);
    let settings = cli.settings()?;
    let use_color = cli.use_color();
    let default_place = cli.default_place;

    match RunCommand::from(cli.command) {
        RunCommand::Collect => run_collect(&settings),
        RunCommand::Publish => {
            run_publish(&settings);
            Ok(())
        }
        RunCommand::Summary(args) => run_summary(&settings, &args, default_place, use_color),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
