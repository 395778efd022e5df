use clap::Parser;
use routeswitch::cli::{run_cli, Cli};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    routeswitch::logging::init_logging()?;
    run_cli(Cli::parse())
}
