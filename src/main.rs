use anyhow::Context;
use clap::Parser;
use cta_tracker::cli::{init_logging, run, Cli};
use cta_tracker::settings::Settings;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    run(cli, &settings)?;
    Ok(())
}
