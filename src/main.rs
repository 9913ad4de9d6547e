use anyhow::Result;
use clap::Parser;

use openweather_qa::{utils, App, CliArgs, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    utils::logging::init();

    let config = Config::from_env().with_cli(&args);

    let summary = App::initialize(config, args.suite).await?.run().await?;

    if !summary.is_all_green() {
        std::process::exit(1);
    }
    Ok(())
}
