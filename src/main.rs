// src/main.rs

use clap::Parser;
use color_eyre::eyre::Result;

use vanguard_takeover::{app, logging, Args};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    logging::initialize_logging(args.debug)?;

    // Returning an error exits with status 1; finding vulnerable domains does not.
    app::run(args).await?;
    Ok(())
}
