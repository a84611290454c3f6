//! # URA
//!
//! Command-line front end of the URA export compiler.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ura_cli::{run, CliArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ura_cli=info,ura_export=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let outcome = run(args.command).await?;

    // Logs on stderr, result on stdout
    println!("{outcome}");
    Ok(())
}
