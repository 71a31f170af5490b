mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands, DictCommands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calldata_compressor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compress {
            payload,
            file,
            format,
        } => {
            cli::run_compress(&cli.dict, payload, file, &format)?;
        }
        Commands::Decompress { stream } => {
            cli::run_decompress(&cli.dict, &stream)?;
        }
        Commands::Dict { command } => match command {
            DictCommands::Set { index, word } => {
                cli::dict_set(&cli.dict, index, &word)?;
            }
            DictCommands::Seed { file, start, chunk } => {
                cli::dict_seed(&cli.dict, &file, start, chunk)?;
            }
            DictCommands::Get { begin, end } => {
                cli::dict_get(&cli.dict, begin, end)?;
            }
        },
    }

    Ok(())
}
