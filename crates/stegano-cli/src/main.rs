use clap::Parser;
use log::error;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = stegano_core::Result<T>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let config = args.config();

    let result = match args.command {
        Commands::Hide(hide) => hide.run(config),
        Commands::Unveil(unveil) => unveil.run(config),
        Commands::Assess(assess) => assess.run(),
    };

    if let Err(e) = &result {
        error!("{e}");
    }
    result
}
