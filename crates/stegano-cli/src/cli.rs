use clap::{Parser, Subcommand};
use log::warn;
use stegano_core::StegoConfig;

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Edge length of the transform blocks, rounded up to a power of two
    #[arg(long, global = true, value_name = "n", default_value_t = 8)]
    pub block_size: usize,

    /// Embedding strength
    #[arg(long, global = true, value_name = "1-10", default_value_t = 5,
        value_parser = clap::value_parser!(u8).range(1..=10))]
    pub strength: u8,

    /// Visit payload blocks in a seeded pseudo-random order
    #[arg(long, global = true)]
    pub random_blocks: bool,

    /// Seed of the block order, needed again to unveil
    #[arg(long, global = true, value_name = "u64")]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    pub fn config(&self) -> StegoConfig {
        let config = StegoConfig::default()
            .with_block_size(self.block_size)
            .with_strength(self.strength)
            .with_random_blocks(self.random_blocks);

        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => {
                if self.random_blocks {
                    warn!(
                        "no --seed given, using {}; it is needed to unveil",
                        config.random_seed
                    );
                }
                config
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Assess(assess::AssessArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn should_map_global_flags_onto_config() {
        let args = CliArgs::try_parse_from([
            "stegano-dwt",
            "hide",
            "-i",
            "cover.pgm",
            "-s",
            "secret.pgm",
            "-o",
            "stego.pgm",
            "--block-size",
            "6",
            "--strength",
            "9",
            "--random-blocks",
            "--seed",
            "42",
        ])
        .expect("Cannot parse hide arguments");

        let config = args.config();
        assert_eq!(config.effective_block_size(), 8);
        assert_eq!(config.embedding_strength, 9);
        assert!(config.use_random_blocks);
        assert_eq!(config.random_seed, 42);
    }

    #[test]
    fn should_reject_strength_out_of_range() {
        let result = CliArgs::try_parse_from([
            "stegano-dwt",
            "--strength",
            "11",
            "assess",
            "a.pgm",
            "b.pgm",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn should_require_both_unveil_dimensions() {
        let result = CliArgs::try_parse_from([
            "stegano-dwt",
            "unveil",
            "-i",
            "stego.pgm",
            "-o",
            "secret.pgm",
            "--width",
            "8",
        ]);
        assert!(result.is_err());

        let args = CliArgs::try_parse_from([
            "stegano-dwt",
            "unveil",
            "-i",
            "stego.pgm",
            "-o",
            "secret.pgm",
            "--width",
            "8",
            "--height",
            "7",
        ])
        .expect("Cannot parse unveil arguments");
        match args.command {
            Commands::Unveil(unveil) => assert_eq!(unveil.width.zip(unveil.height), Some((8, 7))),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
