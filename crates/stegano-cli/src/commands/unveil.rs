use std::path::PathBuf;

use clap::Args;
use stegano_core::StegoConfig;

use crate::CliResult;

/// Unveils the secret image from a stego image
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Stego image that contains the secret image
    #[arg(
        short = 'i',
        long = "in",
        value_name = "stego file",
        required = true
    )]
    pub stego: PathBuf,

    /// Secret image will be stored as file
    #[arg(short = 'o', long = "out", value_name = "output file", required = true)]
    pub write_to_file: PathBuf,

    /// Known secret width. With --height the metadata is skipped and the
    /// global flags are used as given
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Known secret height, see --width
    #[arg(long, requires = "width")]
    pub height: Option<u32>,
}

impl UnveilArgs {
    pub fn run(self, config: StegoConfig) -> CliResult<()> {
        let dimensions = self.width.zip(self.height);
        stegano_core::commands::unveil(&self.stego, &self.write_to_file, dimensions, config)
            .map(|_| ())
    }
}
