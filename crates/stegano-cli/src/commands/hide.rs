use std::path::PathBuf;

use clap::Args;
use stegano_core::StegoConfig;

use crate::CliResult;

/// Hides a grayscale PGM image inside another grayscale PGM image
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Cover image, 8-bit grayscale PGM, used readonly.
    #[arg(short = 'i', long = "in", value_name = "cover file", required = true)]
    pub cover: PathBuf,

    /// Secret image to hide, 8-bit grayscale PGM
    #[arg(short = 's', long = "secret", value_name = "secret file", required = true)]
    pub secret: PathBuf,

    /// Final image will be stored as file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,
}

impl HideArgs {
    pub fn run(self, config: StegoConfig) -> CliResult<()> {
        stegano_core::commands::hide(&self.cover, &self.secret, &self.write_to_file, config)
            .map(|_| ())
    }
}
