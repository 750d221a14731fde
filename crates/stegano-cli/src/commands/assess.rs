use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Prints MSE, PSNR and SSIM of an image against a reference image
#[derive(Args, Debug)]
pub struct AssessArgs {
    /// Reference image, e.g. the cover
    #[arg(value_name = "reference file")]
    pub reference: PathBuf,

    /// Image compared against the reference, e.g. the stego image
    #[arg(value_name = "candidate file")]
    pub candidate: PathBuf,
}

impl AssessArgs {
    pub fn run(self) -> CliResult<()> {
        let quality = stegano_core::commands::assess(&self.reference, &self.candidate)?;
        println!("MSE:  {:.4}", quality.mse);
        println!("PSNR: {:.2} dB", quality.psnr);
        println!("SSIM: {:.4}", quality.ssim);
        if let Some(band) = quality.psnr_band() {
            println!("PSNR band: {band} (good above 30 dB, excellent above 40 dB)");
        }
        if let Some(band) = quality.ssim_band() {
            println!("SSIM band: {band} (high above 0.95, nearly identical above 0.98)");
        }
        Ok(())
    }
}
