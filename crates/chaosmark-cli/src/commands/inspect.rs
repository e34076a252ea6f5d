use std::path::PathBuf;

use chaosmark_core::ChaosmarkError;
use clap::Args;

use crate::CliResult;

/// Lists the chunks of a PNG image and shows its artifact metadata
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// PNG image to inspect
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,
}

impl InspectArgs {
    pub fn run(self) -> CliResult<()> {
        let inspection = chaosmark_core::commands::inspect(&self.media)?;

        for chunk in &inspection.chunks {
            println!(
                "{} {:>10} bytes  crc {}{}",
                chunk.type_name(),
                chunk.length(),
                if chunk.is_crc_valid() { "ok" } else { "MISMATCH" },
                if chunk.is_ancillary() { "  ancillary" } else { "" },
            );
        }

        match inspection.metadata {
            Some(metadata) => {
                let json = serde_json::to_string_pretty(&metadata)
                    .map_err(ChaosmarkError::PayloadEncodeError)?;
                println!("{json}");
            }
            None => println!("No artifact found"),
        }

        Ok(())
    }
}
