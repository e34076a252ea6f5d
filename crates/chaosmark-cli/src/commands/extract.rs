use std::path::PathBuf;

use chaosmark_core::Payload;
use clap::Args;
use log::info;

use crate::CliResult;

/// Extracts the hidden payload of a PNG image
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Secret to derive the position key from, the stored key is used otherwise
    #[arg(short, long, value_name = "secret")]
    pub secret: Option<String>,

    /// Source image that carries the artifact
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// Raw payload will be stored in this file, printed otherwise
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: Option<PathBuf>,
}

impl ExtractArgs {
    pub fn run(self) -> CliResult<()> {
        if let Some(output_file) = &self.output_file {
            match chaosmark_core::commands::extract_to_file(&self.media, output_file, self.secret)? {
                Some(metadata) => info!(
                    "{} bits written to {}",
                    metadata.bit_length(),
                    output_file.display()
                ),
                None => println!("No artifact found in {}", self.media.display()),
            }
            return Ok(());
        }

        match chaosmark_core::commands::extract(&self.media, self.secret)? {
            Some(extracted) => match extracted.payload {
                Payload::Text(text) => println!("{text}"),
                Payload::Binary(bytes) => println!(
                    "{} bytes of binary payload, use --out to store them",
                    bytes.len()
                ),
            },
            None => println!("No artifact found in {}", self.media.display()),
        }

        Ok(())
    }
}
