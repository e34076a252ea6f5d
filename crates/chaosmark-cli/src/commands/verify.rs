use std::path::PathBuf;

use chaosmark_core::api::verify::Verification;
use chaosmark_core::SnarkjsProver;
use clap::Args;

use crate::CliResult;

/// Checks an artifact against its commitment, cover image and secret
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Secret that should map to the stored key
    #[arg(short, long, value_name = "secret")]
    pub secret: Option<String>,

    /// Image that carries the artifact
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// Original cover image, checked against the stored image hash
    #[arg(long, value_name = "cover image")]
    pub cover: Option<PathBuf>,

    /// Verify the embedded proof with snarkjs and this verification key
    #[arg(long = "verification-key", value_name = "verification_key.json")]
    pub verification_key: Option<PathBuf>,
}

fn mark(check: Option<bool>) -> &'static str {
    match check {
        Some(true) => "ok",
        Some(false) => "MISMATCH",
        None => "not checked",
    }
}

impl VerifyArgs {
    /// Returns whether every performed check passed
    pub fn run(self) -> CliResult<bool> {
        let verification =
            chaosmark_core::commands::verify(&self.media, self.cover, self.secret)?;

        let Verification::Checked(report) = &verification else {
            println!("No artifact found in {}", self.media.display());
            return Ok(false);
        };
        println!("commitment root: {}", mark(Some(report.commitment_matches)));
        println!("cover image:     {}", mark(report.image_hash_matches));
        println!("secret:          {}", mark(report.secret_matches));

        let mut valid = verification.is_valid();
        if let Some(verification_key) = &self.verification_key {
            let proof = chaosmark_core::commands::verify_proof(
                &self.media,
                &SnarkjsProver::verifier(),
                verification_key,
            )?;
            println!("proof:           {}", mark(proof));
            valid &= proof == Some(true);
        }

        Ok(valid)
    }
}
