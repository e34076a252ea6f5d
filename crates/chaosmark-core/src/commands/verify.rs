use std::path::{Path, PathBuf};

use crate::api::verify::Verification;
use crate::prover::ProverClient;
use crate::Result;

pub fn verify(
    secret_media: &Path,
    cover: Option<PathBuf>,
    secret: Option<String>,
) -> Result<Verification> {
    crate::api::verify::prepare()
        .from_secret_file(secret_media)
        .use_cover(cover)
        .using_secret(secret)
        .execute()
}

/// Checks the embedded proof with the external verifier. `None` when the
/// image carries no artifact.
pub fn verify_proof(
    secret_media: &Path,
    prover: &dyn ProverClient,
    verification_key: &Path,
) -> Result<Option<bool>> {
    let Some(extracted) = crate::commands::extract(secret_media, None)? else {
        return Ok(None);
    };

    extracted.verify_proof(prover, verification_key).map(Some)
}
