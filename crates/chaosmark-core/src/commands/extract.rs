use std::path::Path;

use crate::api::shared::write_atomically;
use crate::artifact::{ArtifactMetadata, Extracted};
use crate::Result;

pub fn extract(secret_media: &Path, secret: Option<String>) -> Result<Option<Extracted>> {
    crate::api::extract::prepare()
        .from_secret_file(secret_media)
        .using_secret(secret)
        .execute()
}

/// Writes the raw payload bytes to `destination_file`.
///
/// Returns the metadata of the artifact, `None` when there was none and
/// nothing got written.
pub fn extract_to_file(
    secret_media: &Path,
    destination_file: &Path,
    secret: Option<String>,
) -> Result<Option<ArtifactMetadata>> {
    let Some(extracted) = extract(secret_media, secret)? else {
        return Ok(None);
    };

    write_atomically(destination_file, extracted.payload.as_bytes())?;
    Ok(Some(extracted.metadata))
}
