use std::path::Path;

use serde_json::Value;

use crate::artifact::ArtifactMetadata;
use crate::media::payload::Payload;
use crate::prover::ProverClient;
use crate::{CodecOptions, Result};

pub fn embed(
    media: &Path,
    write_to_file: &Path,
    payload: Option<Payload>,
    secret: Option<String>,
    options: CodecOptions,
) -> Result<ArtifactMetadata> {
    crate::api::embed::prepare()
        .with_options(options)
        .with_image(media)
        .with_output(write_to_file)
        .using_secret(secret)
        .use_payload(payload)
        .execute()
}

/// Proves `witness_input` with `prover` and embeds the resulting proof bundle.
pub fn embed_proof(
    media: &Path,
    write_to_file: &Path,
    prover: &dyn ProverClient,
    witness_input: Value,
    secret: Option<String>,
    options: CodecOptions,
) -> Result<ArtifactMetadata> {
    crate::api::embed::prepare()
        .with_options(options)
        .with_image(media)
        .with_output(write_to_file)
        .using_secret(secret)
        .with_proof(prover, witness_input)
        .execute()
}
