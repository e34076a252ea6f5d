//! In-memory embed and extract of a full artifact: payload bits in the
//! carrier plus the `zkPF` metadata chunk.
//!
//! The builders in [`crate::api`] wrap these with file handling.

pub mod commitment;
pub mod metadata;

use std::path::Path;

use log::{debug, warn};

pub use metadata::{ArtifactMetadata, ChaosSection, MetaSection, PublicSection};

use crate::api::Secret;
use crate::chaos::{derive_key, ChaosSeed, Position};
use crate::error::ChaosmarkError;
use crate::media::payload::{bits_to_bytes, Payload};
use crate::media::png_chunk::{self, ARTIFACT_CHUNK_TYPE};
use crate::media::{Carrier, CodecOptions};
use crate::prover::{ProofBundle, ProverClient};
use crate::result::Result;

/// The result of a successful extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub metadata: ArtifactMetadata,
    pub payload: Payload,
}

impl Extracted {
    /// Interprets the payload as a serialized proof bundle.
    pub fn proof_bundle(&self) -> Result<ProofBundle> {
        serde_json::from_slice(self.payload.as_bytes()).map_err(ChaosmarkError::PayloadDecodeError)
    }

    /// Hands the embedded proof to the external verifier.
    pub fn verify_proof(
        &self,
        prover: &dyn ProverClient,
        verification_key: &Path,
    ) -> Result<bool> {
        let bundle = self.proof_bundle()?;
        Ok(prover.verify(verification_key, &bundle.public_inputs, &bundle.proof)?)
    }
}

/// Hides `payload` in the cover PNG and attaches the metadata chunk.
///
/// Returns the new PNG byte stream and the metadata written into it. All
/// capacity and structure checks happen before anything is produced.
pub fn conceal(
    cover: &[u8],
    payload: &Payload,
    secret: &str,
    options: &CodecOptions,
    timestamp: u64,
) -> Result<(Vec<u8>, ArtifactMetadata)> {
    if !png_chunk::has_signature(cover) {
        return Err(ChaosmarkError::InvalidPngStructure("missing PNG signature"));
    }
    let mut carrier = Carrier::from_png_bytes(cover)?;
    let (width, height) = carrier.dimensions();

    let bits = payload.to_bits()?;
    let bit_length = u32::try_from(bits.len()).map_err(|_| ChaosmarkError::CapacityExceeded {
        required: bits.len(),
        available: u32::MAX as usize,
    })?;

    let key = derive_key(secret);
    let (x0, y0) = match options.start_point {
        Some(start) => start,
        None => {
            let start = carrier.feature_point();
            debug!("start point from image texture: {start:?}");
            start
        }
    };
    let mut seed = ChaosSeed::new(x0, y0, key);
    seed.algorithm_tag = options.algorithm.clone();

    let positions = seed.positions(bits.len(), width, height)?;
    carrier.embed_bits(&bits, &positions, options.channel)?;

    let metadata = ArtifactMetadata {
        chaos: ChaosSection {
            seed,
            proof_bit_length: bit_length,
            channel: options.channel,
        },
        public: PublicSection {
            image_hash: commitment::image_hash_hex(cover),
            commitment_root: commitment::commitment_root_hex(&positions),
            timestamp,
        },
        meta: MetaSection {
            version: options.version.clone(),
            domain: options.domain.clone(),
            algorithm: options.algorithm.clone(),
            payload_kind: payload.kind().tag(),
        },
    };

    let png = carrier.to_png_bytes()?;
    let spliced = png_chunk::splice(&png, ARTIFACT_CHUNK_TYPE, &metadata.to_json_bytes()?)?;

    Ok((spliced, metadata))
}

/// Reads the metadata chunk. `None` when there is no intact `zkPF` chunk.
pub fn read_metadata(png: &[u8]) -> Result<Option<ArtifactMetadata>> {
    match png_chunk::find(png, ARTIFACT_CHUNK_TYPE) {
        Some(data) => ArtifactMetadata::from_json_bytes(&data).map(Some),
        None => Ok(None),
    }
}

/// The seed used for extraction: the stored one, or the stored start point
/// with the key of the given secret.
pub fn effective_seed(metadata: &ArtifactMetadata, secret: &Secret) -> ChaosSeed {
    let stored = metadata.seed();
    match secret.key() {
        Some(key) if key != stored.key => {
            warn!("the given secret does not match the key of the artifact");
            stored.with_key(key)
        }
        _ => stored.clone(),
    }
}

/// Regenerates the positions an artifact was embedded at.
pub fn artifact_positions(
    metadata: &ArtifactMetadata,
    seed: &ChaosSeed,
    width: u32,
    height: u32,
) -> Result<Vec<Position>> {
    seed.positions(metadata.bit_length(), width, height)
}

/// Extracts the payload of an artifact.
///
/// `Ok(None)` means no artifact was found. A wrong secret does not fail, it
/// unveils garbage.
pub fn unveil(png: &[u8], secret: Option<&str>) -> Result<Option<Extracted>> {
    let Some(metadata) = read_metadata(png)? else {
        debug!("no artifact chunk found");
        return Ok(None);
    };

    let carrier = Carrier::from_png_bytes(png)?;
    let (width, height) = carrier.dimensions();
    let seed = effective_seed(&metadata, &Secret::from(secret.map(str::to_string)));
    let positions = artifact_positions(&metadata, &seed, width, height)?;

    let bits = carrier.extract_bits(&positions, metadata.chaos.channel)?;
    let payload = metadata.payload_kind().decode(bits_to_bytes(&bits)?);

    Ok(Some(Extracted { metadata, payload }))
}
