use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};
use serde_json::Value;

use super::shared::{is_png_extension, read_file, write_atomically, Secret};
use crate::artifact::{self, ArtifactMetadata};
use crate::media::payload::Payload;
use crate::prover::{ProofBundle, ProverClient};
use crate::{ChaosmarkError, CodecOptions};

pub fn prepare<'a>() -> EmbedApi<'a> {
    EmbedApi::default()
}

#[derive(Debug)]
enum PayloadSource<'a> {
    Ready(Payload),
    Prove {
        prover: &'a dyn ProverClient,
        witness_input: Value,
    },
}

#[derive(Default, Debug)]
pub struct EmbedApi<'a> {
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    secret: Secret,
    payload: Option<PayloadSource<'a>>,
    timestamp: Option<u64>,
    options: CodecOptions,
}

impl<'a> EmbedApi<'a> {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// The PNG cover image
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Set the secret the chaos key is derived from
    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = secret.into();
        self
    }

    pub fn using_secret<S: Into<Secret>>(mut self, secret: S) -> Self {
        self.secret = secret.into();
        self
    }

    /// Hide a text message
    pub fn with_message(mut self, message: &str) -> Self {
        self.payload = Some(PayloadSource::Ready(message.into()));
        self
    }

    /// Hide arbitrary bytes, e.g. a serialized proof
    pub fn with_payload_bytes<B: Into<Vec<u8>>>(mut self, bytes: B) -> Self {
        self.payload = Some(PayloadSource::Ready(Payload::Binary(bytes.into())));
        self
    }

    pub fn use_payload(mut self, payload: Option<Payload>) -> Self {
        self.payload = payload.map(PayloadSource::Ready);
        self
    }

    /// Hide a proof that already exists
    pub fn with_proof_bundle(self, bundle: &ProofBundle) -> crate::Result<Self> {
        bundle.validate()?;
        let bytes = serde_json::to_vec(bundle).map_err(ChaosmarkError::PayloadEncodeError)?;
        Ok(self.with_payload_bytes(bytes))
    }

    /// Generate a proof for `witness_input` during [`EmbedApi::execute`] and hide it.
    ///
    /// A failing prover aborts the embed, no fallback proof is made up.
    pub fn with_proof(mut self, prover: &'a dyn ProverClient, witness_input: Value) -> Self {
        self.payload = Some(PayloadSource::Prove {
            prover,
            witness_input,
        });
        self
    }

    pub fn with_start_point(mut self, x: u32, y: u32) -> Self {
        self.options = self.options.with_start_point(x, y);
        self
    }

    pub fn with_channel(mut self, channel: u8) -> Self {
        self.options = self.options.with_channel(channel);
        self
    }

    pub fn with_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.options = self.options.with_domain(domain);
        self
    }

    /// Fixes the metadata timestamp, the current time is used otherwise
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn execute(self) -> crate::Result<ArtifactMetadata> {
        self.validate()?;
        let Some(image) = self.image else {
            return Err(ChaosmarkError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(ChaosmarkError::TargetNotSet);
        };
        let Some(secret) = self.secret.as_deref() else {
            return Err(ChaosmarkError::MissingSecret);
        };
        let Some(source) = self.payload else {
            return Err(ChaosmarkError::MissingPayload);
        };

        let cover = read_file(&image)?;
        let payload = match source {
            PayloadSource::Ready(payload) => payload,
            PayloadSource::Prove {
                prover,
                witness_input,
            } => {
                let bundle = prover.prove(&witness_input)?;
                debug!("proof generated for {witness_input}");
                let bytes =
                    serde_json::to_vec(&bundle).map_err(ChaosmarkError::PayloadEncodeError)?;
                Payload::Binary(bytes)
            }
        };
        let timestamp = self.timestamp.unwrap_or_else(unix_now);

        let (png, metadata) = artifact::conceal(&cover, &payload, secret, &self.options, timestamp)?;
        write_atomically(&output, &png)?;

        info!(
            "embedded {} bits into {} starting at ({}, {})",
            metadata.bit_length(),
            output.display(),
            metadata.seed().x0,
            metadata.seed().y0
        );
        Ok(metadata)
    }

    fn validate(&self) -> crate::Result<()> {
        if let Some(output) = &self.output {
            if !is_png_extension(output) {
                return Err(ChaosmarkError::UnsupportedMedia);
            }
        }

        Ok(())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
