use std::path::PathBuf;

use chaosmark_core::api::shared::read_file;
use chaosmark_core::media::codec_options::DEFAULT_DOMAIN;
use chaosmark_core::{ChaosmarkError, CodecOptions, Payload, ProofBundle, SnarkjsProver};
use clap::Args;

use crate::CliResult;

/// What to hide, exactly one of these
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct PayloadArgs {
    /// A text message that will be hidden
    #[arg(short, long, value_name = "text message")]
    pub message: Option<String>,

    /// A file whose raw bytes will be hidden
    #[arg(short = 'd', long = "data", value_name = "data file")]
    pub data_file: Option<PathBuf>,

    /// An existing proof bundle (JSON with `proof` and `public_inputs`)
    #[arg(long, value_name = "proof bundle file")]
    pub proof: Option<PathBuf>,

    /// Witness input (JSON) to prove with snarkjs before hiding the proof
    #[arg(long, value_name = "witness input file", requires = "circuit_wasm")]
    pub witness: Option<PathBuf>,
}

/// Hides a message, a file or a proof in a PNG image
#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// Secret the position key is derived from, prompted for if missing
    #[arg(short, long, value_name = "secret")]
    pub secret: Option<String>,

    /// PNG image used as cover, used readonly.
    #[arg(short = 'i', long = "in", value_name = "cover image", required = true)]
    pub media: PathBuf,

    /// Final image will be stored as file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    #[command(flatten)]
    pub payload: PayloadArgs,

    /// Colour channel carrying the bits, 0 is red
    #[arg(long, default_value_t = 0)]
    pub channel: u8,

    /// Start point x, the most textured region is used if no start point is given
    #[arg(long = "start-x", requires = "start_y")]
    pub start_x: Option<u32>,

    /// Start point y
    #[arg(long = "start-y", requires = "start_x")]
    pub start_y: Option<u32>,

    /// Application domain recorded in the metadata
    #[arg(long, default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// Compiled circuit, needed with --witness
    #[arg(long = "circuit-wasm", value_name = "circuit.wasm", requires = "proving_key")]
    pub circuit_wasm: Option<PathBuf>,

    /// Proving key, needed with --witness
    #[arg(long = "proving-key", value_name = "circuit.zkey")]
    pub proving_key: Option<PathBuf>,
}

impl EmbedArgs {
    pub fn options(&self) -> CodecOptions {
        let start_point = self.start_x.zip(self.start_y);
        CodecOptions::default()
            .with_channel(self.channel)
            .use_start_point(start_point)
            .with_domain(self.domain.as_str())
    }

    pub fn run(self) -> CliResult<()> {
        let options = self.options();
        let secret = if self.secret.is_none() {
            crate::cli::ask_for_secret(true)
        } else {
            self.secret
        };

        let metadata = match (self.payload, self.circuit_wasm, self.proving_key) {
            (
                PayloadArgs {
                    witness: Some(witness),
                    ..
                },
                Some(circuit_wasm),
                Some(proving_key),
            ) => {
                let witness_input = serde_json::from_slice(&read_file(&witness)?)
                    .map_err(ChaosmarkError::PayloadDecodeError)?;
                let prover = SnarkjsProver::new(circuit_wasm, proving_key);
                chaosmark_core::commands::embed_proof(
                    &self.media,
                    &self.write_to_file,
                    &prover,
                    witness_input,
                    secret,
                    options,
                )?
            }
            (payload, _, _) => chaosmark_core::commands::embed(
                &self.media,
                &self.write_to_file,
                payload.into_payload()?,
                secret,
                options,
            )?,
        };

        let summary =
            serde_json::to_string_pretty(&metadata).map_err(ChaosmarkError::PayloadEncodeError)?;
        println!("{summary}");
        Ok(())
    }
}

impl PayloadArgs {
    fn into_payload(self) -> CliResult<Option<Payload>> {
        if let Some(message) = self.message {
            return Ok(Some(message.as_str().into()));
        }
        if let Some(data_file) = self.data_file {
            return Ok(Some(read_file(&data_file)?.into()));
        }
        if let Some(proof) = self.proof {
            let bundle: ProofBundle = serde_json::from_slice(&read_file(&proof)?)
                .map_err(ChaosmarkError::PayloadDecodeError)?;
            bundle.validate()?;
            let bytes = serde_json::to_vec(&bundle).map_err(ChaosmarkError::PayloadEncodeError)?;
            return Ok(Some(bytes.into()));
        }

        Ok(None)
    }
}
