//! Boundary to the external zero-knowledge proving system.
//!
//! Circuit compilation and proving are out of reach for this crate. A
//! [`ProverClient`] is handed in by the caller, [`SnarkjsProver`] drives the
//! `snarkjs` command line tool.

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use log::{debug, error};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const PROOF_FIELDS: [&str; 3] = ["pi_a", "pi_b", "pi_c"];

#[derive(Error, Debug)]
pub enum ProverError {
    /// The prover command could not be started at all
    #[error("Failed to run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A Groth16 proof together with the public inputs it was made for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofBundle {
    pub proof: Value,
    pub public_inputs: Value,
}

impl ProofBundle {
    pub fn new(proof: Value, public_inputs: Value) -> Result<Self, ProverError> {
        let bundle = Self {
            proof,
            public_inputs,
        };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Checks the shape: `pi_a`, `pi_b`, `pi_c` present and public inputs as array.
    pub fn validate(&self) -> Result<(), ProverError> {
        for field in PROOF_FIELDS {
            if self.proof.get(field).is_none() {
                return Err(ProverError::MalformedProof(format!("missing `{field}`")));
            }
        }
        if !self.public_inputs.is_array() {
            return Err(ProverError::MalformedProof(
                "public inputs are not an array".to_string(),
            ));
        }
        Ok(())
    }
}

pub trait ProverClient: Debug {
    fn prove(&self, witness_input: &Value) -> Result<ProofBundle, ProverError>;

    fn verify(
        &self,
        verification_key: &Path,
        public_inputs: &Value,
        proof: &Value,
    ) -> Result<bool, ProverError>;
}

/// Runs `snarkjs groth16 fullprove` and `snarkjs groth16 verify` in a
/// scratch directory.
#[derive(Debug, Clone)]
pub struct SnarkjsProver {
    program: String,
    leading_args: Vec<String>,
    circuit_wasm: PathBuf,
    proving_key: PathBuf,
}

impl SnarkjsProver {
    pub fn new(circuit_wasm: impl AsRef<Path>, proving_key: impl AsRef<Path>) -> Self {
        Self {
            program: "snarkjs".to_string(),
            leading_args: Vec::new(),
            circuit_wasm: circuit_wasm.as_ref().to_path_buf(),
            proving_key: proving_key.as_ref().to_path_buf(),
        }
    }

    /// A prover that is only used for [`ProverClient::verify`], proving fails.
    pub fn verifier() -> Self {
        Self::new(PathBuf::new(), PathBuf::new())
    }

    /// Replaces the `snarkjs` executable, e.g. with `npx snarkjs`.
    pub fn with_command<S: Into<String>>(mut self, program: S, leading_args: Vec<String>) -> Self {
        self.program = program.into();
        self.leading_args = leading_args;
        self
    }

    fn run(&self, scratch: &Path, args: &[&Path]) -> Result<Output, ProverError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.leading_args)
            .args(args)
            .current_dir(scratch);
        let printable = self.printable(args);
        debug!("running {printable}");

        command.output().map_err(|source| {
            error!("could not start {printable}: {source}");
            ProverError::Spawn {
                command: printable,
                source,
            }
        })
    }

    fn printable(&self, args: &[&Path]) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.leading_args.iter().map(String::as_str))
            .map(str::to_string)
            .chain(args.iter().map(|a| a.display().to_string()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ProverClient for SnarkjsProver {
    fn prove(&self, witness_input: &Value) -> Result<ProofBundle, ProverError> {
        let scratch = tempfile::tempdir()?;
        let input = scratch.path().join("input.json");
        let proof = scratch.path().join("proof.json");
        let public = scratch.path().join("public.json");
        fs::write(&input, serde_json::to_vec(witness_input)?)?;

        let args: [&Path; 7] = [
            Path::new("groth16"),
            Path::new("fullprove"),
            &input,
            &self.circuit_wasm,
            &self.proving_key,
            &proof,
            &public,
        ];
        let output = self.run(scratch.path(), &args)?;
        if !output.status.success() {
            return Err(ProverError::CommandFailed {
                command: self.printable(&args),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let proof: Value = serde_json::from_slice(&fs::read(&proof)?)?;
        let public_inputs: Value = serde_json::from_slice(&fs::read(&public)?)?;
        ProofBundle::new(proof, public_inputs)
    }

    fn verify(
        &self,
        verification_key: &Path,
        public_inputs: &Value,
        proof: &Value,
    ) -> Result<bool, ProverError> {
        let scratch = tempfile::tempdir()?;
        let public = scratch.path().join("public.json");
        let proof_file = scratch.path().join("proof.json");
        fs::write(&public, serde_json::to_vec(public_inputs)?)?;
        fs::write(&proof_file, serde_json::to_vec(proof)?)?;

        let args: [&Path; 5] = [
            Path::new("groth16"),
            Path::new("verify"),
            verification_key,
            &public,
            &proof_file,
        ];
        let output = self.run(scratch.path(), &args)?;
        if output.status.success() {
            return Ok(true);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stdout.contains("Invalid proof") || stderr.contains("Invalid proof") {
            return Ok(false);
        }
        Err(ProverError::CommandFailed {
            command: self.printable(&args),
            stderr: stderr.into_owned(),
        })
    }
}
