use serde::{Deserialize, Serialize};

use crate::chaos::ChaosSeed;
use crate::error::ChaosmarkError;
use crate::media::payload::{PayloadKind, PayloadTag};
use crate::result::Result;

/// Everything needed to regenerate the position sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaosSection {
    #[serde(flatten)]
    pub seed: ChaosSeed,
    pub proof_bit_length: u32,
    #[serde(default)]
    pub channel: u8,
}

/// Values a verifier can check without the secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicSection {
    /// SHA-256 of the original cover file, hex
    pub image_hash: String,
    /// Merkle root over the position sequence, hex
    pub commitment_root: String,
    /// seconds since the unix epoch
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaSection {
    pub version: String,
    pub domain: String,
    pub algorithm: String,
    #[serde(default)]
    pub payload_kind: PayloadTag,
}

/// The record stored in the `zkPF` chunk. Written once at embed time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub chaos: ChaosSection,
    pub public: PublicSection,
    pub meta: MetaSection,
}

impl ArtifactMetadata {
    /// Serializes to compact JSON, the field order is fixed by the structs.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(ChaosmarkError::PayloadEncodeError)
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(ChaosmarkError::PayloadDecodeError)
    }

    pub fn bit_length(&self) -> usize {
        self.chaos.proof_bit_length as usize
    }

    pub fn seed(&self) -> &ChaosSeed {
        &self.chaos.seed
    }

    pub fn payload_kind(&self) -> PayloadKind {
        PayloadKind::from_tag(self.meta.payload_kind, self.bit_length())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_metadata() -> ArtifactMetadata {
        ArtifactMetadata {
            chaos: ChaosSection {
                seed: ChaosSeed::new(8, 8, 3_128_831_167),
                proof_bit_length: 8,
                channel: 0,
            },
            public: PublicSection {
                image_hash: "00".repeat(32),
                commitment_root: "11".repeat(32),
                timestamp: 1_700_000_000,
            },
            meta: MetaSection {
                version: "1.0".to_string(),
                domain: "chaosmark".to_string(),
                algorithm: "arnold_logistic".to_string(),
                payload_kind: PayloadTag::Text,
            },
        }
    }

    #[test]
    fn should_serialize_the_documented_layout() {
        let json = String::from_utf8(sample_metadata().to_json_bytes().unwrap()).unwrap();
        assert!(json.starts_with(
            r#"{"chaos":{"x0":8,"y0":8,"key":3128831167,"algorithm":"arnold_logistic","version":"1.0","proof_bit_length":8,"channel":0},"public":{"image_hash":"#
        ));
        assert!(json.ends_with(
            r#""meta":{"version":"1.0","domain":"chaosmark","algorithm":"arnold_logistic","payload_kind":"text"}}"#
        ));
    }

    #[test]
    fn should_reproduce_the_exact_bytes_after_parsing() {
        let bytes = sample_metadata().to_json_bytes().unwrap();
        let parsed = ArtifactMetadata::from_json_bytes(&bytes).unwrap();
        assert_eq!(parsed, sample_metadata());
        assert_eq!(parsed.to_json_bytes().unwrap(), bytes);
    }

    #[test]
    fn should_default_channel_and_payload_kind() {
        let json = br#"{
            "chaos": {"x0": 1, "y0": 2, "key": 99, "algorithm": "arnold_logistic", "version": "1.0", "proof_bit_length": 16},
            "public": {"image_hash": "ab", "commitment_root": "cd", "timestamp": 5},
            "meta": {"version": "1.0", "domain": "zk", "algorithm": "arnold_logistic"}
        }"#;
        let parsed = ArtifactMetadata::from_json_bytes(json).unwrap();
        assert_eq!(parsed.chaos.channel, 0);
        assert_eq!(parsed.payload_kind(), PayloadKind::Binary(2));
        assert_eq!(parsed.seed().key, 99);
    }

    #[test]
    fn should_fail_on_foreign_content() {
        assert!(matches!(
            ArtifactMetadata::from_json_bytes(b"{\"chaos\": 1}"),
            Err(ChaosmarkError::PayloadDecodeError(_))
        ));
        assert!(matches!(
            ArtifactMetadata::from_json_bytes(b"\xff\xfe"),
            Err(ChaosmarkError::PayloadDecodeError(_))
        ));
    }
}
