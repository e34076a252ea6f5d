//! Payload adapters around the bit carrier.
//!
//! Text and binary payloads run through the same carrier, they only differ in
//! how the unveiled bytes are turned back into a value.

mod codec;

pub use codec::{bits_from_str, bits_to_bytes, bits_to_string, bytes_to_bits};

use serde::{Deserialize, Serialize};

/// Payload kind as it is recorded in the artifact metadata
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadTag {
    Text,
    #[default]
    Binary,
}

/// How unveiled bytes are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// UTF-8, invalid sequences are replaced
    Text,
    /// exactly this many bytes
    Binary(usize),
}

impl PayloadKind {
    /// Rebuilds the kind from the metadata tag and the stored bit length.
    pub fn from_tag(tag: PayloadTag, bit_length: usize) -> Self {
        match tag {
            PayloadTag::Text => Self::Text,
            PayloadTag::Binary => Self::Binary(bit_length.div_ceil(8)),
        }
    }

    pub fn tag(&self) -> PayloadTag {
        match self {
            Self::Text => PayloadTag::Text,
            Self::Binary(_) => PayloadTag::Binary,
        }
    }

    /// A wrong key unveils garbage, which decodes without error.
    pub fn decode(&self, mut bytes: Vec<u8>) -> Payload {
        match self {
            Self::Text => Payload::Text(String::from_utf8_lossy(&bytes).into_owned()),
            Self::Binary(length) => {
                bytes.resize(*length, 0);
                Payload::Binary(bytes)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Text(_) => PayloadKind::Text,
            Self::Binary(b) => PayloadKind::Binary(b.len()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(t) => t.as_bytes(),
            Self::Binary(b) => b.as_slice(),
        }
    }

    pub fn to_bits(&self) -> std::io::Result<Vec<bool>> {
        bytes_to_bits(self.as_bytes())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            Self::Binary(_) => None,
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_decode_text_lossy() {
        let payload = PayloadKind::Text.decode(vec![b'o', b'k', 0xff]);
        assert_eq!(payload, Payload::Text("ok\u{fffd}".to_string()));
    }

    #[test]
    fn should_decode_binary_by_stored_length() {
        let kind = PayloadKind::from_tag(PayloadTag::Binary, 24);
        assert_eq!(kind, PayloadKind::Binary(3));
        assert_eq!(kind.decode(vec![1, 2, 3]), Payload::Binary(vec![1, 2, 3]));
        assert_eq!(kind.decode(vec![1, 2, 3, 4]), Payload::Binary(vec![1, 2, 3]));
    }

    #[test]
    fn should_map_kinds_to_tags() {
        assert_eq!(Payload::from("hi").kind().tag(), PayloadTag::Text);
        assert_eq!(Payload::from(vec![0u8; 4]).kind(), PayloadKind::Binary(4));
        assert_eq!(
            serde_json::to_string(&PayloadTag::Text).unwrap(),
            r#""text""#
        );
        assert_eq!(PayloadTag::default(), PayloadTag::Binary);
    }

    #[test]
    fn should_turn_text_into_msb_first_bits() {
        let bits = Payload::from("A").to_bits().unwrap();
        assert_eq!(bits_to_string(&bits), "01000001");
    }
}
