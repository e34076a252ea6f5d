use crate::chaos::{Position, ALGORITHM_ARNOLD_LOGISTIC};

/// Default application domain written into the artifact metadata
pub const DEFAULT_DOMAIN: &str = "chaosmark";

/// Version of the artifact metadata layout
pub const METADATA_VERSION: &str = "1.0";

/// Options for embedding a payload into a carrier image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    /// Index of the color channel whose least significant bit carries the payload.
    /// `0` is red. Must be below the channel count of the carrier.
    pub channel: u8,

    /// Start point of the position walk. When `None` the most textured
    /// region of the carrier is used.
    pub start_point: Option<Position>,

    /// Free form application domain, recorded in the metadata
    pub domain: String,

    /// Metadata layout version
    pub version: String,

    /// Position algorithm tag, recorded in the metadata
    pub algorithm: String,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            channel: 0,
            start_point: None,
            domain: DEFAULT_DOMAIN.to_string(),
            version: METADATA_VERSION.to_string(),
            algorithm: ALGORITHM_ARNOLD_LOGISTIC.to_string(),
        }
    }
}

impl CodecOptions {
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_start_point(mut self, x: u32, y: u32) -> Self {
        self.start_point = Some((x, y));
        self
    }

    pub fn use_start_point(mut self, start_point: Option<Position>) -> Self {
        self.start_point = start_point;
        self
    }

    pub fn with_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.domain = domain.into();
        self
    }
}
