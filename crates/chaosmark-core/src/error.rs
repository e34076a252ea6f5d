use thiserror::Error;

pub use crate::prover::ProverError;

#[derive(Error, Debug)]
pub enum ChaosmarkError {
    /// Represents an unsupported carrier media. Only 8 bit PNG carries the LSB data losslessly
    #[error("Media format is not supported, only 8 bit PNG images can carry an artifact")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a byte stream that does not follow the PNG chunk layout
    #[error("Invalid PNG structure: {0}")]
    InvalidPngStructure(&'static str),

    /// Represents a payload that needs more distinct pixel positions than the image has
    #[error(
        "Capacity Error: {required} bit positions are required but the image only offers {available}"
    )]
    CapacityExceeded { required: usize, available: usize },

    /// Represents a start point for the position walk that lies outside of the image
    #[error("Start point ({x}, {y}) lies outside of the {width}x{height} image")]
    StartOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Represents an embed position that lies outside of the image
    #[error("Position ({x}, {y}) lies outside of the {width}x{height} image")]
    PositionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Represents an embed call with fewer positions than bits
    #[error("{bits} bits cannot be placed on {positions} positions")]
    NotEnoughPositions { bits: usize, positions: usize },

    /// Represents a colour channel index the image does not have
    #[error("Channel {channel} is not available, the image has {channels} channels")]
    InvalidChannel { channel: u8, channels: u8 },

    /// Represents a CRC-valid artifact chunk whose content cannot be parsed
    #[error("Artifact metadata could not be decoded")]
    PayloadDecodeError(#[source] serde_json::Error),

    /// Represents a failure to serialize the artifact metadata
    #[error("Artifact metadata could not be encoded")]
    PayloadEncodeError(#[source] serde_json::Error),

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Represents a failure of the external proving system
    #[error("Prover error")]
    Prover(#[from] ProverError),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing payload")]
    MissingPayload,

    #[error("API Error: Missing secret")]
    MissingSecret,
}
