pub mod codec_options;
pub mod image;
pub mod payload;
pub mod png_chunk;
mod primitives;
mod types;

pub use codec_options::CodecOptions;
pub use primitives::*;
pub use types::*;
