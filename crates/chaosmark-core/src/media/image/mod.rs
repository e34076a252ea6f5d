pub mod feature_point;
pub mod lsb_codec;

pub use lsb_codec::LsbCodec;
