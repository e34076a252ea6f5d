use crate::ChaosmarkError;

pub type Result<T> = std::result::Result<T, ChaosmarkError>;
