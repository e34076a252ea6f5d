//! Builder style entry points, one module per operation.

pub mod embed;
pub mod extract;
pub mod shared;
pub mod verify;

pub use shared::Secret;
