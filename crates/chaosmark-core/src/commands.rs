//! Thin wrappers around the [`crate::api`] builders, one call per CLI subcommand.

mod embed;
mod extract;
mod inspect;
mod verify;

pub use embed::*;
pub use extract::*;
pub use inspect::*;
pub use verify::*;
