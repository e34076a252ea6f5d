//! # Chaosmark Core API
//!
//! Hides a payload in the least significant bits of one colour channel of a
//! PNG image. The pixel positions come from a chaos-keyed walk, see
//! [`chaos`], and everything needed to find them again is stored in a custom
//! `zkPF` chunk of the same file, see [`artifact::ArtifactMetadata`].
//!
//! The entry points are the builders in [`api`]:
//! - [`api::embed`] for writing a message, raw bytes or a proof into an image
//! - [`api::extract`] for reading the payload back
//! - [`api::verify`] for checking an artifact against its cover and secret
//!
//! # Usage Examples
//!
//! ## Embed a message into an image
//!
//! ```rust
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let cover = temp_dir.path().join("cover.png");
//! image::RgbImage::from_fn(64, 64, |x, y| image::Rgb([(x * 4) as u8, (y * 4) as u8, (x ^ y) as u8]))
//!     .save(&cover)
//!     .expect("Failed to write cover image");
//!
//! let metadata = chaosmark_core::api::embed::prepare()
//!     .with_message("Hello, World!")  // will hide this message inside the image
//!     .with_secret("SuperSecret42")   // the chaos key is derived from this secret
//!     .with_image(&cover)
//!     .with_output(temp_dir.path().join("image-with-secret.png"))
//!     .execute()
//!     .expect("Failed to embed message in image");
//!
//! assert_eq!(metadata.chaos.proof_bit_length, 104);
//! ```
//!
//! ## Extract the message again
//!
//! ```rust
//! # use tempfile::tempdir;
//! # let temp_dir = tempdir().expect("Failed to create temporary directory");
//! # let cover = temp_dir.path().join("cover.png");
//! # image::RgbImage::from_fn(64, 64, |x, y| image::Rgb([(x * 4) as u8, (y * 4) as u8, (x ^ y) as u8]))
//! #     .save(&cover)
//! #     .expect("Failed to write cover image");
//! # let secret_image = temp_dir.path().join("image-with-secret.png");
//! # chaosmark_core::api::embed::prepare()
//! #     .with_message("Hello, World!")
//! #     .with_secret("SuperSecret42")
//! #     .with_image(&cover)
//! #     .with_output(&secret_image)
//! #     .execute()
//! #     .expect("Failed to embed message in image");
//! let extracted = chaosmark_core::api::extract::prepare()
//!     .from_secret_file(&secret_image)
//!     .using_secret("SuperSecret42")
//!     .execute()
//!     .expect("Failed to extract message from image")
//!     .expect("No artifact in the image");
//!
//! assert_eq!(extracted.payload.as_text(), Some("Hello, World!"));
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod artifact;
pub mod chaos;
pub mod commands;
pub mod error;
pub mod media;
pub mod prover;
pub mod result;

pub use crate::api::Secret;
pub use crate::artifact::{ArtifactMetadata, Extracted};
pub use crate::chaos::{derive_key, ChaosSeed, Position};
pub use crate::error::ChaosmarkError;
pub use crate::media::payload::Payload;
pub use crate::media::{Carrier, CodecOptions};
pub use crate::prover::{ProofBundle, ProverClient, ProverError, SnarkjsProver};
pub use crate::result::Result;
