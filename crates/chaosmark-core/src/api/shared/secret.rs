use std::fmt::{self, Debug, Formatter};

use crate::artifact::ArtifactMetadata;
use crate::chaos::derive_key;

/// The user secret the chaos key is derived from. Never printed in clear.
#[derive(Default, Clone)]
pub struct Secret(Option<String>);

impl Secret {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// The chaos key of this secret, `None` when no secret is set.
    pub fn key(&self) -> Option<u64> {
        self.as_deref().map(derive_key)
    }

    /// Whether this secret unlocks the artifact. `None` when no secret is set.
    pub fn matches(&self, metadata: &ArtifactMetadata) -> Option<bool> {
        self.key().map(|key| key == metadata.seed().key)
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(secret) = &self.0 {
            write!(f, "Secret({})", "*".repeat(secret.chars().count()))
        } else {
            write!(f, "Secret(None)")
        }
    }
}

impl From<Option<String>> for Secret {
    fn from(secret: Option<String>) -> Self {
        Self(secret)
    }
}

impl From<&str> for Secret {
    fn from(secret: &str) -> Self {
        Self(Some(secret.to_string()))
    }
}

impl From<String> for Secret {
    fn from(secret: String) -> Self {
        Self(Some(secret))
    }
}
