use std::path::{Path, PathBuf};

use super::shared::{read_file, Secret};
use crate::artifact::{self, Extracted};
use crate::ChaosmarkError;

pub fn prepare() -> ExtractApi {
    ExtractApi::default()
}

#[derive(Default, Debug)]
pub struct ExtractApi {
    secret_media: Option<PathBuf>,
    secret: Secret,
}

impl ExtractApi {
    /// This is the image that carries the artifact
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// Regenerate the positions with the key of this secret instead of the
    /// key stored in the artifact
    pub fn using_secret<S: Into<Secret>>(mut self, secret: S) -> Self {
        self.secret = secret.into();
        self
    }

    /// Execute the extraction. `Ok(None)` means the image carries no artifact.
    pub fn execute(self) -> crate::Result<Option<Extracted>> {
        let Some(secret_media) = self.secret_media else {
            return Err(ChaosmarkError::CarrierNotSet);
        };

        let png = read_file(&secret_media)?;
        artifact::unveil(&png, self.secret.as_deref())
    }
}
