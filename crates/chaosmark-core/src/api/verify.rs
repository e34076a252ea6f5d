use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::shared::{read_file, Secret};
use crate::artifact::{self, commitment, ArtifactMetadata};
use crate::media::Carrier;
use crate::ChaosmarkError;

pub fn prepare() -> VerifyApi {
    VerifyApi::default()
}

/// Outcome of checking an artifact against what it claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    NoArtifact,
    Checked(VerificationReport),
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        match self {
            Verification::NoArtifact => false,
            Verification::Checked(report) => report.is_valid(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    /// the positions regenerated from the stored seed hash to the stored root
    pub commitment_matches: bool,
    /// `None` when no cover image was given
    pub image_hash_matches: Option<bool>,
    /// `None` when no secret was given
    pub secret_matches: Option<bool>,
    pub metadata: ArtifactMetadata,
}

impl VerificationReport {
    pub fn is_valid(&self) -> bool {
        self.commitment_matches
            && self.image_hash_matches != Some(false)
            && self.secret_matches != Some(false)
    }
}

#[derive(Default, Debug)]
pub struct VerifyApi {
    secret_media: Option<PathBuf>,
    cover: Option<PathBuf>,
    secret: Secret,
}

impl VerifyApi {
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// The original cover, checked against the stored image hash
    pub fn with_cover(mut self, cover: impl AsRef<Path>) -> Self {
        self.cover = Some(cover.as_ref().to_path_buf());
        self
    }

    pub fn use_cover(mut self, cover: Option<PathBuf>) -> Self {
        self.cover = cover;
        self
    }

    pub fn using_secret<S: Into<Secret>>(mut self, secret: S) -> Self {
        self.secret = secret.into();
        self
    }

    pub fn execute(self) -> crate::Result<Verification> {
        let Some(secret_media) = self.secret_media else {
            return Err(ChaosmarkError::CarrierNotSet);
        };

        let png = read_file(&secret_media)?;
        let Some(metadata) = artifact::read_metadata(&png)? else {
            return Ok(Verification::NoArtifact);
        };

        let (width, height) = Carrier::from_png_bytes(&png)?.dimensions();
        let positions = artifact::artifact_positions(&metadata, metadata.seed(), width, height)?;
        let commitment_matches =
            commitment::commitment_root_hex(&positions) == metadata.public.commitment_root;
        if !commitment_matches {
            warn!("commitment root does not match the regenerated positions");
        }

        let image_hash_matches = match &self.cover {
            Some(cover) => {
                let hash = commitment::image_hash_hex(&read_file(cover)?);
                debug!("cover hash {hash}");
                Some(hash == metadata.public.image_hash)
            }
            None => None,
        };
        let secret_matches = self.secret.matches(&metadata);

        Ok(Verification::Checked(VerificationReport {
            commitment_matches,
            image_hash_matches,
            secret_matches,
            metadata,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::png_chunk::{self, ARTIFACT_CHUNK_TYPE};
    use crate::test_utils::write_noisy_png;
    use tempfile::tempdir;

    fn embedded(dir: &Path) -> (PathBuf, PathBuf) {
        let cover = write_noisy_png(dir, "cover.png", 32, 32);
        let secret_image = dir.join("secret.png");
        crate::api::embed::prepare()
            .with_image(&cover)
            .with_output(&secret_image)
            .with_secret("Secret42")
            .with_message("attested")
            .execute()
            .unwrap();
        (cover, secret_image)
    }

    #[test]
    fn should_verify_a_fresh_artifact() {
        let dir = tempdir().unwrap();
        let (cover, secret_image) = embedded(dir.path());

        let verification = prepare()
            .from_secret_file(&secret_image)
            .with_cover(&cover)
            .using_secret("Secret42")
            .execute()
            .unwrap();

        let Verification::Checked(report) = &verification else {
            panic!("artifact expected");
        };
        assert!(report.commitment_matches);
        assert_eq!(report.image_hash_matches, Some(true));
        assert_eq!(report.secret_matches, Some(true));
        assert!(verification.is_valid());
    }

    #[test]
    fn should_flag_a_wrong_secret_and_a_foreign_cover() {
        let dir = tempdir().unwrap();
        let (_, secret_image) = embedded(dir.path());
        let other_cover = write_noisy_png(dir.path(), "other.png", 33, 32);

        let verification = prepare()
            .from_secret_file(&secret_image)
            .with_cover(&other_cover)
            .using_secret("guess")
            .execute()
            .unwrap();

        let Verification::Checked(report) = &verification else {
            panic!("artifact expected");
        };
        assert!(report.commitment_matches);
        assert_eq!(report.image_hash_matches, Some(false));
        assert_eq!(report.secret_matches, Some(false));
        assert!(!verification.is_valid());
    }

    #[test]
    fn should_detect_a_forged_commitment_root() {
        let dir = tempdir().unwrap();
        let (_, secret_image) = embedded(dir.path());

        // replace the chunk with one carrying a different root
        let png = std::fs::read(&secret_image).unwrap();
        let mut metadata = artifact::read_metadata(&png).unwrap().unwrap();
        metadata.public.commitment_root = "00".repeat(32);
        let carrier = Carrier::from_png_bytes(&png).unwrap().to_png_bytes().unwrap();
        let forged = png_chunk::splice(
            &carrier,
            ARTIFACT_CHUNK_TYPE,
            &metadata.to_json_bytes().unwrap(),
        )
        .unwrap();
        let forged_path = dir.path().join("forged.png");
        std::fs::write(&forged_path, forged).unwrap();

        let verification = prepare().from_secret_file(&forged_path).execute().unwrap();
        assert!(!verification.is_valid());
    }

    #[test]
    fn should_report_missing_artifacts() {
        let dir = tempdir().unwrap();
        let cover = write_noisy_png(dir.path(), "cover.png", 8, 8);
        let verification = prepare().from_secret_file(&cover).execute().unwrap();
        assert_eq!(verification, Verification::NoArtifact);
        assert!(!verification.is_valid());
    }
}
