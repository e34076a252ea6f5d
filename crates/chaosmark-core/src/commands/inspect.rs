use std::path::Path;

use crate::api::shared::read_file;
use crate::artifact::{self, ArtifactMetadata};
use crate::media::png_chunk::{self, PngChunk};
use crate::Result;

/// Chunk listing of a PNG file plus its artifact metadata, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub chunks: Vec<PngChunk>,
    pub metadata: Option<ArtifactMetadata>,
}

pub fn inspect(media: &Path) -> Result<Inspection> {
    let png = read_file(media)?;

    Ok(Inspection {
        chunks: png_chunk::chunks(&png)?,
        metadata: artifact::read_metadata(&png)?,
    })
}
