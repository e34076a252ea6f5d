//! Splicing and scanning of custom PNG chunks.
//!
//! A PNG stream is the 8 byte signature followed by chunks of the layout
//!
//! ```text
//! [4 bytes] data length (big-endian u32)
//! [4 bytes] chunk type
//! [N bytes] data
//! [4 bytes] CRC-32 over chunk type and data (big-endian u32)
//! ```
//!
//! The artifact chunk type `zkPF` is ancillary, private and safe to copy.

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use log::{debug, warn};

use crate::error::ChaosmarkError;
use crate::result::Result;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// chunk type carrying the artifact metadata
pub const ARTIFACT_CHUNK_TYPE: [u8; 4] = *b"zkPF";

const IEND: [u8; 4] = *b"IEND";

/// length + type + crc
const CHUNK_OVERHEAD: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngChunk {
    pub chunk_type: [u8; 4],
    pub data: Vec<u8>,
    pub crc: u32,
}

impl PngChunk {
    /// Builds a chunk with a freshly computed CRC.
    pub fn new(chunk_type: [u8; 4], data: Vec<u8>) -> Self {
        let crc = chunk_crc(&chunk_type, &data);
        Self {
            chunk_type,
            data,
            crc,
        }
    }

    pub fn length(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn is_crc_valid(&self) -> bool {
        self.crc == chunk_crc(&self.chunk_type, &self.data)
    }

    /// lowercase first letter
    pub fn is_ancillary(&self) -> bool {
        self.chunk_type[0] & 0x20 != 0
    }

    /// lowercase second letter
    pub fn is_private(&self) -> bool {
        self.chunk_type[1] & 0x20 != 0
    }

    pub fn type_name(&self) -> String {
        String::from_utf8_lossy(&self.chunk_type).into_owned()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let length = u32::try_from(self.data.len())
            .map_err(|_| ChaosmarkError::InvalidPngStructure("chunk data exceeds 4 GiB"))?;
        let mut buf = Vec::with_capacity(self.data.len() + CHUNK_OVERHEAD);
        buf.write_u32::<BigEndian>(length)?;
        buf.extend_from_slice(&self.chunk_type);
        buf.extend_from_slice(&self.data);
        buf.write_u32::<BigEndian>(self.crc)?;

        Ok(buf)
    }
}

/// CRC-32 (PNG / zlib polynomial) over chunk type and data
pub fn chunk_crc(chunk_type: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    hasher.finalize()
}

/// Location of one chunk inside a PNG byte stream
#[derive(Debug, Clone, Copy)]
struct RawChunk {
    offset: usize,
    length: usize,
    chunk_type: [u8; 4],
}

impl RawChunk {
    fn data<'a>(&self, png: &'a [u8]) -> &'a [u8] {
        &png[self.offset + 8..self.offset + 8 + self.length]
    }

    fn crc(&self, png: &[u8]) -> u32 {
        let at = self.offset + 8 + self.length;
        BigEndian::read_u32(&png[at..at + 4])
    }
}

/// Walks the chunk chain, stops at the first truncated chunk.
struct ChunkWalker<'a> {
    png: &'a [u8],
    offset: usize,
}

impl<'a> ChunkWalker<'a> {
    fn new(png: &'a [u8]) -> Self {
        Self {
            png,
            offset: PNG_SIGNATURE.len(),
        }
    }
}

impl Iterator for ChunkWalker<'_> {
    type Item = RawChunk;

    fn next(&mut self) -> Option<Self::Item> {
        let header = self.png.get(self.offset..self.offset.checked_add(8)?)?;
        let length = BigEndian::read_u32(&header[..4]) as usize;
        let chunk_type = [header[4], header[5], header[6], header[7]];
        let end = self
            .offset
            .checked_add(CHUNK_OVERHEAD)?
            .checked_add(length)?;
        if end > self.png.len() {
            debug!(
                "chunk {:?} at offset {} is truncated",
                String::from_utf8_lossy(&chunk_type),
                self.offset
            );
            return None;
        }

        let chunk = RawChunk {
            offset: self.offset,
            length,
            chunk_type,
        };
        self.offset = end;
        Some(chunk)
    }
}

/// Whether the stream starts with the 8 byte PNG signature
pub fn has_signature(png: &[u8]) -> bool {
    png.starts_with(&PNG_SIGNATURE)
}

/// Inserts a chunk right before `IEND`.
///
/// All bytes before `IEND` and the `IEND` chunk itself stay untouched.
pub fn splice(png: &[u8], chunk_type: [u8; 4], data: &[u8]) -> Result<Vec<u8>> {
    if !has_signature(png) {
        return Err(ChaosmarkError::InvalidPngStructure("missing PNG signature"));
    }

    let iend = ChunkWalker::new(png)
        .find(|c| c.chunk_type == IEND)
        .ok_or(ChaosmarkError::InvalidPngStructure("no IEND chunk found"))?;
    debug!(
        "splicing {} byte {:?} chunk at offset {}",
        data.len(),
        String::from_utf8_lossy(&chunk_type),
        iend.offset
    );

    let chunk = PngChunk::new(chunk_type, data.to_vec()).to_bytes()?;
    let mut out = Vec::with_capacity(png.len() + chunk.len());
    out.extend_from_slice(&png[..iend.offset]);
    out.extend_from_slice(&chunk);
    out.extend_from_slice(&png[iend.offset..]);

    Ok(out)
}

/// Returns the data of the first chunk of the given type with a valid CRC.
///
/// Chunks with a CRC mismatch are skipped, the scan continues behind them.
/// A stream without signature or without such a chunk yields `None`.
pub fn find(png: &[u8], chunk_type: [u8; 4]) -> Option<Vec<u8>> {
    if !has_signature(png) {
        debug!("no PNG signature, nothing to scan");
        return None;
    }

    for chunk in ChunkWalker::new(png) {
        if chunk.chunk_type == chunk_type {
            let data = chunk.data(png);
            if chunk.crc(png) == chunk_crc(&chunk_type, data) {
                return Some(data.to_vec());
            }
            warn!(
                "{:?} chunk at offset {} is corrupted, CRC mismatch",
                String::from_utf8_lossy(&chunk_type),
                chunk.offset
            );
        }
        if chunk.chunk_type == IEND {
            break;
        }
    }

    None
}

/// Lists all chunks up to `IEND` or the first truncated chunk.
pub fn chunks(png: &[u8]) -> Result<Vec<PngChunk>> {
    if !has_signature(png) {
        return Err(ChaosmarkError::InvalidPngStructure("missing PNG signature"));
    }

    let mut all = Vec::new();
    for chunk in ChunkWalker::new(png) {
        all.push(PngChunk {
            chunk_type: chunk.chunk_type,
            data: chunk.data(png).to_vec(),
            crc: chunk.crc(png),
        });
        if chunk.chunk_type == IEND {
            break;
        }
    }

    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::Carrier;
    use image::{Rgb, RgbImage};

    fn tiny_png() -> Vec<u8> {
        Carrier::from(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])))
            .to_png_bytes()
            .unwrap()
    }

    #[test]
    fn should_compute_the_png_crc() {
        // the CRC every IEND chunk carries
        assert_eq!(chunk_crc(b"IEND", &[]), 0xAE42_6082);
    }

    #[test]
    fn should_classify_chunk_types() {
        let chunk = PngChunk::new(ARTIFACT_CHUNK_TYPE, b"{}".to_vec());
        assert!(chunk.is_ancillary());
        assert!(chunk.is_private());
        assert!(chunk.is_crc_valid());
        assert_eq!(chunk.type_name(), "zkPF");

        let iend = PngChunk::new(IEND, vec![]);
        assert!(!iend.is_ancillary());
        assert!(!iend.is_private());
        assert_eq!(
            iend.to_bytes().unwrap(),
            vec![0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
    }

    #[test]
    fn should_find_what_was_spliced() {
        let png = tiny_png();
        let data = br#"{"hello":"world"}"#;
        let spliced = splice(&png, ARTIFACT_CHUNK_TYPE, data).unwrap();

        assert_eq!(find(&spliced, ARTIFACT_CHUNK_TYPE).unwrap(), data.to_vec());
        assert_eq!(spliced.len(), png.len() + data.len() + CHUNK_OVERHEAD);
    }

    #[test]
    fn should_leave_all_other_bytes_untouched() {
        let png = tiny_png();
        let data = b"payload";
        let spliced = splice(&png, ARTIFACT_CHUNK_TYPE, data).unwrap();
        let inserted = data.len() + CHUNK_OVERHEAD;
        let iend_offset = png.len() - CHUNK_OVERHEAD;

        assert_eq!(&spliced[..iend_offset], &png[..iend_offset]);
        assert_eq!(&spliced[iend_offset + inserted..], &png[iend_offset..]);
        assert_eq!(&spliced[iend_offset + 4..iend_offset + 8], b"zkPF");

        // still a decodable image
        assert!(Carrier::from_png_bytes(&spliced).is_ok());
    }

    #[test]
    fn should_report_every_tampered_data_byte_as_not_found() {
        let png = tiny_png();
        let data = br#"{"chaos":{"x0":1}}"#;
        let spliced = splice(&png, ARTIFACT_CHUNK_TYPE, data).unwrap();
        let data_start = png.len() - CHUNK_OVERHEAD + 8;

        for i in data_start..data_start + data.len() {
            let mut tampered = spliced.clone();
            tampered[i] ^= 0x01;
            assert_eq!(
                find(&tampered, ARTIFACT_CHUNK_TYPE),
                None,
                "flip at offset {i} went unnoticed"
            );
        }
    }

    #[test]
    fn should_skip_a_corrupted_chunk_and_keep_scanning() {
        let png = tiny_png();
        let once = splice(&png, ARTIFACT_CHUNK_TYPE, b"first").unwrap();
        let mut twice = splice(&once, ARTIFACT_CHUNK_TYPE, b"second").unwrap();
        let first_data = png.len() - CHUNK_OVERHEAD + 8;
        twice[first_data] ^= 0xff;

        assert_eq!(find(&twice, ARTIFACT_CHUNK_TYPE), Some(b"second".to_vec()));
    }

    #[test]
    fn should_not_find_missing_chunks() {
        let png = tiny_png();
        assert_eq!(find(&png, ARTIFACT_CHUNK_TYPE), None);
        assert_eq!(find(b"GIF89a", ARTIFACT_CHUNK_TYPE), None);
        assert_eq!(find(&png[..20], ARTIFACT_CHUNK_TYPE), None);
    }

    #[test]
    fn should_refuse_to_splice_into_broken_streams() {
        assert!(matches!(
            splice(b"not a png at all", ARTIFACT_CHUNK_TYPE, b"x"),
            Err(ChaosmarkError::InvalidPngStructure(_))
        ));

        let png = tiny_png();
        let without_iend = &png[..png.len() - CHUNK_OVERHEAD];
        assert!(matches!(
            splice(without_iend, ARTIFACT_CHUNK_TYPE, b"x"),
            Err(ChaosmarkError::InvalidPngStructure(_))
        ));
    }

    #[test]
    fn should_list_chunks_in_order() {
        let png = tiny_png();
        let spliced = splice(&png, ARTIFACT_CHUNK_TYPE, b"meta").unwrap();
        let all = chunks(&spliced).unwrap();
        let names: Vec<String> = all.iter().map(PngChunk::type_name).collect();

        assert_eq!(names.first().map(String::as_str), Some("IHDR"));
        assert_eq!(&names[names.len() - 2..], &["zkPF", "IEND"]);
        assert!(all.iter().all(PngChunk::is_crc_valid));
    }
}
