use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use std::io::Result;

/// Splits bytes into bits, most significant bit of the first byte first.
pub fn bytes_to_bits(bytes: &[u8]) -> Result<Vec<bool>> {
    let mut reader = BitReader::endian(bytes, BigEndian);
    (0..bytes.len() * 8).map(|_| reader.read_bit()).collect()
}

/// Packs bits into bytes, most significant bit first.
/// A trailing partial byte is padded with zero bits.
pub fn bits_to_bytes(bits: &[bool]) -> Result<Vec<u8>> {
    let mut writer = BitWriter::endian(Vec::with_capacity(bits.len().div_ceil(8)), BigEndian);
    for &bit in bits {
        writer.write_bit(bit)?;
    }
    writer.byte_align()?;

    Ok(writer.into_writer())
}

/// Parses a string of `0` and `1` characters, `None` on any other character.
pub fn bits_from_str(s: &str) -> Option<Vec<bool>> {
    s.chars()
        .map(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
        .collect()
}

pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}
