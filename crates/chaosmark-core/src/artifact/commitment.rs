//! Hashes binding an artifact to its cover image and its position sequence.
//!
//! The commitment root is a binary SHA-256 Merkle tree over the positions:
//!
//! * leaf = `SHA256(0x00 || x_be32 || y_be32)`
//! * node = `SHA256(0x01 || left || right)`
//! * an odd node at the end of a level is promoted unchanged
//! * the root of an empty sequence is `SHA256("")`

use sha2::{Digest, Sha256};

use crate::chaos::Position;

pub const DIGEST_SIZE: usize = 32;

const LEAF_PREFIX: u8 = 0x00;
const NODE_PREFIX: u8 = 0x01;

pub type Digest32 = [u8; DIGEST_SIZE];

/// SHA-256 of the cover file bytes, lowercase hex
pub fn image_hash_hex(cover: &[u8]) -> String {
    hex::encode(Sha256::digest(cover))
}

pub fn position_leaf(&(x, y): &Position) -> Digest32 {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(x.to_be_bytes());
    hasher.update(y.to_be_bytes());
    hasher.finalize().into()
}

fn node(left: &Digest32, right: &Digest32) -> Digest32 {
    let mut hasher = Sha256::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

pub fn commitment_root(positions: &[Position]) -> Digest32 {
    if positions.is_empty() {
        return Sha256::digest(b"").into();
    }

    let mut level: Vec<Digest32> = positions.iter().map(position_leaf).collect();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| match pair {
                [left, right] => node(left, right),
                [single] => *single,
                _ => unreachable!("chunks(2) yields one or two items"),
            })
            .collect();
    }
    level[0]
}

pub fn commitment_root_hex(positions: &[Position]) -> String {
    hex::encode(commitment_root(positions))
}
