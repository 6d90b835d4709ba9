//! Lossless byte compression with a static Huffman code.
//!
//! The whole input is counted, a Huffman tree is built over the byte
//! frequencies, and the resulting code table is stored ahead of the packed
//! payload so an archive can be decoded on its own.
//!
//! ```
//! let archive = huffman_archive::compress(b"ABRACADABRA")?;
//! assert_eq!(huffman_archive::decompress(&archive)?, b"ABRACADABRA");
//! # Ok::<(), huffman_archive::Error>(())
//! ```

pub mod archive;
pub mod bits;
pub mod coding;
pub mod decoder;
mod error;
pub mod frequency;
pub mod tree;

pub use {
    archive::{compress_file, decompress_file, Header, Stats},
    coding::{Code, CodeTable},
    error::{Error, Result},
    frequency::ByteFrequency,
    tree::HuffmanTree,
};

/// Compresses `bytes` into a self-describing archive.
pub fn compress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut archive = Vec::new();
    archive::compress(bytes, &mut archive)?;
    Ok(archive)
}

/// Restores the bytes an archive was made from.
pub fn decompress(archive: &[u8]) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    archive::decompress(archive, &mut bytes)?;
    Ok(bytes)
}
