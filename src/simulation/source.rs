//! Benchmark input blocks.
//!
//! The block transmitted in every trial of the benchmark comes from a source
//! given on the command line, which can be:
//!
//! - a positive integer `n`, giving an all-zero block of `n` bits;
//! - `BxN`, giving an all-zero block of `B * N` bits;
//! - the path of a text file containing the block as ASCII `0` and `1`
//!   characters. Any other characters are skipped, and reading stops after
//!   [`MAX_BITS`] bits.
//!
//! # Examples
//! ```
//! # use star_ldpc::simulation::source::InputBlock;
//! let block = InputBlock::from_ascii(b"0110 1\n".as_slice());
//! assert_eq!(block.len(), 5);
//! assert_eq!(block.iter().collect::<Vec<_>>(), [false, true, true, false, true]);
//! ```

use std::path::Path;
use thiserror::Error;

/// Maximum number of bits of an input block.
pub const MAX_BITS: usize = 1024;

const WORDS: usize = MAX_BITS / 64;

/// Input block error.
#[derive(Debug, Error)]
pub enum Error {
    /// The block is longer than [`MAX_BITS`].
    #[error("input block of {0} bits is too long (maximum {MAX_BITS})")]
    TooLong(usize),
    /// The source file could not be read.
    #[error("cannot read input block {path}: {source}")]
    Io {
        /// Path of the source file.
        path: String,
        /// I/O error.
        source: std::io::Error,
    },
}

/// Block of bits transmitted through the channel.
///
/// The bits are stored packed in 64-bit words, bit `i` being bit `i % 64` of
/// word `i / 64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBlock {
    words: [u64; WORDS],
    len: usize,
}

impl InputBlock {
    /// Creates an all-zero block of `len` bits.
    pub fn zeros(len: usize) -> Result<InputBlock, Error> {
        if len > MAX_BITS {
            return Err(Error::TooLong(len));
        }
        Ok(InputBlock {
            words: [0; WORDS],
            len,
        })
    }

    /// Reads a block from ASCII `0` and `1` characters.
    ///
    /// Characters other than `0` and `1` are skipped. Only the first
    /// [`MAX_BITS`] bits are read.
    pub fn from_ascii(text: &[u8]) -> InputBlock {
        let mut block = InputBlock {
            words: [0; WORDS],
            len: 0,
        };
        for &c in text {
            if block.len == MAX_BITS {
                break;
            }
            match c {
                b'1' => {
                    block.words[block.len / 64] |= 1u64 << (block.len % 64);
                    block.len += 1;
                }
                b'0' => block.len += 1,
                _ => (),
            }
        }
        block
    }

    /// Parses a block source.
    ///
    /// See the [module documentation](self) for the supported formats.
    pub fn from_source(source: &str) -> Result<InputBlock, Error> {
        if let Some(len) = parse_length(source) {
            return InputBlock::zeros(len);
        }
        InputBlock::load(source)
    }

    /// Loads a block from an ASCII file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<InputBlock, Error> {
        let path = path.as_ref();
        let text = std::fs::read(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(InputBlock::from_ascii(&text))
    }

    /// Returns the number of bits of the block.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the block has no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over the bits of the block.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| (self.words[i / 64] >> (i % 64)) & 1 == 1)
    }
}

// Parses "n" and "BxN" lengths. Zero lengths are not lengths, so they are
// looked up as files.
fn parse_length(source: &str) -> Option<usize> {
    let len = match source.split_once('x') {
        Some((b, n)) => b.parse::<usize>().ok()?.checked_mul(n.parse::<usize>().ok()?)?,
        None => source.parse::<usize>().ok()?,
    };
    (len > 0).then_some(len)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lengths() {
        assert_eq!(parse_length("544"), Some(544));
        assert_eq!(parse_length("2x272"), Some(544));
        assert_eq!(parse_length("0"), None);
        assert_eq!(parse_length("3x0"), None);
        assert_eq!(parse_length("block.txt"), None);
        assert_eq!(parse_length("x5"), None);
    }

    #[test]
    fn zeros() {
        let block = InputBlock::from_source("4x256").unwrap();
        assert_eq!(block.len(), MAX_BITS);
        assert!(block.iter().all(|b| !b));
        assert!(matches!(
            InputBlock::from_source("1025"),
            Err(Error::TooLong(1025))
        ));
    }

    #[test]
    fn ascii() {
        let block = InputBlock::from_ascii(b"1a0\r\n1x1");
        assert_eq!(block.len(), 4);
        assert_eq!(block.iter().collect::<Vec<_>>(), [true, false, true, true]);

        let long = vec![b'1'; 2000];
        let block = InputBlock::from_ascii(&long);
        assert_eq!(block.len(), MAX_BITS);
        assert!(block.iter().all(|b| b));
    }

    #[test]
    fn file() {
        let path =
            std::env::temp_dir().join(format!("star-ldpc-block-{}.txt", std::process::id()));
        std::fs::write(&path, "0000 0001\n0000 0011\n").unwrap();
        let block = InputBlock::from_source(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(block.len(), 16);
        assert_eq!(
            block.iter().enumerate().filter(|(_, b)| *b).map(|(i, _)| i).collect::<Vec<_>>(),
            [7, 14, 15]
        );
        assert!(matches!(
            InputBlock::from_source("/nonexistent/block.txt"),
            Err(Error::Io { .. })
        ));
    }
}
