//! LDPC decoders.
//!
//! This module provides the decoders used by the channel benchmark. They all
//! take as input the likelihood ratios `P(bit = 1) / P(bit = 0)` of the
//! received bits.
//!
//! - [`prprp`] implements belief propagation (probability propagation) with a
//!   flooding schedule.
//! - [`enumeration`] implements exhaustive decoding by enumerating all the
//!   codewords, either choosing the most likely codeword or deciding each bit
//!   according to its posterior probability. It is only feasible for codes
//!   with few message bits.
//!
//! The functions [`check`] and [`changed`] are used to evaluate the decoded
//! blocks.

use crate::sparse::SparseMatrix;
use thiserror::Error;

pub mod enumeration;
pub mod factory;
pub mod prprp;

/// LDPC decoder construction error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The code has too many message bits for exhaustive enumeration.
    #[error("decoding {0} message bits by exhaustive enumeration is not feasible (maximum {max})", max = enumeration::MAX_MESSAGE_BITS)]
    TooManyMessageBits(usize),
    /// The enumeration decoder needs an encoder for the code.
    #[error("cannot build encoder: {0}")]
    Encoder(#[from] crate::encoder::Error),
}

/// Generic LDPC decoder.
///
/// This trait is used to form LDPC decoder trait objects, abstracting over the
/// decoding algorithm.
pub trait LdpcDecoder: std::fmt::Debug + Send {
    /// Decodes a block.
    ///
    /// The parameters are the likelihood ratios for the received block and
    /// the maximum number of iterations to perform. If the decoded block
    /// satisfies all the parity checks, the function returns an `Ok`
    /// containing the decoder output. Otherwise it returns an `Err`
    /// containing the output on which the decoder gave up.
    fn decode(
        &mut self,
        lratios: &[f64],
        max_iterations: usize,
    ) -> Result<DecoderOutput, DecoderOutput>;
}

/// LDPC decoder output.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderOutput {
    /// Decoded block.
    ///
    /// Contains the hard decision bits of the decoded block.
    pub codeword: Vec<u8>,
    /// Bit probabilities.
    ///
    /// Contains the decoder's estimate of the probability that each bit is
    /// a one.
    pub bit_probabilities: Vec<f64>,
    /// Number of iterations.
    ///
    /// Number of iterations used in decoding. For the enumeration decoders
    /// this is the number of codewords considered.
    pub iterations: usize,
}

/// Computes the parity checks of a block.
///
/// The parity of each check is written into `parity`, and the number of
/// unsatisfied checks is returned. The block is a codeword if this is zero.
///
/// # Examples
/// ```
/// # use star_ldpc::{decoder::check, sparse::SparseMatrix};
/// let mut h = SparseMatrix::new(2, 3);
/// h.insert_row(0, [0, 1].iter());
/// h.insert_row(1, [1, 2].iter());
/// let mut parity = [0; 2];
/// assert_eq!(check(&h, &[1, 1, 1], &mut parity), 0);
/// assert_eq!(check(&h, &[1, 0, 1], &mut parity), 2);
/// assert_eq!(parity, [1, 1]);
/// ```
pub fn check(h: &SparseMatrix, codeword: &[u8], parity: &mut [u8]) -> usize {
    assert_eq!(codeword.len(), h.num_cols());
    assert_eq!(parity.len(), h.num_rows());
    for (r, p) in parity.iter_mut().enumerate() {
        *p = h.iter_row(r).fold(0, |acc, &c| acc ^ codeword[c]);
    }
    parity.iter().filter(|&&p| p != 0).count()
}

/// Counts how many bits the decoder changed.
///
/// A bit is changed if the decoded value differs from the hard decision on
/// its likelihood ratio. Bits whose likelihood ratio is exactly one have no
/// hard decision, and count as half a change.
pub fn changed(lratios: &[f64], codeword: &[u8]) -> f64 {
    lratios
        .iter()
        .zip(codeword.iter())
        .map(|(&lr, &bit)| {
            if lr == 1.0 {
                0.5
            } else if (lr > 1.0) != (bit == 1) {
                1.0
            } else {
                0.0
            }
        })
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn changed_bits() {
        let lratios = [4.0, 0.25, 1.0, 3.0, 0.5];
        assert_eq!(changed(&lratios, &[1, 0, 0, 1, 0]), 0.5);
        assert_eq!(changed(&lratios, &[0, 1, 1, 1, 0]), 2.5);
        assert_eq!(changed(&[], &[]), 0.0);
    }
}
