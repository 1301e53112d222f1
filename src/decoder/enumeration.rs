//! Exhaustive enumeration decoders.
//!
//! These decoders go through all the `2^k` codewords of an (n, k) code,
//! obtained with the systematic [`Encoder`], and compute the likelihood of
//! each of them given the received likelihood ratios. Two decisions are
//! supported:
//!
//! - [`Decision::Block`] chooses the most likely codeword, minimizing the
//!   block error probability.
//! - [`Decision::Bit`] computes the posterior probability of each bit over
//!   all the codewords and decides each bit separately, minimizing the bit
//!   error probability. The result need not be a codeword.
//!
//! The number of iterations reported is the number of codewords considered.
//!
//! The encoder takes the last `n - k` columns of H as parity bits, so the
//! square submatrix they form must be invertible. Parity check matrices that
//! are valid but have a singular parity block are rejected with
//! [`Error::Encoder`]. Star codes always qualify, since their parity block is
//! the identity.

use super::{check, DecoderOutput, Error, LdpcDecoder};
use crate::{encoder::Encoder, sparse::SparseMatrix};

/// Maximum number of message bits supported by the enumeration decoders.
pub const MAX_MESSAGE_BITS: usize = 31;

/// Decision rule of the enumeration decoder.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Decision {
    /// Maximum likelihood codeword.
    Block,
    /// Maximum a posteriori bits.
    Bit,
}

/// LDPC exhaustive enumeration decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoder {
    h: SparseMatrix,
    encoder: Encoder,
    decision: Decision,
    candidate: Vec<u8>,
    // per bit log-probabilities of 0 and 1
    log_probs: Vec<(f64, f64)>,
    codeword: Vec<u8>,
    bit_probabilities: Vec<f64>,
    parity: Vec<u8>,
}

impl Decoder {
    /// Creates a new enumeration decoder.
    ///
    /// Fails if the code has more than [`MAX_MESSAGE_BITS`] message bits or
    /// if the parity check matrix does not admit a systematic encoder.
    pub fn new(h: SparseMatrix, decision: Decision) -> Result<Decoder, Error> {
        let k = h.num_cols().saturating_sub(h.num_rows());
        if k > MAX_MESSAGE_BITS {
            return Err(Error::TooManyMessageBits(k));
        }
        let encoder = Encoder::from_h(&h)?;
        let n = h.num_cols();
        let parity = vec![0; h.num_rows()];
        Ok(Decoder {
            h,
            encoder,
            decision,
            candidate: vec![0; n],
            log_probs: vec![(0.0, 0.0); n],
            codeword: vec![0; n],
            bit_probabilities: vec![0.0; n],
            parity,
        })
    }

    /// Decodes a block.
    ///
    /// All the codewords are always considered. Returns an `Ok` if the
    /// decoded block satisfies all the parity checks, which is always the
    /// case for [`Decision::Block`], and an `Err` otherwise.
    pub fn decode(&mut self, lratios: &[f64]) -> Result<DecoderOutput, DecoderOutput> {
        assert_eq!(lratios.len(), self.h.num_cols());
        for (lp, &lr) in self.log_probs.iter_mut().zip(lratios.iter()) {
            let p0 = 1.0 / (1.0 + lr);
            *lp = (p0.ln(), (1.0 - p0).ln());
        }
        let codewords = 1u64 << self.encoder.k();
        match self.decision {
            Decision::Block => self.decode_block(codewords),
            Decision::Bit => self.decode_bit(codewords),
        }
        let output = DecoderOutput {
            codeword: self.codeword.clone(),
            bit_probabilities: self.bit_probabilities.clone(),
            iterations: codewords as usize,
        };
        if check(&self.h, &self.codeword, &mut self.parity) == 0 {
            Ok(output)
        } else {
            Err(output)
        }
    }

    fn log_likelihood(&self) -> f64 {
        self.candidate
            .iter()
            .zip(self.log_probs.iter())
            .map(|(&b, &(l0, l1))| if b == 1 { l1 } else { l0 })
            .sum()
    }

    fn decode_block(&mut self, codewords: u64) {
        let mut best = f64::NEG_INFINITY;
        for message in 0..codewords {
            self.encoder.encode_bits(message, &mut self.candidate);
            let lp = self.log_likelihood();
            if message == 0 || lp > best {
                best = lp;
                self.codeword.copy_from_slice(&self.candidate);
            }
        }
        for (prob, &bit) in self
            .bit_probabilities
            .iter_mut()
            .zip(self.codeword.iter())
        {
            *prob = f64::from(bit);
        }
    }

    fn decode_bit(&mut self, codewords: u64) {
        // Sums of likelihoods, scaled by exp(-max_lp)
        let mut max_lp = f64::NEG_INFINITY;
        let mut total = 0.0;
        self.bit_probabilities.fill(0.0);
        for message in 0..codewords {
            self.encoder.encode_bits(message, &mut self.candidate);
            let lp = self.log_likelihood();
            if lp == f64::NEG_INFINITY {
                continue;
            }
            if lp > max_lp {
                let scale = (max_lp - lp).exp();
                total *= scale;
                self.bit_probabilities.iter_mut().for_each(|x| *x *= scale);
                max_lp = lp;
            }
            let w = (lp - max_lp).exp();
            total += w;
            for (x, &b) in self
                .bit_probabilities
                .iter_mut()
                .zip(self.candidate.iter())
            {
                if b == 1 {
                    *x += w;
                }
            }
        }
        for (prob, bit) in self
            .bit_probabilities
            .iter_mut()
            .zip(self.codeword.iter_mut())
        {
            *prob = if total > 0.0 { *prob / total } else { 0.5 };
            *bit = u8::from(*prob > 0.5);
        }
    }
}

impl LdpcDecoder for Decoder {
    fn decode(
        &mut self,
        lratios: &[f64],
        _max_iterations: usize,
    ) -> Result<DecoderOutput, DecoderOutput> {
        Decoder::decode(self, lratios)
    }
}
