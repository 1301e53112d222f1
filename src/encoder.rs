//! LDPC systematic encoder.
//!
//! This module implements a systematic encoder for LDPC (n, k) codes in which
//! the parity check matrix H has size (n-k) x n (i.e., has maximum rank), and
//! the square matrix formed by the last n-k columns of H is invertible. For
//! these codes, the encoder uses the first k symbols of the codeword as
//! systematic.
//!
//! If H = [H0 H1], where H1 is square, the encoder computes G0 = H1^{-1}H0,
//! which in general is a dense matrix. To encode a message, the matrix G0 is
//! multiplied by the k message bits (as a column vector on the right) to
//! obtain the n-k parity check bits.
//!
//! For Star codes H1 is the identity, so G0 = H0.

use crate::{gf2::GF2, sparse::SparseMatrix};
use ndarray::{s, Array2};
use num_traits::One;
use thiserror::Error;

mod gauss;

/// LDPC encoder error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The parity check matrix has at least as many rows as columns.
    #[error("the parity check matrix has no message bits")]
    NoMessageBits,
    /// The square submatrix formed by the last columns of the parity check
    /// matrix is not invertible, so the encoder cannot be constructed.
    #[error("the square matrix formed by the last columns of the parity check is not invertible")]
    SubmatrixNotInvertible,
}

/// LDPC systematic encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoder {
    gen_matrix: Array2<GF2>,
}

impl Encoder {
    /// Creates the systematic encoder corresponding to a parity check matrix.
    pub fn from_h(h: &SparseMatrix) -> Result<Encoder, Error> {
        let n = h.num_rows();
        let m = h.num_cols();
        if m <= n {
            return Err(Error::NoMessageBits);
        }

        // If H = [H0 H1] with H0 n x (m-n) and H1 n x n, then
        // A = [H1 H0].
        let mut a = Array2::zeros((n, m));
        for (j, k) in h.iter_all() {
            let t = if k < m - n { k + n } else { k - (m - n) };
            a[[j, t]] = GF2::one();
        }

        match gauss::gauss_reduction(&mut a) {
            Ok(()) => (),
            Err(gauss::Error::NotInvertible) => return Err(Error::SubmatrixNotInvertible),
        };

        let gen_matrix = a.slice(s![.., n..]).to_owned();
        Ok(Encoder { gen_matrix })
    }

    /// Returns the number of message bits.
    pub fn k(&self) -> usize {
        self.gen_matrix.ncols()
    }

    /// Encodes a message given as the bits of an integer.
    ///
    /// Bit `j` of `message` is the message bit `j`. The codeword is written
    /// into `codeword` as unpacked bits.
    pub fn encode_bits(&self, message: u64, codeword: &mut [u8]) {
        let k = self.k();
        let (systematic, parity) = codeword.split_at_mut(k);
        for (j, bit) in systematic.iter_mut().enumerate() {
            *bit = ((message >> j) & 1) as u8;
        }
        for (row, bit) in self.gen_matrix.rows().into_iter().zip(parity.iter_mut()) {
            let x: GF2 = row
                .iter()
                .zip(systematic.iter())
                .filter(|(_, &b)| b == 1)
                .map(|(&g, _)| g)
                .sum();
            *bit = x.into();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codes::star::StarCode;

    fn test_h() -> SparseMatrix {
        let mut h = SparseMatrix::new(4, 12);
        h.insert_row(0, [0, 1, 4, 5, 6, 7, 8, 10, 11].iter());
        h.insert_row(1, [0, 2, 3, 4, 5, 7, 8, 9, 10].iter());
        h.insert_row(2, [0, 1, 2, 3, 5, 6, 8, 9, 11].iter());
        h.insert_row(3, [1, 2, 3, 4, 6, 7, 9, 10, 11].iter());
        h
    }

    #[test]
    fn encode_bits() {
        let encoder = Encoder::from_h(&test_h()).unwrap();
        let mut codeword = [0; 12];
        assert_eq!(encoder.k(), 8);
        // message bits 1, 0, 1, 1, 0, 0, 1, 0
        encoder.encode_bits(0b0100_1101, &mut codeword);
        assert_eq!(codeword, [1, 0, 1, 1, 0, 0, 1, 0, 1, 0, 0, 1]);
        // message bits 0, 1, 0, 0, 1, 1, 1, 0
        encoder.encode_bits(0b0111_0010, &mut codeword);
        assert_eq!(codeword, [0, 1, 0, 0, 1, 1, 1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn star_codewords() {
        let h = StarCode::new(2, 3).unwrap().matrix().h();
        let encoder = Encoder::from_h(&h).unwrap();
        assert_eq!(encoder.k(), 6);
        let mut codeword = [0; 12];
        for message in 0..64 {
            encoder.encode_bits(message, &mut codeword);
            for r in 0..h.num_rows() {
                let parity: u8 = h.iter_row(r).map(|&c| codeword[c]).sum();
                assert_eq!(parity % 2, 0);
            }
        }
    }

    #[test]
    fn not_invertible() {
        let mut h = SparseMatrix::new(2, 4);
        h.insert_row(0, [0, 2, 3].iter());
        h.insert_row(1, [1, 2, 3].iter());
        assert_eq!(Encoder::from_h(&h), Err(Error::SubmatrixNotInvertible));
        assert_eq!(
            Encoder::from_h(&SparseMatrix::new(3, 3)),
            Err(Error::NoMessageBits)
        );
    }
}
