//! Star LDPC codes.
//!
//! Star codes are systematic LDPC codes with rate 1/2 built from a grid of
//! `height` rows and `width` columns of message variables. Each message
//! variable `k = r * width + c` sits at row `r` and column `c` of the grid.
//! The checks are obtained by walking the grid along diagonals of every slope
//! `s` in `0..height`, with the column index taken modulo `height`. When a
//! diagonal lands outside the grid (on the columns `width..height`) it folds
//! in an accumulator row instead of a message variable, and the phases
//! starting outside the grid are distributed over all the checks of their
//! slope.
//!
//! The parity check matrix has `n = width * height` rows and `2n` columns.
//! The first `n` columns correspond to the message variables, and the last
//! `n` columns form an identity block with the parity variables, so the code
//! can be encoded systematically.
//!
//! # Examples
//! The 272-bit Star code is generated with
//! ```
//! # use star_ldpc::codes::star::StarCode;
//! let code = StarCode::from_message_bits(272).unwrap();
//! assert_eq!((code.width(), code.height()), (16, 17));
//! let h = code.matrix().h();
//! assert_eq!(h.num_rows(), 272);
//! assert_eq!(h.num_cols(), 544);
//! ```

use crate::{bitrow::BitRow, pchk, sparse::SparseMatrix};
use std::{fs::File, io::BufWriter, io::Write, path::Path};
use thiserror::Error;

/// Star code construction error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The grid dimensions cannot be used to build a Star code.
    #[error("invalid Star code grid {width}x{height} (need 1 <= width <= height and width * height <= {max})", max = BitRow::BITS)]
    InvalidDimensions {
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
    /// There is no Star code with this number of message bits.
    #[error("no Star code has {0} message bits (it must be w * (w + 1))")]
    InvalidSize(usize),
}

/// Star code definition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct StarCode {
    width: usize,
    height: usize,
}

impl StarCode {
    /// Creates a Star code definition for a grid of `width` columns and
    /// `height` rows.
    ///
    /// # Errors
    ///
    /// The dimensions must satisfy `1 <= width <= height` and the number of
    /// message bits `width * height` must fit in a [`BitRow`].
    pub fn new(width: usize, height: usize) -> Result<StarCode, Error> {
        if width == 0 || width > height || width * height > BitRow::BITS {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(StarCode { width, height })
    }

    /// Creates the Star code with a given number of message bits.
    ///
    /// The grid has `height = width + 1`, so the number of message bits must
    /// be of the form `w * (w + 1)`. For instance, 272 gives the 16x17 grid.
    pub fn from_message_bits(message_bits: usize) -> Result<StarCode, Error> {
        (1..)
            .take_while(|w| w * (w + 1) <= message_bits)
            .find(|w| w * (w + 1) == message_bits)
            .ok_or(Error::InvalidSize(message_bits))
            .and_then(|w| StarCode::new(w, w + 1))
    }

    /// Returns the grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of message variables.
    pub fn message_bits(&self) -> usize {
        self.width * self.height
    }

    /// Runs the construction.
    pub fn matrix(&self) -> StarMatrix {
        let (w, h) = (self.width, self.height);
        let n = self.message_bits();
        let mut message_rows = vec![BitRow::new(); n];
        let mut derived_checks = vec![BitRow::new(); n];

        // seed each message variable with itself
        for r in 0..h {
            for c in 0..w {
                let k = r * w + c;
                message_rows[k].toggle(k);
            }
        }

        let mut accumulator = vec![BitRow::new(); h];
        for slope in 0..h {
            for row in accumulator.iter_mut() {
                row.reset();
            }
            let checks = &mut derived_checks[slope * w..(slope + 1) * w];
            for phase in 0..h {
                let mut t = BitRow::new();
                for (x, acc) in accumulator.iter().enumerate() {
                    let y = (phase + x * slope) % h;
                    if y < w {
                        t.toggle(x * w + y);
                    } else {
                        t ^= acc;
                    }
                }
                if phase < w {
                    checks[phase] = t;
                } else {
                    // phases outside the grid go to every check of this slope
                    for check in checks.iter_mut() {
                        *check ^= t;
                    }
                }
            }
        }

        StarMatrix {
            code: *self,
            message_rows,
            derived_checks,
        }
    }
}

/// Star code matrix.
///
/// This holds the result of the Star construction as two collections of
/// [`BitRow`]s indexed by message variable. The identity block pairing
/// message column `j` with parity column `j + n` is implicit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StarMatrix {
    code: StarCode,
    message_rows: Vec<BitRow>,
    derived_checks: Vec<BitRow>,
}

impl StarMatrix {
    /// Returns the code definition.
    pub fn code(&self) -> StarCode {
        self.code
    }

    /// Returns the seed rows of the message variables.
    ///
    /// Row `k` has only bit `k` set.
    pub fn message_rows(&self) -> &[BitRow] {
        &self.message_rows
    }

    /// Returns the derived checks.
    ///
    /// Bit `i` of entry `j` is set if the message variable `i` takes part in
    /// check `j`.
    pub fn derived_checks(&self) -> &[BitRow] {
        &self.derived_checks
    }

    /// Returns the total number of ones in both collections.
    pub fn popcount(&self) -> usize {
        self.message_rows
            .iter()
            .chain(self.derived_checks.iter())
            .map(BitRow::popcount)
            .sum()
    }

    /// Constructs the parity check matrix.
    pub fn h(&self) -> SparseMatrix {
        let n = self.code.message_bits();
        let mut h = SparseMatrix::new(n, 2 * n);
        for (j, check) in self.derived_checks.iter().enumerate() {
            // bits at n and above are never set by the construction
            h.insert_row(j, check.iter_ones().filter(|&i| i < n));
            h.insert(j, j + n);
        }
        h
    }

    /// Writes the parity check matrix in PCHK format.
    pub fn write_pchk<W: Write>(&self, w: W) -> std::io::Result<()> {
        pchk::write(&self.h(), w)
    }

    /// Saves the parity check matrix to a PCHK file.
    ///
    /// The file is created or truncated.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut f = BufWriter::new(File::create(path)?);
        self.write_pchk(&mut f)?;
        f.flush()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dimensions() {
        assert!(StarCode::new(16, 17).is_ok());
        assert!(StarCode::new(3, 3).is_ok());
        assert_eq!(
            StarCode::new(17, 16),
            Err(Error::InvalidDimensions {
                width: 17,
                height: 16
            })
        );
        assert!(StarCode::new(0, 5).is_err());
        assert!(StarCode::new(17, 19).is_err());
        assert_eq!(StarCode::from_message_bits(272), StarCode::new(16, 17));
        assert_eq!(StarCode::from_message_bits(6), StarCode::new(2, 3));
        assert_eq!(
            StarCode::from_message_bits(273),
            Err(Error::InvalidSize(273))
        );
        assert_eq!(StarCode::from_message_bits(0), Err(Error::InvalidSize(0)));
        // 17 * 18 = 306 fits, 18 * 19 = 342 does not
        assert!(StarCode::from_message_bits(306).is_ok());
        assert!(matches!(
            StarCode::from_message_bits(342),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn base_diagonal() {
        for (w, h) in [(2, 3), (3, 3), (4, 5), (16, 17)] {
            let m = StarCode::new(w, h).unwrap().matrix();
            assert_eq!(m.message_rows().len(), w * h);
            for (k, row) in m.message_rows().iter().enumerate() {
                assert_eq!(row.popcount(), 1);
                assert!(row.get(k));
            }
        }
    }

    #[test]
    fn star272_popcount() {
        let m = StarCode::new(16, 17).unwrap().matrix();
        assert_eq!(m.popcount(), 8736);
        let derived: usize = m.derived_checks().iter().map(BitRow::popcount).sum();
        assert_eq!(derived, 8464);
        // slope 0 checks are single rows of the grid
        assert_eq!(
            m.derived_checks()[0].iter_ones().collect::<Vec<_>>(),
            (0..272).step_by(16).collect::<Vec<_>>()
        );
        assert_eq!(m.derived_checks()[271].popcount(), 32);
    }

    #[test]
    fn baselines() {
        for (w, h, total) in [(2, 3, 28), (3, 4, 76), (4, 5, 168), (3, 3, 36)] {
            assert_eq!(StarCode::new(w, h).unwrap().matrix().popcount(), total);
        }
    }

    #[test]
    fn small_h() {
        let h = StarCode::new(2, 3).unwrap().matrix().h();
        let expected: [&[usize]; 6] = [
            &[0, 2, 4, 6],
            &[1, 3, 5, 7],
            &[0, 2, 3, 5, 8],
            &[1, 2, 4, 5, 9],
            &[0, 3, 4, 5, 10],
            &[1, 2, 3, 4, 11],
        ];
        assert_eq!(h.num_rows(), 6);
        assert_eq!(h.num_cols(), 12);
        for (j, row) in expected.iter().enumerate() {
            assert_eq!(&h.sorted_row(j), row);
        }
    }

    #[test]
    fn square_grid_has_no_wrap() {
        // with width == height every diagonal stays inside the grid, so each
        // check has exactly one variable per grid row
        let m = StarCode::new(3, 3).unwrap().matrix();
        for check in m.derived_checks() {
            assert_eq!(check.popcount(), 3);
        }
    }
}
