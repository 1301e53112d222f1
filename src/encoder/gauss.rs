use crate::gf2::GF2;
use ndarray::Array2;
use num_traits::One;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Error {
    NotInvertible,
}

/// Gauss-Jordan reduction over GF(2).
///
/// Reduces an n x m array (n <= m) so that its first n columns become the
/// identity. Fails if the square block formed by the first n columns is
/// singular.
pub fn gauss_reduction(array: &mut Array2<GF2>) -> Result<(), Error> {
    let (n, m) = array.dim();

    for j in 0..n {
        let pivot = (j..n)
            .find(|&r| array[[r, j]].is_one())
            .ok_or(Error::NotInvertible)?;
        if pivot != j {
            for t in j..m {
                array.swap([j, t], [pivot, t]);
            }
        }

        // Clear column j in every other row
        let pivot_row = array.row(j).to_owned();
        for (r, mut row) in array.rows_mut().into_iter().enumerate() {
            if r != j && row[j].is_one() {
                row += &pivot_row;
            }
        }
    }

    Ok(())
}
