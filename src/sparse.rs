//! # Sparse binary matrix representation and functions
//!
//! This module implements a representation for sparse binary matrices based on
//! row and column adjacency lists, which is the representation used to handle
//! LDPC parity check matrices throughout this crate. The matrices can be
//! stored in and loaded from PCHK files using the [`pchk`](crate::pchk)
//! module.

use std::borrow::Borrow;
use std::slice::Iter;

/// A sparse binary matrix
///
/// The rows of a parity check matrix are the check equations and the columns
/// are the codeword bits.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SparseMatrix {
    rows: Vec<Vec<usize>>,
    cols: Vec<Vec<usize>>,
}

impl SparseMatrix {
    /// Create a new sparse matrix of a given size
    ///
    /// The matrix is inizialized to the zero matrix.
    ///
    /// # Examples
    /// ```
    /// # use star_ldpc::sparse::SparseMatrix;
    /// let h = SparseMatrix::new(272, 544);
    /// assert_eq!(h.num_rows(), 272);
    /// assert_eq!(h.num_cols(), 544);
    /// ```
    pub fn new(nrows: usize, ncols: usize) -> SparseMatrix {
        use std::iter::repeat_with;
        let rows = repeat_with(Vec::new).take(nrows).collect();
        let cols = repeat_with(Vec::new).take(ncols).collect();
        SparseMatrix { rows, cols }
    }

    /// Returns the number of rows of the matrix
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns of the matrix
    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    /// Returns the number of entries equal to one
    pub fn num_entries(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Returns `true` if the entry corresponding to a particular
    /// row and column is a one
    pub fn contains(&self, row: usize, col: usize) -> bool {
        // typically columns are shorter, so we search in the column
        self.cols[col].contains(&row)
    }

    /// Inserts a one in a particular row and column
    ///
    /// Inserting an entry which is already a one has no effect.
    ///
    /// # Examples
    /// ```
    /// # use star_ldpc::sparse::SparseMatrix;
    /// let mut h = SparseMatrix::new(10, 30);
    /// assert!(!h.contains(3, 7));
    /// h.insert(3, 7);
    /// h.insert(3, 7);
    /// assert!(h.contains(3, 7));
    /// assert_eq!(h.num_entries(), 1);
    /// ```
    pub fn insert(&mut self, row: usize, col: usize) {
        if !self.contains(row, col) {
            self.rows[row].push(col);
            self.cols[col].push(row);
        }
    }

    /// Inserts ones in particular columns of a row
    ///
    /// This effect is as calling `insert()` on each of the elements
    /// of the iterator `cols`.
    pub fn insert_row<T, S>(&mut self, row: usize, cols: T)
    where
        T: Iterator<Item = S>,
        S: Borrow<usize>,
    {
        for col in cols {
            self.insert(row, *col.borrow());
        }
    }

    /// Returns an [Iterator] over the entries equal to one
    /// in a particular row
    pub fn iter_row(&self, row: usize) -> Iter<'_, usize> {
        self.rows[row].iter()
    }

    /// Returns an [Iterator] over all the entries equal to one
    ///
    /// The iterator yields `(row, col)` pairs, row by row.
    pub fn iter_all(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, cols)| cols.iter().map(move |&c| (r, c)))
    }

    /// Returns the entries of a row sorted in increasing order
    pub fn sorted_row(&self, row: usize) -> Vec<usize> {
        let mut v = self.rows[row].clone();
        v.sort_unstable();
        v
    }

    /// Returns `true` if both matrices have the same size and the same ones
    ///
    /// Unlike `==`, this does not depend on the order in which the entries
    /// were inserted.
    pub fn same_entries(&self, other: &SparseMatrix) -> bool {
        self.num_rows() == other.num_rows()
            && self.num_cols() == other.num_cols()
            && (0..self.num_rows()).all(|r| self.sorted_row(r) == other.sorted_row(r))
    }
}
