//! PCHK parity check files.
//!
//! This module reads and writes sparse parity check matrices in the binary
//! PCHK format used by Radford Neal's LDPC software. All the numbers in the
//! file are 32-bit little-endian signed integers:
//!
//! - the magic number `0x5080` (the bytes `80 50 00 00`);
//! - the number of rows and the number of columns of the matrix;
//! - for each row, the marker `-(row + 1)` followed by `col + 1` for each of
//!   the columns containing a one in that row;
//! - a zero terminating the matrix.
//!
//! # Examples
//! ```
//! # use star_ldpc::{pchk, sparse::SparseMatrix};
//! let mut h = SparseMatrix::new(2, 4);
//! h.insert_row(0, [0, 2].iter());
//! h.insert_row(1, [1, 3].iter());
//! let mut buf = Vec::new();
//! pchk::write(&h, &mut buf).unwrap();
//! assert_eq!(&buf[..4], &[0x80, b'P', 0, 0]);
//! assert_eq!(buf.len(), 4 * (3 + 2 + 4 + 1));
//! let h2 = pchk::read(&buf[..]).unwrap();
//! assert!(h.same_entries(&h2));
//! ```

use crate::sparse::SparseMatrix;
use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Read, Write},
    path::Path,
};
use thiserror::Error;

/// Magic number at the start of a PCHK file.
pub const MAGIC: i32 = (b'P' as i32) << 8 | 0x80;

/// PCHK read error.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file ends before the terminating zero.
    #[error("PCHK file is truncated")]
    Truncated,
    /// The file does not start with the PCHK magic number.
    #[error("not a PCHK file (magic number {0:#x})")]
    BadMagic(i32),
    /// The matrix size is not valid.
    #[error("invalid PCHK matrix size {rows}x{cols}")]
    BadSize {
        /// Number of rows.
        rows: i32,
        /// Number of columns.
        cols: i32,
    },
    /// A column entry appears before any row marker.
    #[error("PCHK column entry {0} found before any row")]
    NoRow(i32),
    /// A row marker is out of range.
    #[error("PCHK row {0} is out of range")]
    RowOutOfRange(i32),
    /// A column entry is out of range.
    #[error("PCHK column {0} is out of range")]
    ColOutOfRange(i32),
}

fn write_i32<W: Write>(w: &mut W, x: i32) -> std::io::Result<()> {
    w.write_all(&x.to_le_bytes())
}

fn read_i32<R: Read>(r: &mut R) -> Result<i32, Error> {
    let mut buf = [0; 4];
    match r.read_exact(&mut buf) {
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(Error::Truncated),
        ret => ret.map_err(Error::from),
    }?;
    Ok(i32::from_le_bytes(buf))
}

fn to_i32(x: usize) -> std::io::Result<i32> {
    i32::try_from(x).map_err(|_| {
        std::io::Error::new(
            ErrorKind::InvalidInput,
            format!("{x} is too large for a PCHK file"),
        )
    })
}

/// Writes a parity check matrix in PCHK format.
///
/// Every row gets its marker, even if it has no ones, and the column entries
/// are written in increasing order.
///
/// # Errors
/// Returns an error if writing to `w` fails or if the matrix is too large to
/// be represented.
pub fn write<W: Write>(h: &SparseMatrix, mut w: W) -> std::io::Result<()> {
    write_i32(&mut w, MAGIC)?;
    write_i32(&mut w, to_i32(h.num_rows())?)?;
    write_i32(&mut w, to_i32(h.num_cols())?)?;
    for row in 0..h.num_rows() {
        write_i32(&mut w, -to_i32(row + 1)?)?;
        for col in h.sorted_row(row) {
            write_i32(&mut w, to_i32(col + 1)?)?;
        }
    }
    write_i32(&mut w, 0)
}

/// Reads a parity check matrix in PCHK format.
///
/// Reading stops at the terminating zero, so trailing data is ignored.
/// Repeated entries are only inserted once.
pub fn read<R: Read>(mut reader: R) -> Result<SparseMatrix, Error> {
    let magic = read_i32(&mut reader)?;
    if magic != MAGIC {
        return Err(Error::BadMagic(magic));
    }
    let rows = read_i32(&mut reader)?;
    let cols = read_i32(&mut reader)?;
    if rows <= 0 || cols <= 0 {
        return Err(Error::BadSize { rows, cols });
    }
    let (nrows, ncols) = (rows as usize, cols as usize);
    let mut h = SparseMatrix::new(nrows, ncols);
    let mut row = None;
    loop {
        match read_i32(&mut reader)? {
            0 => return Ok(h),
            v if v < 0 => {
                // -(v + 1) cannot overflow, unlike -v
                let r = -(v + 1) as usize;
                if r >= nrows {
                    return Err(Error::RowOutOfRange(v));
                }
                row = Some(r);
            }
            v => {
                let c = (v - 1) as usize;
                if c >= ncols {
                    return Err(Error::ColOutOfRange(v));
                }
                let r = row.ok_or(Error::NoRow(v))?;
                h.insert(r, c);
            }
        }
    }
}

/// Saves a parity check matrix to a PCHK file.
///
/// The file is created or truncated.
pub fn save<P: AsRef<Path>>(h: &SparseMatrix, path: P) -> std::io::Result<()> {
    let mut f = BufWriter::new(File::create(path)?);
    write(h, &mut f)?;
    f.flush()
}

/// Loads a parity check matrix from a PCHK file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<SparseMatrix, Error> {
    read(BufReader::new(File::open(path)?))
}
