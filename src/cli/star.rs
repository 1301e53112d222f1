//! Star code CLI subcommand.
//!
//! This subcommand generates the parity check matrix of a Star code and
//! saves it to a PCHK file. See [`crate::codes::star`] for more information
//! about Star codes.
//!
//! # Examples
//! The 272-bit Star code (a 16x17 grid) is generated with
//! ```shell
//! $ star-ldpc star star272.pchk
//! ```
//! which is the same as
//! ```shell
//! $ star-ldpc star --code 272 star272.pchk
//! $ star-ldpc star --width 16 --height 17 star272.pchk
//! $ star-ldpc -S272 star272.pchk
//! ```

use crate::{
    bitrow::BitRow,
    cli::*,
    codes::star::{StarCode, StarMatrix},
};
use clap::Parser;
use console::Term;
use std::error::Error;

/// Number of message bits of the Star code generated by default.
pub const DEFAULT_CODE: usize = 272;

/// Star CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Generates the PCHK file of a Star code")]
pub struct Args {
    /// Output PCHK file
    output: String,
    /// Number of message bits, w * (w + 1) [default: 272]
    #[arg(long, conflicts_with_all = ["width", "height"])]
    code: Option<usize>,
    /// Grid width
    #[arg(long, requires = "height")]
    width: Option<usize>,
    /// Grid height
    #[arg(long, requires = "width")]
    height: Option<usize>,
    /// Prints the rows of the matrix in hexadecimal
    #[arg(long)]
    dump: bool,
}

impl Args {
    fn code(&self) -> Result<StarCode, crate::codes::star::Error> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => StarCode::new(w, h),
            _ => StarCode::from_message_bits(self.code.unwrap_or(DEFAULT_CODE)),
        }
    }
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        let code = self.code()?;
        let term = Term::stdout();
        term.write_line(&format!(
            "Generating {}x{} Star code ({} message bits) into {}",
            code.width(),
            code.height(),
            code.message_bits(),
            self.output
        ))?;
        let matrix = code.matrix();
        tracing::info!(
            width = code.width(),
            height = code.height(),
            ones = matrix.popcount(),
            "Star matrix generated"
        );
        matrix.save(&self.output)?;
        if self.dump {
            for line in dump(&matrix) {
                term.write_line(&line)?;
            }
        }
        Ok(())
    }
}

fn dump(matrix: &StarMatrix) -> impl Iterator<Item = String> + '_ {
    matrix
        .message_rows()
        .iter()
        .chain(matrix.derived_checks().iter())
        .enumerate()
        .map(|(k, row)| format!("[{k:03}] {}", hex(row)))
}

// Words from most to least significant
fn hex(row: &BitRow) -> String {
    row.words()
        .iter()
        .rev()
        .map(|w| format!("{w:016X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
