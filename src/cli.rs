//! `star-ldpc` CLI application
//!
//! The CLI application is organized in two subcommands. The `star`
//! subcommand generates the parity check matrix of a Star code and saves it
//! as a PCHK file, and the `bench` subcommand runs decoding trials of a
//! block through a noisy channel using a PCHK file. See the modules below
//! for examples and more information about how to use each subcommand.
//!
//! The single-dash command lines of the original LDPC tools are also
//! accepted, and are rewritten into subcommands by [`legacy::normalize`].
//!
//! Requests for help or version information, including a command line
//! without arguments, are reported by [`parse_args`] as errors for which
//! [`is_informational`] is `true`. They are not failures.

use clap::{error::ErrorKind, Parser};
use std::error::Error;

pub mod bench;
pub mod legacy;
pub mod star;

/// Trait to run a CLI subcommand
pub trait Run {
    /// Run the CLI subcommand
    fn run(&self) -> Result<(), Box<dyn Error>>;
}

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(author, version, name = "star-ldpc", about = "Star LDPC code tools")]
pub enum Args {
    /// star subcommand
    Star(star::Args),
    /// bench subcommand
    Bench(bench::Args),
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        match self {
            Args::Star(x) => x.run(),
            Args::Bench(x) => x.run(),
        }
    }
}

/// Parses a command line.
///
/// The first element of `args` is the program name. Single-dash command
/// lines are rewritten with [`legacy::normalize`] before parsing.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args, clap::Error> {
    Args::try_parse_from(legacy::normalize(args))
}

/// Returns `true` if a parse error is a request for help or version
/// information.
pub fn is_informational(error: &clap::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::DisplayVersion
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn help_and_version() {
        for args in [
            &["star-ldpc"][..],
            &["star-ldpc", "--help"],
            &["star-ldpc", "--version"],
            &["star-ldpc", "help", "bench"],
            &["star-ldpc", "bench", "--help"],
            &["genmax", "-G272", "out.pchk"],
            &["genmax", "-Seed", "5"],
            &["genmax", "-S272"],
        ] {
            let error = parse(args).unwrap_err();
            assert!(is_informational(&error), "{args:?}: {:?}", error.kind());
        }
    }

    #[test]
    fn usage_errors() {
        for args in [
            &["star-ldpc", "star"][..],
            &["star-ldpc", "star", "--bogus", "out.pchk"],
            &["star-ldpc", "bench", "544", "--pchk", "f.pchk"],
            &["star-ldpc", "bench", "544", "--pchk", "f.pchk", "--bsc", "x"],
            &["mbench", "544", "-N", "5"],
        ] {
            let error = parse(args).unwrap_err();
            assert!(!is_informational(&error), "{args:?}: {:?}", error.kind());
        }
    }

    #[test]
    fn subcommands() {
        assert!(matches!(parse(&["star-ldpc", "star", "out.pchk"]), Ok(Args::Star(_))));
        assert!(matches!(parse(&["genmax", "-S272", "out.pchk"]), Ok(Args::Star(_))));
        assert!(matches!(
            parse(&["mbench", "544", "-P", "f.pchk", "-N", "5", "-N", "7", "-AWGN", "0.5"]),
            Ok(Args::Bench(_))
        ));
    }
}
