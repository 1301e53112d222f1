//! Single-dash command lines.
//!
//! The original Star code generator and channel benchmark tools take
//! command lines such as
//! ```shell
//! $ genmax -S272 star272.pchk
//! $ mbench star272.bin -N 1000 -S 1234579 -PCHK star272.pchk -AWGN 0.60 -M prprp -it 100
//! ```
//! These are accepted by rewriting them into the `star` and `bench`
//! subcommands before parsing.
//!
//! A command line is left untouched if its first argument is a subcommand
//! name or a double-dash option. Otherwise:
//!
//! - If the first argument is a single-dash flag and there is at most one
//!   more argument, it is a generator command line. `-S<n> <output>` and
//!   `-s<n> <output>`, where `<n>` is a possibly empty string of digits,
//!   generate a code. Any other generator command line is a request for
//!   usage, and is rewritten as `help star`.
//! - Otherwise it is a benchmark command line. Single-dash flags are matched
//!   by their first letter, ignoring case, and take the following argument
//!   as their value. `-A` selects AWLN if the fourth character of the flag is
//!   `L` and AWGN otherwise. Flags with an unknown letter or without a
//!   following argument are ignored. When a flag is repeated the last value
//!   is kept, and the last of the channel flags selects the channel. The
//!   first bare argument is the source block, and other bare arguments are
//!   ignored.

const SUBCOMMANDS: &[&str] = &["star", "bench", "help"];

/// Rewrites a single-dash command line into a subcommand command line.
///
/// The first element of `args` is the program name.
///
/// # Examples
/// ```
/// # use star_ldpc::cli::legacy::normalize;
/// let args = ["star-ldpc", "-S272", "out.pchk"].map(String::from);
/// assert_eq!(normalize(args), ["star-ldpc", "star", "--code=272", "out.pchk"]);
/// ```
pub fn normalize<I: IntoIterator<Item = String>>(args: I) -> Vec<String> {
    let args: Vec<String> = args.into_iter().collect();
    if args.len() < 2 || is_modern(&args[1]) {
        return args;
    }
    let rest = &args[1..];
    let normalized = if rest.len() <= 2 && rest[0].starts_with('-') {
        generator(rest)
    } else {
        benchmark(rest)
    };
    tracing::debug!(?normalized, "single-dash command line rewritten");
    std::iter::once(args[0].clone()).chain(normalized).collect()
}

fn is_modern(first: &str) -> bool {
    SUBCOMMANDS.contains(&first) || first.starts_with("--") || first == "-h" || first == "-V"
}

fn generator(args: &[String]) -> Vec<String> {
    match (code_size(&args[0]), args.get(1)) {
        (Some(size), Some(output)) => {
            let mut out = vec!["star".to_string()];
            if !size.is_empty() {
                out.push(format!("--code={size}"));
            }
            out.push(output.clone());
            out
        }
        _ => vec!["help".to_string(), "star".to_string()],
    }
}

// Digits after `-S`, possibly none
fn code_size(flag: &str) -> Option<&str> {
    let size = flag.strip_prefix("-S").or_else(|| flag.strip_prefix("-s"))?;
    size.bytes().all(|c| c.is_ascii_digit()).then_some(size)
}

// Channel options share a single slot
fn slot(option: &str) -> &str {
    match option {
        "awgn" | "awln" | "bsc" => "channel",
        _ => option,
    }
}

fn benchmark(args: &[String]) -> Vec<String> {
    let mut options: Vec<(&str, &str)> = Vec::new();
    let mut source = None;
    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        i += 1;
        let flag = arg.as_bytes();
        if flag.first() != Some(&b'-') {
            source.get_or_insert_with(|| arg.clone());
            continue;
        }
        let Some(value) = args.get(i) else {
            continue;
        };
        let option = match flag.get(1).map(u8::to_ascii_lowercase) {
            Some(b'i') => "max-iter",
            Some(b'n') => "trials",
            Some(b'a') if flag.get(3).map(u8::to_ascii_uppercase) == Some(b'L') => "awln",
            Some(b'a') => "awgn",
            Some(b'b') => "bsc",
            Some(b'p') => "pchk",
            Some(b'm') => "method",
            Some(b's') => "seed",
            _ => continue,
        };
        options.retain(|&(o, _)| slot(o) != slot(option));
        options.push((option, value.as_str()));
        i += 1;
    }
    let mut out = vec!["bench".to_string()];
    out.extend(options.into_iter().map(|(o, v)| format!("--{o}={v}")));
    out.extend(source);
    out
}

#[cfg(test)]
mod test {
    use super::*;

    fn normalize_str(args: &[&str]) -> Vec<String> {
        normalize(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn untouched() {
        for args in [
            &["star-ldpc"][..],
            &["star-ldpc", "star", "out.pchk"],
            &["star-ldpc", "bench", "544", "--pchk", "f", "--awgn", "0.5"],
            &["star-ldpc", "--help"],
            &["star-ldpc", "-V"],
        ] {
            assert_eq!(normalize_str(args), args);
        }
    }

    #[test]
    fn generator_forms() {
        assert_eq!(
            normalize_str(&["genmax", "-s30", "out.pchk"]),
            ["genmax", "star", "--code=30", "out.pchk"]
        );
        assert_eq!(
            normalize_str(&["genmax", "-S", "out.pchk"]),
            ["genmax", "star", "out.pchk"]
        );
    }

    #[test]
    fn usage_requests() {
        for args in [
            &["genmax", "-G272", "out.pchk"][..],
            &["genmax", "-Seed", "5"],
            &["genmax", "-Star", "out.pchk"],
            &["genmax", "-S272"],
            &["genmax", "-"],
        ] {
            assert_eq!(normalize_str(args), ["genmax", "help", "star"]);
        }
    }

    #[test]
    fn benchmark_forms() {
        assert_eq!(
            normalize_str(&[
                "mbench", "star272.bin", "-N", "1000", "-S", "1234579", "-PCHK", "star272.pchk",
                "-AWGN", "0.60", "-M", "prprp", "-it", "100",
            ]),
            [
                "mbench",
                "bench",
                "--trials=1000",
                "--seed=1234579",
                "--pchk=star272.pchk",
                "--awgn=0.60",
                "--method=prprp",
                "--max-iter=100",
                "star272.bin",
            ]
        );
        // unknown flags are skipped, and their value is a bare argument
        assert_eq!(
            normalize_str(&["mbench", "-x", "544", "other", "-P", "f.pchk", "-it"]),
            ["mbench", "bench", "--pchk=f.pchk", "544"]
        );
    }

    #[test]
    fn last_value_wins() {
        assert_eq!(
            normalize_str(&["mbench", "-awln", "0.5", "-bsc", "0.1", "-Seed", "-3", "544"]),
            ["mbench", "bench", "--bsc=0.1", "--seed=-3", "544"]
        );
        assert_eq!(
            normalize_str(&[
                "mbench", "-N", "5", "-AWGN", "0.5", "-N", "7", "-P", "f.pchk", "-BSC", "0.1",
                "544",
            ]),
            ["mbench", "bench", "--trials=7", "--pchk=f.pchk", "--bsc=0.1", "544"]
        );
    }

    #[test]
    fn parses() {
        use crate::cli::Args;
        use clap::Parser;
        for args in [
            &["mbench", "544", "-N", "5", "-S", "-7", "-PCHK", "f.pchk", "-AWLN", "0.3"][..],
            &["mbench", "544", "-N", "5", "-N", "7", "-P", "f.pchk", "-A", "0.3"],
            &["mbench", "544", "-P", "f.pchk", "-AWGN", "0.5", "-BSC", "0.1", "-AWLN", "0.3"],
        ] {
            let parsed = Args::try_parse_from(normalize_str(args));
            assert!(matches!(parsed, Ok(Args::Bench(_))), "{args:?}");
        }
        let args = normalize_str(&["genmax", "-S272", "out.pchk"]);
        assert!(matches!(Args::try_parse_from(args), Ok(Args::Star(_))));
    }
}
