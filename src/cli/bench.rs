//! Channel benchmark CLI subcommand.
//!
//! This subcommand transmits a block repeatedly through a noisy channel,
//! decodes it with the parity check matrix of a PCHK file, and reports for
//! each trial whether the decoded block is valid and how many bits the
//! decoder changed, followed by a summary.
//!
//! # Examples
//!
//! The all-zero codeword of the 272-bit Star code can be benchmarked over an
//! AWGN channel with
//! ```shell
//! $ star-ldpc bench 544 --pchk star272.pchk --awgn 0.6 --trials 1000 \
//!       --seed 1234579 --method prprp --max-iter 100
//! ```
//! The same run can be written with the single-dash flags of the original
//! benchmark tool
//! ```shell
//! $ star-ldpc 544 -N 1000 -S 1234579 -PCHK star272.pchk -AWGN 0.6 -M prprp -it 100
//! ```
//!
//! The PCHK file must have been generated previously with the
//! [star](super::star) subcommand or with other tools that write this format.

use crate::{
    cli::*,
    decoder::factory::DecodeMethod,
    pchk,
    simulation::{
        bench::{
            BenchConfig, Benchmark, Summary, TrialOutcome, DEFAULT_MAX_ITERATIONS, DEFAULT_TRIALS,
        },
        channel::Channel,
        source::InputBlock,
    },
};
use clap::{ArgGroup, Parser};
use console::Term;
use std::{error::Error, time::Duration};

/// Benchmark CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Benchmarks LDPC decoding over a noisy channel")]
#[command(group(ArgGroup::new("channel").required(true).args(["awgn", "awln", "bsc"])))]
pub struct Args {
    /// Block to transmit: number of zero bits, BxN zero bits, or a file of
    /// ASCII 0 and 1
    source: String,
    /// PCHK file with the parity check matrix
    #[arg(short = 'p', visible_short_alias = 'P', long)]
    pchk: String,
    /// AWGN channel with this noise standard deviation
    #[arg(short = 'a', visible_short_alias = 'A', long)]
    awgn: Option<f64>,
    /// AWLN channel with this noise width
    #[arg(short = 'l', visible_short_alias = 'L', long)]
    awln: Option<f64>,
    /// Binary symmetric channel with this error probability
    #[arg(short = 'b', visible_short_alias = 'B', long)]
    bsc: Option<f64>,
    /// Number of trials
    #[arg(short = 'n', visible_short_alias = 'N', long, default_value_t = DEFAULT_TRIALS)]
    trials: usize,
    /// Maximum number of decoder iterations
    #[arg(short = 'i', visible_short_alias = 'I', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iter: usize,
    /// Decoding method (prprp, enum_block or enum_bit)
    #[arg(short = 'm', visible_short_alias = 'M', long, default_value_t = DecodeMethod::Prprp)]
    method: DecodeMethod,
    /// Random seed
    #[arg(short = 's', visible_short_alias = 'S', long, default_value_t = 0, allow_negative_numbers = true)]
    seed: i64,
}

impl Args {
    fn channel(&self) -> Channel {
        match (self.awgn, self.awln, self.bsc) {
            (_, _, Some(error_prob)) => Channel::Bsc { error_prob },
            (_, Some(width), _) => Channel::Awln { width },
            (Some(std_dev), _, _) => Channel::Awgn { std_dev },
            // clap requires one of the channels
            (None, None, None) => Channel::Awgn { std_dev: 0.0 },
        }
    }

    fn config(&self) -> BenchConfig {
        BenchConfig {
            trials: self.trials,
            max_iterations: self.max_iter,
            channel: self.channel(),
            method: self.method,
            seed: self.seed,
        }
    }
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        let h = pchk::load(&self.pchk)?;
        let block = InputBlock::from_source(&self.source)?;
        let config = self.config();
        let mut benchmark = Benchmark::new(h, config, block)?;
        let term = Term::stdout();
        let mut write_error = None;
        let summary = benchmark.run(|outcome| {
            if write_error.is_none() {
                if let Err(e) = term.write_line(&format_trial(outcome)) {
                    write_error = Some(e);
                }
            }
        });
        if let Some(e) = write_error {
            return Err(e.into());
        }
        term.write_line("")?;
        for line in format_summary(&config.channel, &summary) {
            term.write_line(&line)?;
        }
        Ok(())
    }
}

fn format_trial(outcome: &TrialOutcome) -> String {
    format!(
        "Try No. {}: block decoded {}, bit changed {}",
        outcome.trial,
        if outcome.valid { "valid" } else { "invalid" },
        outcome.changed as u64
    )
}

fn format_summary(channel: &Channel, summary: &Summary) -> [String; 2] {
    let parameter = match channel {
        Channel::Bsc { .. } => "Error_prob",
        Channel::Awgn { .. } => "Std_dev",
        Channel::Awln { .. } => "Width",
    };
    [
        format!(
            "{}={:.3}. Total valid blocks {} out of {} ({:.3}%). Total bits changed {}.",
            parameter,
            channel.parameter(),
            summary.valid,
            summary.trials,
            summary.valid_percent(),
            summary.changed as u64
        ),
        format!(
            "Total iterations {} (average {:.1}). Elapsed time {}.",
            summary.iterations,
            summary.average_iterations(),
            humantime::format_duration(Duration::from_millis(
                summary.elapsed.as_millis() as u64
            ))
        ),
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codes::star::StarCode;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("bench").chain(args.iter().copied()))
    }

    #[test]
    fn arguments() {
        let args = parse(&["544", "--pchk", "f.pchk", "--awgn", "0.6"]).unwrap();
        let config = args.config();
        assert_eq!(config.channel, Channel::Awgn { std_dev: 0.6 });
        assert_eq!(config.trials, DEFAULT_TRIALS);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(config.method, DecodeMethod::Prprp);
        assert_eq!(config.seed, 0);

        let args = parse(&[
            "block.txt", "-P", "f.pchk", "-L", "0.4", "-N", "7", "-I", "3", "-M", "ENUM_BIT",
            "-S", "-12",
        ])
        .unwrap();
        let config = args.config();
        assert_eq!(args.source, "block.txt");
        assert_eq!(config.channel, Channel::Awln { width: 0.4 });
        assert_eq!(config.trials, 7);
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.method, DecodeMethod::EnumBit);
        assert_eq!(config.seed, -12);

        let args = parse(&["8", "-p", "f.pchk", "-b", "0.1", "-m", "bogus"]).unwrap();
        assert_eq!(args.channel(), Channel::Bsc { error_prob: 0.1 });
        assert_eq!(args.method, DecodeMethod::Prprp);
    }

    #[test]
    fn channel_required() {
        assert!(parse(&["544", "--pchk", "f.pchk"]).is_err());
        assert!(parse(&["544", "--pchk", "f.pchk", "--awgn", "0.5", "--bsc", "0.1"]).is_err());
    }

    #[test]
    fn report_lines() {
        let outcome = TrialOutcome {
            trial: 3,
            valid: false,
            iterations: 20,
            changed: 4.5,
        };
        assert_eq!(
            format_trial(&outcome),
            "Try No. 3: block decoded invalid, bit changed 4"
        );
        let summary = Summary {
            trials: 4,
            valid: 3,
            iterations: 26.0,
            changed: 9.0,
            elapsed: Duration::from_millis(1500),
        };
        let [first, second] = format_summary(&Channel::Awgn { std_dev: 0.6 }, &summary);
        assert_eq!(
            first,
            "Std_dev=0.600. Total valid blocks 3 out of 4 (75.000%). Total bits changed 9."
        );
        assert_eq!(second, "Total iterations 26 (average 6.5). Elapsed time 1s 500ms.");
    }

    #[test]
    fn run_errors() {
        let args = parse(&["544", "--pchk", "/nonexistent/f.pchk", "--awgn", "0.5"]).unwrap();
        assert!(args.run().is_err());

        let path =
            std::env::temp_dir().join(format!("star-ldpc-cli-bench-{}.pchk", std::process::id()));
        StarCode::new(2, 3).unwrap().matrix().save(&path).unwrap();
        let pchk = path.to_str().unwrap();
        let args = parse(&["2000", "--pchk", pchk, "--awgn", "0.5"]).unwrap();
        let too_long = args.run();
        let args = parse(&["12", "--pchk", pchk, "--bsc", "0.05", "-n", "5"]).unwrap();
        let ok = args.run();
        std::fs::remove_file(&path).unwrap();
        assert!(too_long.is_err());
        assert!(ok.is_ok());
    }
}
