//! Channel benchmark.
//!
//! This module runs repeated decoding trials of a fixed input block through a
//! noisy channel. Each trial transmits the block, computes the likelihood
//! ratios of the first `n` received samples (where `n` is the code length),
//! decodes them and records whether the result satisfies all the parity
//! checks and how many bits the decoder changed.
//!
//! The benchmark does not compare the decoded block with the transmitted
//! block: the input block is not required to be a codeword.

use super::{
    channel::{Channel, Observations},
    likelihood::likelihood_ratios,
    source::InputBlock,
};
use crate::{
    decoder::{self, changed, check, factory::DecodeMethod, LdpcDecoder},
    rand::{bench_rng, Rng},
    sparse::SparseMatrix,
};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Default number of trials.
pub const DEFAULT_TRIALS: usize = 100;

/// Default maximum number of decoder iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// Benchmark setup error.
#[derive(Debug, Error)]
pub enum Error {
    /// The parity check matrix has no message bits.
    #[error("number of bits ({cols}) should be greater than number of checks ({rows})")]
    NotEnoughBits {
        /// Number of checks.
        rows: usize,
        /// Number of bits.
        cols: usize,
    },
    /// The decoder cannot be built.
    #[error(transparent)]
    Decoder(#[from] decoder::Error),
}

/// Benchmark configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchConfig {
    /// Number of trials.
    pub trials: usize,
    /// Maximum number of decoder iterations.
    pub max_iterations: usize,
    /// Channel.
    pub channel: Channel,
    /// Decoding method.
    pub method: DecodeMethod,
    /// Seed given by the user.
    pub seed: i64,
}

impl BenchConfig {
    /// Creates a configuration for a channel with default values for the
    /// rest of the parameters.
    pub fn new(channel: Channel) -> BenchConfig {
        BenchConfig {
            trials: DEFAULT_TRIALS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            channel,
            method: DecodeMethod::default(),
            seed: 0,
        }
    }
}

/// Outcome of a single trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    /// Trial number, starting at zero.
    pub trial: usize,
    /// Whether the decoded block satisfies all the parity checks.
    pub valid: bool,
    /// Number of decoder iterations.
    pub iterations: usize,
    /// Number of bits changed by the decoder.
    pub changed: f64,
}

/// Benchmark summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of trials.
    pub trials: usize,
    /// Number of trials whose decoded block was valid.
    pub valid: usize,
    /// Total number of decoder iterations.
    pub iterations: f64,
    /// Total number of bits changed.
    pub changed: f64,
    /// Elapsed time.
    pub elapsed: Duration,
}

impl Summary {
    /// Percentage of valid decoded blocks.
    ///
    /// This is zero if there are no trials.
    pub fn valid_percent(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            100.0 * self.valid as f64 / self.trials as f64
        }
    }

    /// Average number of decoder iterations per trial.
    ///
    /// This is zero if there are no trials.
    pub fn average_iterations(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.iterations / self.trials as f64
        }
    }
}

/// Channel benchmark.
#[derive(Debug)]
pub struct Benchmark {
    h: SparseMatrix,
    config: BenchConfig,
    block: InputBlock,
    decoder: Box<dyn LdpcDecoder>,
    rng: Rng,
    observations: Observations,
    lratios: Vec<f64>,
    parity: Vec<u8>,
}

impl Benchmark {
    /// Creates a new benchmark.
    ///
    /// The parameters are the parity check matrix `h`, the configuration,
    /// and the block to transmit in every trial. Fails if `h` does not have
    /// more columns than rows, or if the decoder cannot be built.
    pub fn new(
        h: SparseMatrix,
        config: BenchConfig,
        block: InputBlock,
    ) -> Result<Benchmark, Error> {
        let (rows, cols) = (h.num_rows(), h.num_cols());
        if cols <= rows {
            return Err(Error::NotEnoughBits { rows, cols });
        }
        tracing::info!(rows, cols, entries = h.num_entries(), "parity check matrix");
        let decoder = config.method.build_decoder(h.clone())?;
        let observations = Observations::for_channel(&config.channel, block.len().max(cols));
        let rng = bench_rng(config.seed);
        tracing::info!(
            method = %config.method,
            channel = %config.channel,
            seed = config.seed,
            block_bits = block.len(),
            "benchmark configured"
        );
        Ok(Benchmark {
            h,
            config,
            block,
            decoder,
            rng,
            observations,
            lratios: vec![0.0; cols],
            parity: vec![0; rows],
        })
    }

    /// Runs the benchmark.
    ///
    /// The function `report` is called with the outcome of each trial as
    /// soon as it finishes. Returns the summary of all the trials.
    pub fn run<F: FnMut(&TrialOutcome)>(&mut self, mut report: F) -> Summary {
        let start = Instant::now();
        let mut summary = Summary {
            trials: self.config.trials,
            valid: 0,
            iterations: 0.0,
            changed: 0.0,
            elapsed: Duration::ZERO,
        };
        for trial in 0..self.config.trials {
            let outcome = self.trial(trial);
            tracing::debug!(
                trial,
                valid = outcome.valid,
                iterations = outcome.iterations,
                changed = outcome.changed,
                "trial finished"
            );
            summary.valid += usize::from(outcome.valid);
            summary.iterations += outcome.iterations as f64;
            summary.changed += outcome.changed;
            report(&outcome);
        }
        summary.elapsed = start.elapsed();
        tracing::info!(
            valid = summary.valid,
            trials = summary.trials,
            elapsed = ?summary.elapsed,
            "benchmark finished"
        );
        summary
    }

    fn trial(&mut self, trial: usize) -> TrialOutcome {
        self.config
            .channel
            .transmit(&mut self.rng, &self.block, &mut self.observations);
        likelihood_ratios(&self.config.channel, &self.observations, &mut self.lratios);
        let output = match self
            .decoder
            .decode(&self.lratios, self.config.max_iterations)
        {
            Ok(output) | Err(output) => output,
        };
        let valid = check(&self.h, &output.codeword, &mut self.parity) == 0;
        TrialOutcome {
            trial,
            valid,
            iterations: output.iterations,
            changed: changed(&self.lratios, &output.codeword),
        }
    }
}
