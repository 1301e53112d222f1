//! Channel simulation.
//!
//! This module contains the simulation of the three memoryless channels
//! supported by the benchmark:
//!
//! - binary symmetric channel (BSC), which flips each bit with a given error
//!   probability;
//! - additive white Gaussian noise (AWGN), which maps bits to `-1` and `+1`
//!   and adds zero-mean Gaussian noise;
//! - additive white logistic noise (AWLN), which maps bits to `-1` and `+1`
//!   and adds zero-mean logistic noise.
//!
//! All the randomness is drawn from the RNG passed in, one sample per bit in
//! bit order.

use super::source::InputBlock;
use rand::{distributions::Open01, Rng};
use rand_distr::{Distribution, StandardNormal};

/// Transmission channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Channel {
    /// Binary symmetric channel.
    Bsc {
        /// Probability that a bit is flipped.
        error_prob: f64,
    },
    /// Additive white Gaussian noise channel.
    Awgn {
        /// Standard deviation of the noise.
        std_dev: f64,
    },
    /// Additive white logistic noise channel.
    Awln {
        /// Width of the logistic noise distribution.
        width: f64,
    },
}

impl Channel {
    /// Returns the parameter of the channel.
    ///
    /// This is the error probability, the noise standard deviation or the
    /// noise width, depending on the channel.
    pub fn parameter(&self) -> f64 {
        match *self {
            Channel::Bsc { error_prob } => error_prob,
            Channel::Awgn { std_dev } => std_dev,
            Channel::Awln { width } => width,
        }
    }

    /// Returns the name of the channel.
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Bsc { .. } => "BSC",
            Channel::Awgn { .. } => "AWGN",
            Channel::Awln { .. } => "AWLN",
        }
    }

    /// Transmits a block through the channel.
    ///
    /// The received samples for the bits of `block` are written to the first
    /// positions of `observations`. The rest of the observations are left
    /// untouched.
    ///
    /// # Panics
    ///
    /// This function panics if `observations` is shorter than `block` or if
    /// the kind of observations does not match the channel (see
    /// [`Observations::for_channel`]).
    pub fn transmit<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        block: &InputBlock,
        observations: &mut Observations,
    ) {
        assert!(observations.len() >= block.len());
        match (*self, observations) {
            (Channel::Bsc { error_prob }, Observations::Hard(received)) => {
                for (y, bit) in received.iter_mut().zip(block.iter()) {
                    let noise = rng.gen::<f64>() < error_prob;
                    *y = u8::from(bit ^ noise);
                }
            }
            (Channel::Awgn { std_dev }, Observations::Soft(received)) => {
                for (y, bit) in received.iter_mut().zip(block.iter()) {
                    let noise: f64 = rng.sample(StandardNormal);
                    *y = bpsk(bit) + std_dev * noise;
                }
            }
            (Channel::Awln { width }, Observations::Soft(received)) => {
                for (y, bit) in received.iter_mut().zip(block.iter()) {
                    *y = bpsk(bit) + width * Logistic.sample(rng);
                }
            }
            (channel, _) => panic!("wrong kind of observations for {} channel", channel.name()),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.name(), self.parameter())
    }
}

fn bpsk(bit: bool) -> f64 {
    if bit {
        1.0
    } else {
        -1.0
    }
}

/// Standard logistic distribution.
///
/// Samples are computed as `ln(u / (1 - u))`, with `u` uniform on the open
/// interval (0, 1), so they are always finite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Logistic;

impl Distribution<f64> for Logistic {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        (u / (1.0 - u)).ln()
    }
}

/// Received channel samples.
#[derive(Debug, Clone, PartialEq)]
pub enum Observations {
    /// Received bits of a binary symmetric channel.
    Hard(Vec<u8>),
    /// Received amplitudes of a channel with additive noise.
    Soft(Vec<f64>),
}

impl Observations {
    /// Creates zeroed observations of length `len` suitable for a channel.
    pub fn for_channel(channel: &Channel, len: usize) -> Observations {
        match channel {
            Channel::Bsc { .. } => Observations::Hard(vec![0; len]),
            Channel::Awgn { .. } | Channel::Awln { .. } => Observations::Soft(vec![0.0; len]),
        }
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        match self {
            Observations::Hard(x) => x.len(),
            Observations::Soft(x) => x.len(),
        }
    }

    /// Returns `true` if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
