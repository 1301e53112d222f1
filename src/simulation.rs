//! Channel simulation.
//!
//! This module contains the components of the channel benchmark: the input
//! block source, the channel models, the computation of likelihood ratios,
//! and the benchmark loop that ties them to an LDPC decoder.

pub mod bench;
pub mod channel;
pub mod likelihood;
pub mod source;
