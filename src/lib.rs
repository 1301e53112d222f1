//! # Star LDPC
//!
//! `star_ldpc` generates the parity check matrices of Star LDPC codes and
//! benchmarks LDPC decoding over noisy channels.
//!
//! Star codes are rate 1/2 systematic codes whose checks are diagonals of a
//! grid of message bits (see [`codes::star`]). Their parity check matrices
//! are written as PCHK files ([`pchk`]), the format of Radford Neal's LDPC
//! software, and can be read back to run channel benchmarks
//! ([`simulation::bench`]) with a probability propagation decoder or with
//! exhaustive enumeration decoders ([`decoder`]).
//!
//! It can be used as a Rust library or as a CLI tool. See [`cli`] for
//! documentation about the usage of the CLI tool.

#![warn(missing_docs)]

pub mod bitrow;
pub mod cli;
pub mod codes;
pub mod decoder;
pub mod encoder;
pub mod gf2;
pub mod pchk;
pub mod rand;
pub mod simulation;
pub mod sparse;
