//! LDPC code constructions.
//!
//! This module contains the structured LDPC codes that this crate can
//! generate. Each code is described by a small definition struct which builds
//! its parity check matrix.

pub mod star;
