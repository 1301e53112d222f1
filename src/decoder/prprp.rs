//! Probability propagation decoder.
//!
//! This module implements belief propagation with a flooding schedule,
//! working directly with likelihood ratios. Each edge of the Tanner graph
//! holds the message sent from the variable node to the check node, as a
//! likelihood ratio, and the message sent from the check node to the variable
//! node, as a likelihood ratio difference `P(0) - P(1)` mapped back to a
//! ratio.
//!
//! Decoding stops as soon as the hard decisions satisfy all the parity checks,
//! so a block that is already a codeword is decoded in zero iterations.

use super::{check, DecoderOutput, LdpcDecoder};
use crate::sparse::SparseMatrix;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Edge {
    // variable to check likelihood ratio
    pr: f64,
    // check to variable likelihood ratio
    lr: f64,
}

/// LDPC probability propagation decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoder {
    h: SparseMatrix,
    edges: Vec<Edge>,
    // edge indices of each row, by increasing column
    row_edges: Vec<Vec<usize>>,
    // edge indices of each column, by increasing row
    col_edges: Vec<Vec<usize>>,
    codeword: Vec<u8>,
    bit_probabilities: Vec<f64>,
    parity: Vec<u8>,
}

impl Decoder {
    /// Creates a new probability propagation decoder.
    ///
    /// The parameter `h` indicates the parity check matrix.
    pub fn new(h: SparseMatrix) -> Decoder {
        let mut edges = Vec::with_capacity(h.num_entries());
        let mut row_edges = vec![Vec::new(); h.num_rows()];
        let mut col_edges = vec![Vec::new(); h.num_cols()];
        for (r, row) in row_edges.iter_mut().enumerate() {
            for c in h.sorted_row(r) {
                let e = edges.len();
                edges.push(Edge { pr: 1.0, lr: 1.0 });
                row.push(e);
                col_edges[c].push(e);
            }
        }
        let codeword = vec![0; h.num_cols()];
        let bit_probabilities = vec![0.0; h.num_cols()];
        let parity = vec![0; h.num_rows()];
        Decoder {
            h,
            edges,
            row_edges,
            col_edges,
            codeword,
            bit_probabilities,
            parity,
        }
    }

    /// Decodes a block.
    ///
    /// The parameters are the likelihood ratios for the received block and
    /// the maximum number of iterations to perform. If decoding is
    /// successful, the function returns an `Ok` containing the decoded
    /// codeword, the bit probabilities and the number of iterations used. If
    /// decoding is not successful, the function returns an `Err` containing
    /// the hard decision after `max_iterations` iterations (which still fails
    /// some checks).
    pub fn decode(
        &mut self,
        lratios: &[f64],
        max_iterations: usize,
    ) -> Result<DecoderOutput, DecoderOutput> {
        assert_eq!(lratios.len(), self.h.num_cols());
        self.initialize(lratios);
        let mut iterations = 0;
        loop {
            if check(&self.h, &self.codeword, &mut self.parity) == 0 {
                return Ok(self.output(iterations));
            }
            if iterations == max_iterations {
                return Err(self.output(iterations));
            }
            self.process_check_nodes();
            self.process_variable_nodes(lratios);
            iterations += 1;
        }
    }

    fn output(&self, iterations: usize) -> DecoderOutput {
        DecoderOutput {
            codeword: self.codeword.clone(),
            bit_probabilities: self.bit_probabilities.clone(),
            iterations,
        }
    }

    fn initialize(&mut self, lratios: &[f64]) {
        for (((edges, &lr), bit), prob) in self
            .col_edges
            .iter()
            .zip(lratios.iter())
            .zip(self.codeword.iter_mut())
            .zip(self.bit_probabilities.iter_mut())
        {
            for &e in edges {
                self.edges[e] = Edge { pr: lr, lr: 1.0 };
            }
            *prob = 1.0 - 1.0 / (1.0 + lr);
            *bit = u8::from(lr >= 1.0);
        }
    }

    fn process_check_nodes(&mut self) {
        for row in &self.row_edges {
            // Products of the differences of all the other edges in the
            // row, computed with a forward and a backward pass
            let mut dl = 1.0;
            for &e in row {
                let edge = &mut self.edges[e];
                edge.lr = dl;
                dl *= 2.0 / (1.0 + edge.pr) - 1.0;
            }
            dl = 1.0;
            for &e in row.iter().rev() {
                let edge = &mut self.edges[e];
                let t = edge.lr * dl;
                edge.lr = (1.0 - t) / (1.0 + t);
                dl *= 2.0 / (1.0 + edge.pr) - 1.0;
            }
        }
    }

    fn process_variable_nodes(&mut self, lratios: &[f64]) {
        for (((edges, &lr), bit), prob) in self
            .col_edges
            .iter()
            .zip(lratios.iter())
            .zip(self.codeword.iter_mut())
            .zip(self.bit_probabilities.iter_mut())
        {
            let mut pr = lr;
            for &e in edges {
                let edge = &mut self.edges[e];
                edge.pr = pr;
                pr *= edge.lr;
            }
            if pr.is_nan() {
                pr = 1.0;
            }
            *prob = 1.0 - 1.0 / (1.0 + pr);
            *bit = u8::from(pr >= 1.0);

            let mut pr = 1.0;
            for &e in edges.iter().rev() {
                let edge = &mut self.edges[e];
                edge.pr *= pr;
                if edge.pr.is_nan() {
                    edge.pr = 1.0;
                }
                pr *= edge.lr;
            }
        }
    }
}

impl LdpcDecoder for Decoder {
    fn decode(
        &mut self,
        lratios: &[f64],
        max_iterations: usize,
    ) -> Result<DecoderOutput, DecoderOutput> {
        Decoder::decode(self, lratios, max_iterations)
    }
}
