//! Caller-owned running sum of loss terms.

use burn::tensor::{backend::Backend, Tensor};

/// An ordered collection of scalar loss terms whose running total is returned each time a
/// term is added.
///
/// The accumulator lives exactly as long as the caller keeps it. Reuse it across steps only
/// if the accumulated terms are meant to be summed again; otherwise [`clear`](Self::clear)
/// it or create a new one per optimization step.
#[derive(Debug, Clone)]
pub struct LossAccumulator<B: Backend> {
    terms: Vec<Tensor<B, 1>>,
}

impl<B: Backend> Default for LossAccumulator<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> LossAccumulator<B> {
    /// Creates an empty accumulator.
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Adds `term` and returns the sum of every accumulated term, including `term`.
    pub fn push(&mut self, term: Tensor<B, 1>) -> Tensor<B, 1> {
        let total = self
            .terms
            .iter()
            .cloned()
            .fold(term.clone(), |total, previous| total + previous);
        self.terms.push(term);
        total
    }

    /// Sum of every accumulated term, or `None` when empty.
    pub fn total(&self) -> Option<Tensor<B, 1>> {
        self.terms.iter().cloned().reduce(|total, term| total + term)
    }

    /// The accumulated terms in insertion order.
    pub fn terms(&self) -> &[Tensor<B, 1>] {
        &self.terms
    }

    /// Number of accumulated terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no term has been accumulated yet.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Drops every accumulated term.
    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// Removes and returns every accumulated term, leaving the accumulator empty.
    pub fn take(&mut self) -> Vec<Tensor<B, 1>> {
        std::mem::take(&mut self.terms)
    }
}
