//! Base-10 logarithm for float tensors.

use burn::prelude::*;

/// A trait for calculating the base-10 logarithm on a tensor.
pub trait Log10 {
    /// Calculates `log10(x)` element-wise.
    fn log10(self) -> Self;
}

impl<B: Backend, const D: usize> Log10 for Tensor<B, D> {
    fn log10(self) -> Self {
        self.log().div_scalar(core::f32::consts::LN_10)
    }
}
