//! Options shared by several loss functions.

use burn::prelude::*;
use burn_extra_ops::Log10;

/// Exponent of the pixel-wise reconstruction loss.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum LpNorm {
    /// `|generated - truth|`
    L1,
    /// `|generated - truth|^2`
    L2,
}

impl LpNorm {
    /// The exponent `p` applied to each absolute difference.
    #[must_use]
    pub const fn exponent(&self) -> f32 {
        match self {
            Self::L1 => 1.0,
            Self::L2 => 2.0,
        }
    }
}

/// Logarithm used by the binary cross-entropy with explicit labels.
///
/// `Ten` reproduces the reference models, which were trained with `log10`; `Natural`
/// gives the textbook cross-entropy.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum LogBase {
    /// `log10`
    Ten,
    /// `ln`
    Natural,
}

impl LogBase {
    /// Applies the logarithm element-wise.
    pub fn apply<B: Backend, const D: usize>(&self, tensor: Tensor<B, D>) -> Tensor<B, D> {
        match self {
            Self::Ten => tensor.log10(),
            Self::Natural => tensor.log(),
        }
    }
}
