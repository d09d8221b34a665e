//! Loss functions for CT-GAN generator and discriminator training.
//!
//! Every loss returns a scalar tensor of shape `[1]` so that it can be combined with
//! other terms and differentiated when evaluated on an autodiff backend.

pub mod accumulator;
pub mod adversarial;
pub mod bce;
pub mod combined;
pub mod cross_entropy;
pub mod gdl;
pub mod lp;

// Re-export loss functions and their configs
pub use accumulator::LossAccumulator;
pub use adversarial::{adv_loss, adv_loss_with_base};
pub use bce::{bce_loss, bce_loss_with_base};
pub use combined::{
    combined_loss, CombinedLoss, CombinedLossConfig, CombinedLossOutput, LossBreakdown,
};
pub use cross_entropy::cross_entropy_discriminator;
pub use gdl::{gdl3d_loss, gdl_loss, gradient_difference, multiscale_gdl_loss};
pub use lp::{lp_loss, lp_loss_term, multiscale_lp_loss};

use burn::tensor::{backend::Backend, Tensor};

use crate::error::{LossError, LossResult};

/// Fails with [`LossError::ShapeMismatch`] unless both tensors have the same shape.
pub(crate) fn ensure_same_shape<B: Backend, const D: usize>(
    operation: &'static str,
    left: &Tensor<B, D>,
    right: &Tensor<B, D>,
) -> LossResult<()> {
    let (left, right) = (left.dims(), right.dims());
    if left == right {
        Ok(())
    } else {
        Err(LossError::ShapeMismatch {
            operation,
            left: format!("{left:?}"),
            right: format!("{right:?}"),
        })
    }
}

/// Checks that a pair of scale lists is non-empty and of equal length.
pub(crate) fn ensure_scales(
    operation: &'static str,
    generated: usize,
    target: usize,
) -> LossResult<()> {
    if generated != target {
        return Err(LossError::ScaleCountMismatch {
            operation,
            generated,
            target,
        });
    }
    if generated == 0 {
        return Err(LossError::EmptyScales { operation });
    }
    Ok(())
}

/// Mean of per-scale scalar losses. `scale_losses` must not be empty.
pub(crate) fn mean_over_scales<B: Backend>(scale_losses: Vec<Tensor<B, 1>>) -> Tensor<B, 1> {
    Tensor::cat(scale_losses, 0).mean()
}
