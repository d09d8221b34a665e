//! Binary cross-entropy with explicit labels, summed over the batch.

use burn::tensor::{backend::Backend, Tensor};

use super::ensure_same_shape;
use crate::{
    config::LogBase,
    error::{LossError, LossResult},
};

/// Summed binary cross-entropy using base-10 logarithms.
///
/// See [`bce_loss_with_base`].
pub fn bce_loss<B: Backend>(
    preds: Tensor<B, 2>,
    targets: Tensor<B, 2>,
) -> LossResult<Tensor<B, 1>> {
    bce_loss_with_base(preds, targets, &LogBase::Ten)
}

/// Summed binary cross-entropy:
/// `-(targetsᵀ · log(preds) + (1 - targets)ᵀ · log(1 - preds))`.
///
/// Predictions are not clamped. Values of exactly 0 or 1 produce infinite losses, so
/// callers must keep them inside the open interval.
///
/// # Arguments
/// * `preds` - Predicted probabilities with shape `[batch, 1]`
/// * `targets` - Target labels with shape `[batch, 1]`; the generator passes labels it wants
///   the discriminator to believe, not necessarily the truth
/// * `base` - Logarithm base
///
/// # Returns
/// Scalar loss tensor of shape `[1]`
pub fn bce_loss_with_base<B: Backend>(
    preds: Tensor<B, 2>,
    targets: Tensor<B, 2>,
    base: &LogBase,
) -> LossResult<Tensor<B, 1>> {
    ensure_same_shape("bce_loss", &preds, &targets)?;
    let dims = preds.dims();
    if dims[1] != 1 {
        return Err(LossError::InvalidShape {
            operation: "bce_loss",
            expected: "[batch, 1]".to_string(),
            actual: format!("{dims:?}"),
        });
    }

    let log_preds = base.apply(preds.clone());
    let log_one_minus_preds = base.apply(Tensor::ones_like(&preds) - preds);
    let one_minus_targets = Tensor::ones_like(&targets) - targets.clone();

    // [1, batch] x [batch, 1] -> [1, 1]
    let positive = targets.transpose().matmul(log_preds);
    let negative = one_minus_targets.transpose().matmul(log_one_minus_preds);

    Ok(-(positive + negative).reshape([1]))
}
