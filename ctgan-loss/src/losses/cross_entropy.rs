//! Sigmoid cross-entropy for discriminator logits.

use burn::tensor::{backend::Backend, Tensor};

use super::ensure_same_shape;
use crate::error::LossResult;

/// Mean sigmoid cross-entropy between discriminator logits and binary labels.
///
/// # Arguments
/// * `logits` - Raw discriminator outputs, typically `[batch, 1]`
/// * `labels` - `1` for real samples, `0` for generated ones, same shape as `logits`
///
/// # Returns
/// Scalar loss tensor of shape `[1]`
pub fn cross_entropy_discriminator<B: Backend, const D: usize>(
    logits: Tensor<B, D>,
    labels: Tensor<B, D>,
) -> LossResult<Tensor<B, 1>> {
    ensure_same_shape("cross_entropy_discriminator", &logits, &labels)?;

    // max(x, 0) - x * z + log(1 + exp(-|x|))
    let positive_part = logits.clone().clamp_min(0.0);
    let softplus = (-logits.clone().abs()).exp().log1p();

    Ok((positive_part - logits * labels + softplus).mean())
}
