//! Pixel-wise reconstruction loss.

use burn::tensor::{backend::Backend, Tensor};

use super::{ensure_same_shape, ensure_scales, mean_over_scales, LossAccumulator};
use crate::{
    config::LpNorm,
    error::{LossError, LossResult},
};

/// Reconstruction loss of a single tensor pair:
/// `sum(|generated - truth|^p) / (2 * batch_size)`.
///
/// # Arguments
/// * `generated` - Generated frames or volumes
/// * `truth` - Ground truth with the same shape as `generated`
/// * `norm` - Exponent `p`
/// * `batch_size` - Normalization batch size, must be positive
///
/// # Returns
/// Scalar loss tensor of shape `[1]`
pub fn lp_loss_term<B: Backend, const D: usize>(
    generated: Tensor<B, D>,
    truth: Tensor<B, D>,
    norm: &LpNorm,
    batch_size: usize,
) -> LossResult<Tensor<B, 1>> {
    ensure_same_shape("lp_loss", &generated, &truth)?;
    if batch_size == 0 {
        return Err(LossError::InvalidBatchSize {
            operation: "lp_loss",
        });
    }

    let difference = (generated - truth).abs();
    let powered = match norm {
        LpNorm::L1 => difference,
        LpNorm::L2 => difference.powf_scalar(2.0),
    };

    Ok(powered.sum().div_scalar((2 * batch_size) as f32))
}

/// Reconstruction loss that also records the term in `accumulator`.
///
/// Returns the sum of every term accumulated so far, including this one. Use
/// [`lp_loss_term`] when only this term is wanted.
pub fn lp_loss<B: Backend, const D: usize>(
    generated: Tensor<B, D>,
    truth: Tensor<B, D>,
    norm: &LpNorm,
    batch_size: usize,
    accumulator: &mut LossAccumulator<B>,
) -> LossResult<Tensor<B, 1>> {
    let term = lp_loss_term(generated, truth, norm, batch_size)?;
    Ok(accumulator.push(term))
}

/// Reconstruction loss averaged over scales.
///
/// Each scale is normalized by its own batch size (dimension 0).
pub fn multiscale_lp_loss<B: Backend, const D: usize>(
    gen_frames: Vec<Tensor<B, D>>,
    gt_frames: Vec<Tensor<B, D>>,
    norm: &LpNorm,
) -> LossResult<Tensor<B, 1>> {
    ensure_scales("lp_loss", gen_frames.len(), gt_frames.len())?;

    let scale_losses = gen_frames
        .into_iter()
        .zip(gt_frames)
        .map(|(generated, truth)| {
            let batch_size = generated.dims()[0];
            lp_loss_term(generated, truth, norm, batch_size)
        })
        .collect::<LossResult<Vec<_>>>()?;

    Ok(mean_over_scales(scale_losses))
}
