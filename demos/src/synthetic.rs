//! Random multi-scale inputs for exercising the losses without a model.

use burn::{
    prelude::*,
    tensor::{backend::Backend, Distribution},
};

/// Spatial side length of each scale, coarsest last; every scale halves the previous one.
///
/// Scales that would shrink below one voxel are dropped.
pub fn scale_sizes(size: usize, scales: usize) -> Vec<usize> {
    (0..scales)
        .map(|scale| size >> scale)
        .take_while(|&side| side > 0)
        .collect()
}

/// One random tensor per scale with shape `[batch, 1, side, ..., side]`.
pub fn synthetic_pyramid<B: Backend, const D: usize>(
    batch: usize,
    sides: &[usize],
    device: &B::Device,
) -> Vec<Tensor<B, D>> {
    sides
        .iter()
        .map(|&side| {
            let mut shape = [side; D];
            shape[0] = batch;
            shape[1] = 1;
            Tensor::random(shape, Distribution::Uniform(0.0, 1.0), device)
        })
        .collect()
}

/// Discriminator probabilities for each scale, kept inside (0.05, 0.95).
pub fn synthetic_predictions<B: Backend>(
    batch: usize,
    scales: usize,
    device: &B::Device,
) -> Vec<Tensor<B, 2>> {
    (0..scales)
        .map(|_| Tensor::random([batch, 1], Distribution::Uniform(0.05, 0.95), device))
        .collect()
}
