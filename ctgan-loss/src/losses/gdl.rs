//! Gradient-difference loss (GDL).
//!
//! Instead of comparing intensities, GDL compares the magnitude of local intensity
//! gradients between generated and ground-truth frames. Blurry generations have weaker
//! edges than the ground truth and are penalized even when their pixel error is small.

use burn::tensor::{backend::Backend, Tensor};
use burn_extra_ops::ForwardDifference;

use super::{ensure_same_shape, ensure_scales, mean_over_scales};
use crate::error::LossResult;

/// Gradient-difference loss of a single scale.
///
/// For every spatial axis, takes `| |∇truth| - |∇generated| |^alpha` and sums it over all
/// axes and elements.
///
/// # Arguments
/// * `generated` - Generated tensor, `[N, C, H, W]` or `[N, C, D, H, W]`
/// * `truth` - Ground truth with the same shape
/// * `alpha` - Power applied to each gradient difference
///
/// # Returns
/// Scalar loss tensor of shape `[1]`
pub fn gradient_difference<B: Backend, const D: usize>(
    generated: Tensor<B, D>,
    truth: Tensor<B, D>,
    alpha: f32,
) -> Tensor<B, 1>
where
    Tensor<B, D>: ForwardDifference,
{
    let device = generated.device();

    <Tensor<B, D> as ForwardDifference>::AXES.iter().fold(
        Tensor::zeros([1], &device),
        |total, &axis| {
            let gen_gradient = generated.clone().forward_difference(axis).abs();
            let gt_gradient = truth.clone().forward_difference(axis).abs();
            total + (gt_gradient - gen_gradient).abs().powf_scalar(alpha).sum()
        },
    )
}

/// Gradient-difference loss averaged over scales, for any frame layout with spatial
/// forward differences.
pub fn multiscale_gdl_loss<B: Backend, const D: usize>(
    gen_frames: Vec<Tensor<B, D>>,
    gt_frames: Vec<Tensor<B, D>>,
    alpha: f32,
) -> LossResult<Tensor<B, 1>>
where
    Tensor<B, D>: ForwardDifference,
{
    ensure_scales("gdl_loss", gen_frames.len(), gt_frames.len())?;
    tracing::trace!(scales = gen_frames.len(), alpha, "gradient difference loss");

    let scale_losses = gen_frames
        .into_iter()
        .zip(gt_frames)
        .map(|(generated, truth)| {
            ensure_same_shape("gdl_loss", &generated, &truth)?;
            Ok(gradient_difference(generated, truth, alpha))
        })
        .collect::<LossResult<Vec<_>>>()?;

    Ok(mean_over_scales(scale_losses))
}

/// 2D gradient-difference loss over `[N, C, H, W]` frames at each scale.
pub fn gdl_loss<B: Backend>(
    gen_frames: Vec<Tensor<B, 4>>,
    gt_frames: Vec<Tensor<B, 4>>,
    alpha: f32,
) -> LossResult<Tensor<B, 1>> {
    multiscale_gdl_loss(gen_frames, gt_frames, alpha)
}

/// 3D gradient-difference loss over `[N, C, D, H, W]` volumes at each scale.
pub fn gdl3d_loss<B: Backend>(
    gen_frames: Vec<Tensor<B, 5>>,
    gt_frames: Vec<Tensor<B, 5>>,
    alpha: f32,
) -> LossResult<Tensor<B, 1>> {
    multiscale_gdl_loss(gen_frames, gt_frames, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LossError;
    use burn::{
        backend::{Autodiff, NdArray},
        tensor::Distribution,
    };
    use rstest::rstest;

    type TestBackend = NdArray<f32>;

    #[rstest]
    #[case(1.0)]
    #[case(1.5)]
    #[case(2.0)]
    fn identical_frames_have_zero_loss(#[case] alpha: f32) {
        let device = Default::default();
        let frames = vec![
            Tensor::<TestBackend, 4>::random(
                [2, 1, 8, 8],
                Distribution::Normal(0.0, 1.0),
                &device,
            ),
            Tensor::<TestBackend, 4>::random(
                [2, 1, 4, 4],
                Distribution::Normal(0.0, 1.0),
                &device,
            ),
        ];

        let loss = gdl_loss(frames.clone(), frames, alpha).unwrap();

        assert_eq!(loss.dims(), [1]);
        assert_eq!(loss.into_scalar(), 0.0);
    }

    #[rstest]
    #[case(1.0)]
    #[case(2.0)]
    fn identical_volumes_have_zero_loss(#[case] alpha: f32) {
        let device = Default::default();
        let volumes = vec![Tensor::<TestBackend, 5>::random(
            [1, 1, 4, 4, 4],
            Distribution::Normal(0.0, 1.0),
            &device,
        )];

        let loss = gdl3d_loss(volumes.clone(), volumes, alpha).unwrap();

        assert_eq!(loss.into_scalar(), 0.0);
    }

    #[test]
    fn zero_frames_have_zero_loss() {
        let device = Default::default();
        let zeros = Tensor::<TestBackend, 4>::zeros([1, 1, 4, 4], &device);

        let loss = gdl_loss(vec![zeros.clone()], vec![zeros], 2.0).unwrap();

        assert_eq!(loss.into_scalar(), 0.0);
    }

    #[test]
    fn single_pixel_edge_known_value() {
        let device = Default::default();
        // A lone bright pixel in the ground truth against a flat generation.
        let truth = Tensor::<TestBackend, 4>::from_floats([[[[0.0, 0.0], [0.0, 1.0]]]], &device);
        let generated = Tensor::<TestBackend, 4>::zeros([1, 1, 2, 2], &device);

        let loss = gdl_loss(vec![generated], vec![truth], 2.0).unwrap();

        // width gradient |[[0, 0], [1, 1]]|, height gradient |[[0, 1], [0, 1]]|
        assert!((loss.into_scalar() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn constant_offset_only_changes_border() {
        let device = Default::default();
        let truth = Tensor::<TestBackend, 4>::zeros([1, 1, 3, 3], &device);
        let generated = Tensor::<TestBackend, 4>::ones([1, 1, 3, 3], &device);

        let loss = gdl_loss(vec![generated], vec![truth], 1.0).unwrap();

        // Only the zero-padded last column and last row differ: 3 + 3
        assert!((loss.into_scalar() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn volumes_include_depth_gradient() {
        let device = Default::default();
        let truth =
            Tensor::<TestBackend, 5>::from_floats([[[[[0.0]], [[2.0]]]]], &device);
        let generated = Tensor::<TestBackend, 5>::zeros([1, 1, 2, 1, 1], &device);

        let loss = gdl3d_loss(vec![generated], vec![truth], 1.0).unwrap();

        // depth: |2 - 0| + |0 - 2| = 4, height: 2, width: 2
        assert!((loss.into_scalar() - 8.0).abs() < 1e-6);
    }

    #[test]
    fn scales_are_averaged() {
        let device = Default::default();
        let truth = Tensor::<TestBackend, 4>::from_floats([[[[0.0, 0.0], [0.0, 1.0]]]], &device);
        let generated = Tensor::<TestBackend, 4>::zeros([1, 1, 2, 2], &device);

        let single = gdl_loss(vec![generated.clone()], vec![truth.clone()], 2.0)
            .unwrap()
            .into_scalar();
        let averaged = gdl_loss(
            vec![generated.clone(), generated.clone()],
            vec![truth.clone(), generated],
            2.0,
        )
        .unwrap()
        .into_scalar();

        assert!((averaged - single / 2.0).abs() < 1e-6);
    }

    #[test]
    fn empty_scales_are_rejected() {
        let result = gdl_loss::<TestBackend>(Vec::new(), Vec::new(), 2.0);

        assert!(matches!(result, Err(LossError::EmptyScales { .. })));
    }

    #[test]
    fn mismatched_scale_shapes_are_rejected() {
        let device = Default::default();
        let generated = Tensor::<TestBackend, 4>::zeros([1, 1, 4, 4], &device);
        let truth = Tensor::<TestBackend, 4>::zeros([1, 1, 2, 2], &device);

        let result = gdl_loss(vec![generated], vec![truth], 2.0);

        assert!(matches!(result, Err(LossError::ShapeMismatch { .. })));
    }

    #[test]
    fn gradients_reach_generated_frames() {
        type AdBackend = Autodiff<NdArray<f32>>;
        let device = Default::default();
        let generated = Tensor::<AdBackend, 4>::random(
            [1, 1, 4, 4],
            Distribution::Normal(0.0, 1.0),
            &device,
        )
        .require_grad();
        let truth = Tensor::<AdBackend, 4>::random(
            [1, 1, 4, 4],
            Distribution::Normal(0.0, 1.0),
            &device,
        );

        let loss = gdl_loss(vec![generated.clone()], vec![truth], 2.0).unwrap();
        let grads = loss.backward();

        assert!(generated.grad(&grads).is_some());
    }
}
