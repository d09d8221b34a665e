//! Multi-scale adversarial loss for the generator.

use burn::tensor::{backend::Backend, Tensor};

use super::{bce::bce_loss_with_base, mean_over_scales};
use crate::{
    config::LogBase,
    error::{LossError, LossResult},
};

/// Adversarial loss with base-10 logarithms.
///
/// See [`adv_loss_with_base`].
pub fn adv_loss<B: Backend>(
    preds: Vec<Tensor<B, 2>>,
    labels: Tensor<B, 2>,
) -> LossResult<Tensor<B, 1>> {
    adv_loss_with_base(preds, labels, &LogBase::Ten)
}

/// Binary cross-entropy of the discriminator predictions at each scale against a shared
/// label tensor, averaged over scales.
///
/// # Arguments
/// * `preds` - Discriminator probabilities per scale, each `[batch, 1]`
/// * `labels` - Labels shared by every scale, `[batch, 1]`
/// * `base` - Logarithm base of the cross-entropy
pub fn adv_loss_with_base<B: Backend>(
    preds: Vec<Tensor<B, 2>>,
    labels: Tensor<B, 2>,
    base: &LogBase,
) -> LossResult<Tensor<B, 1>> {
    if preds.is_empty() {
        return Err(LossError::EmptyScales {
            operation: "adv_loss",
        });
    }
    tracing::trace!(scales = preds.len(), "adversarial loss");

    let scale_losses = preds
        .into_iter()
        .map(|pred| bce_loss_with_base(pred, labels.clone(), base))
        .collect::<LossResult<Vec<_>>>()?;

    Ok(mean_over_scales(scale_losses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::losses::bce_loss;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn identical_scales_equal_single_bce() {
        let device = Default::default();
        let pred = Tensor::<TestBackend, 2>::from_floats([[0.3], [0.8], [0.6]], &device);
        let labels = Tensor::<TestBackend, 2>::ones([3, 1], &device);

        let single = bce_loss(pred.clone(), labels.clone())
            .unwrap()
            .into_scalar();
        let adversarial = adv_loss(vec![pred.clone(), pred.clone(), pred], labels)
            .unwrap()
            .into_scalar();

        assert!((adversarial - single).abs() < 1e-6);
    }

    #[test]
    fn scales_are_averaged() {
        let device = Default::default();
        let labels = Tensor::<TestBackend, 2>::ones([1, 1], &device);
        let confident = Tensor::<TestBackend, 2>::from_floats([[0.9]], &device);
        let unsure = Tensor::<TestBackend, 2>::from_floats([[0.5]], &device);

        let loss = adv_loss(vec![confident, unsure], labels)
            .unwrap()
            .into_scalar();

        let expected = -(0.9_f32.log10() + 0.5_f32.log10()) / 2.0;
        assert!((loss - expected).abs() < 1e-6);
    }

    #[test]
    fn empty_predictions_are_rejected() {
        let device = Default::default();
        let labels = Tensor::<TestBackend, 2>::ones([1, 1], &device);

        let result = adv_loss(Vec::new(), labels);

        assert!(matches!(result, Err(LossError::EmptyScales { .. })));
    }
}
