//! Weighted combination of the reconstruction, gradient-difference and adversarial losses
//! used to train the generator.

use burn::{
    prelude::*,
    tensor::{backend::Backend, cast::ToElement, Tensor},
};
use burn_extra_ops::ForwardDifference;
use serde::Serialize;

use super::{adversarial::adv_loss_with_base, gdl::multiscale_gdl_loss, lp::multiscale_lp_loss};
use crate::{
    config::{LogBase, LpNorm},
    error::{LossError, LossResult},
};

/// Configuration for the combined generator loss.
#[derive(Config, Debug)]
pub struct CombinedLossConfig {
    /// Weight of the adversarial term.
    #[config(default = 1.0)]
    pub lam_adv: f32,
    /// Weight of the reconstruction term.
    #[config(default = 1.0)]
    pub lam_lp: f32,
    /// Weight of the gradient-difference term.
    #[config(default = 1.0)]
    pub lam_gdl: f32,
    /// Exponent of the reconstruction term.
    #[config(default = "LpNorm::L2")]
    pub l_num: LpNorm,
    /// Power applied to each gradient difference.
    #[config(default = 2.0)]
    pub alpha: f32,
    /// Whether the adversarial term is part of the loss.
    #[config(default = "true")]
    pub adversarial: bool,
    /// Logarithm of the adversarial cross-entropy.
    #[config(default = "LogBase::Ten")]
    pub log_base: LogBase,
}

impl CombinedLossConfig {
    /// Checks that every weight is finite and non-negative and `alpha` is positive.
    pub fn validate(&self) -> LossResult<()> {
        for (name, weight) in [
            ("lam_adv", self.lam_adv),
            ("lam_lp", self.lam_lp),
            ("lam_gdl", self.lam_gdl),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(LossError::InvalidConfiguration {
                    reason: format!("{name} must be finite and non-negative, got {weight}"),
                });
            }
        }

        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(LossError::InvalidConfiguration {
                reason: format!("alpha must be finite and positive, got {}", self.alpha),
            });
        }

        Ok(())
    }

    /// Validate the configuration and initialize the combined loss.
    pub fn init<B: Backend>(&self) -> LossResult<CombinedLoss<B>> {
        self.validate()?;
        Ok(CombinedLoss::from_config(self))
    }
}

/// Combined generator loss: `lam_lp * lp + lam_gdl * gdl (+ lam_adv * adv)`.
///
/// Works on 2D frames (`[N, C, H, W]`) and 3D volumes (`[N, C, D, H, W]`).
#[derive(Debug, Clone)]
pub struct CombinedLoss<B: Backend> {
    lam_adv: f32,
    lam_lp: f32,
    lam_gdl: f32,
    l_num: LpNorm,
    alpha: f32,
    adversarial: bool,
    log_base: LogBase,
    _phantom: std::marker::PhantomData<B>,
}

impl<B: Backend> Default for CombinedLoss<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> CombinedLoss<B> {
    /// Create a new combined loss with default configuration.
    pub fn new() -> Self {
        Self::from_config(&CombinedLossConfig::new())
    }

    fn from_config(config: &CombinedLossConfig) -> Self {
        Self {
            lam_adv: config.lam_adv,
            lam_lp: config.lam_lp,
            lam_gdl: config.lam_gdl,
            l_num: config.l_num.clone(),
            alpha: config.alpha,
            adversarial: config.adversarial,
            log_base: config.log_base.clone(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Whether [`forward`](Self::forward) evaluates the adversarial term.
    ///
    /// A zero weight skips the term even when adversarial training is enabled.
    pub fn includes_adversarial(&self) -> bool {
        self.adversarial && self.lam_adv != 0.0
    }

    /// Calculate the combined loss.
    ///
    /// # Arguments
    /// * `gen_frames` - Generated frames at each scale
    /// * `gt_frames` - Ground truth frames at each scale
    /// * `d_preds` - Discriminator probabilities for the generated frames at each scale,
    ///   `[batch, 1]` each; ignored unless [`includes_adversarial`](Self::includes_adversarial)
    ///
    /// # Returns
    /// The weighted total and each weighted term
    pub fn forward<const D: usize>(
        &self,
        gen_frames: Vec<Tensor<B, D>>,
        gt_frames: Vec<Tensor<B, D>>,
        d_preds: Vec<Tensor<B, 2>>,
    ) -> LossResult<CombinedLossOutput<B>>
    where
        Tensor<B, D>: ForwardDifference,
    {
        let Some(first) = gen_frames.first() else {
            return Err(LossError::EmptyScales {
                operation: "combined_loss",
            });
        };
        let batch_size = first.dims()[0];
        let device = first.device();

        tracing::trace!(
            scales = gen_frames.len(),
            batch_size,
            adversarial = self.includes_adversarial(),
            "evaluating combined loss"
        );

        let lp = multiscale_lp_loss(gen_frames.clone(), gt_frames.clone(), &self.l_num)?
            * self.lam_lp;
        let gdl = multiscale_gdl_loss(gen_frames, gt_frames, self.alpha)? * self.lam_gdl;

        let adv = if self.includes_adversarial() {
            // The generator wants every prediction judged real.
            let labels = Tensor::<B, 2>::ones([batch_size, 1], &device);
            Some(adv_loss_with_base(d_preds, labels, &self.log_base)? * self.lam_adv)
        } else {
            None
        };

        let total = match &adv {
            Some(adv) => lp.clone() + gdl.clone() + adv.clone(),
            None => lp.clone() + gdl.clone(),
        };

        Ok(CombinedLossOutput {
            total,
            lp,
            gdl,
            adv,
        })
    }
}

/// Result of a combined loss evaluation. Every term is already weighted.
#[derive(Debug, Clone)]
pub struct CombinedLossOutput<B: Backend> {
    /// Sum of every evaluated term.
    pub total: Tensor<B, 1>,
    /// Weighted reconstruction term.
    pub lp: Tensor<B, 1>,
    /// Weighted gradient-difference term.
    pub gdl: Tensor<B, 1>,
    /// `None` when the adversarial term was skipped.
    pub adv: Option<Tensor<B, 1>>,
}

impl<B: Backend> CombinedLossOutput<B> {
    /// Reads every term back to the host.
    pub fn breakdown(&self) -> LossBreakdown {
        let breakdown = LossBreakdown {
            total: self.total.clone().into_scalar().to_f64(),
            lp: self.lp.clone().into_scalar().to_f64(),
            gdl: self.gdl.clone().into_scalar().to_f64(),
            adv: self.adv.clone().map(|adv| adv.into_scalar().to_f64()),
        };
        tracing::debug!(
            total = breakdown.total,
            lp = breakdown.lp,
            gdl = breakdown.gdl,
            adv = breakdown.adv,
            "combined loss"
        );
        breakdown
    }
}

/// Host-side values of a [`CombinedLossOutput`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LossBreakdown {
    /// Weighted total.
    pub total: f64,
    /// Weighted reconstruction term.
    pub lp: f64,
    /// Weighted gradient-difference term.
    pub gdl: f64,
    /// Weighted adversarial term, `None` when skipped.
    pub adv: Option<f64>,
}

/// Calculate the combined loss for `config` in a single call.
pub fn combined_loss<B: Backend, const D: usize>(
    config: &CombinedLossConfig,
    gen_frames: Vec<Tensor<B, D>>,
    gt_frames: Vec<Tensor<B, D>>,
    d_preds: Vec<Tensor<B, 2>>,
) -> LossResult<Tensor<B, 1>>
where
    Tensor<B, D>: ForwardDifference,
{
    let loss = config.init::<B>()?;
    Ok(loss.forward(gen_frames, gt_frames, d_preds)?.total)
}
