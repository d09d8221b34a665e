//! Loss functions for training generative adversarial networks that synthesize CT
//! images and volumes.
//!
//! - [`lp_loss`]: pixel-wise reconstruction loss, optionally accumulated across calls in a
//!   caller-owned [`LossAccumulator`]
//! - [`gdl_loss`] / [`gdl3d_loss`]: gradient-difference loss for 2D frames and 3D volumes
//! - [`cross_entropy_discriminator`]: sigmoid cross-entropy on discriminator logits
//! - [`bce_loss`] / [`adv_loss`]: binary cross-entropy and its multi-scale average
//! - [`CombinedLoss`]: the weighted generator objective
//!
//! Every function is generic over the Burn backend. Evaluate on an autodiff backend to
//! obtain differentiable losses.

pub mod config;
mod error;
pub mod losses;


pub use burn_extra_ops::ForwardDifference;
pub use config::{LogBase, LpNorm};
pub use error::{LossError, LossResult};
pub use losses::{
    adv_loss, adv_loss_with_base, bce_loss, bce_loss_with_base, combined_loss,
    cross_entropy_discriminator, gdl3d_loss, gdl_loss, gradient_difference, lp_loss,
    lp_loss_term, multiscale_gdl_loss, multiscale_lp_loss, CombinedLoss, CombinedLossConfig,
    CombinedLossOutput, LossAccumulator, LossBreakdown,
};
