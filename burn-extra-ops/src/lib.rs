//! Additional operations for the Burn deep learning framework
//!
//! This crate provides tensor operations used by the CT-GAN losses that are not
//! available in the core Burn framework.

mod finite_difference;
mod log10;

// Convenient re-exports
pub use finite_difference::{
    forward_difference_2d, forward_difference_3d, Axis2d, Axis3d, ForwardDifference, DIFF_KERNEL,
};
pub use log10::Log10;
