//! CT-GAN loss demos
//!
//! ## Available Examples
//!
//! - `loss_probe`: evaluates the combined generator loss on synthetic multi-scale data
//!
//! ## Usage
//!
//! ```bash
//! # 3D volumes, three scales, default weights
//! cargo run --bin loss_probe -- --volumetric --scales 3
//!
//! # Load weights from a config file and disable the adversarial term
//! cargo run --bin loss_probe -- --config loss.json --no-adversarial
//! ```

pub mod synthetic;

pub use synthetic::{scale_sizes, synthetic_predictions, synthetic_pyramid};
