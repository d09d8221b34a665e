//! Combined Loss Probe
//!
//! Evaluates the CT-GAN generator loss on random multi-scale frames or volumes and logs
//! each weighted term. Useful for checking loss weights before a training run.
//!
//! ## Usage
//!
//! ```bash
//! # 2D frames at 64, 32 and 16 pixels
//! cargo run --bin loss_probe -- --size 64 --scales 3
//!
//! # 3D volumes with a saved configuration
//! cargo run --bin loss_probe -- --volumetric --config loss.json
//!
//! # Verbose library tracing
//! RUST_LOG=ctgan_loss=trace cargo run --bin loss_probe
//! ```

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use burn::{
    backend::ndarray::{NdArray, NdArrayDevice},
    prelude::*,
};
use clap::Parser;
use ctgan_loss::{CombinedLoss, CombinedLossConfig, ForwardDifference, LossBreakdown};
use ctgan_loss_demos::{scale_sizes, synthetic_predictions, synthetic_pyramid};
use tracing_subscriber::EnvFilter;

type ProbeBackend = NdArray<f32>;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Loss configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Batch size
    #[arg(long, default_value_t = 2)]
    batch_size: usize,

    /// Spatial side length of the finest scale
    #[arg(long, default_value_t = 32)]
    size: usize,

    /// Number of scales, each half the size of the previous one
    #[arg(long, default_value_t = 4)]
    scales: usize,

    /// Evaluate 3D volumes instead of 2D frames
    #[arg(long)]
    volumetric: bool,

    /// Exclude the adversarial term regardless of the configuration
    #[arg(long)]
    no_adversarial: bool,

    /// Write the effective configuration to this path
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = if let Some(config_path) = &args.config {
        CombinedLossConfig::load(config_path).map_err(|e| {
            anyhow::anyhow!("Failed to load config file {}: {e}", config_path.display())
        })?
    } else {
        CombinedLossConfig::new()
    };
    if args.no_adversarial {
        config.adversarial = false;
    }

    ensure!(args.batch_size > 0, "Batch size must be greater than 0");
    let sides = scale_sizes(args.size, args.scales);
    ensure!(!sides.is_empty(), "At least one scale of size >= 1 is required");

    if let Some(path) = &args.save_config {
        config
            .save(path)
            .with_context(|| format!("Failed to save config to {}", path.display()))?;
        tracing::info!(path = %path.display(), "saved configuration");
    }

    let device = NdArrayDevice::default();
    tracing::info!(backend = "NdArray (CPU)", "starting loss probe");
    tracing::info!(
        batch_size = args.batch_size,
        ?sides,
        volumetric = args.volumetric,
        adversarial = config.adversarial,
        "synthetic inputs"
    );

    let loss = config
        .init::<ProbeBackend>()
        .context("Invalid loss configuration")?;

    let breakdown = if args.volumetric {
        evaluate::<5>(&loss, args.batch_size, &sides, &device)?
    } else {
        evaluate::<4>(&loss, args.batch_size, &sides, &device)?
    };

    tracing::info!(
        total = breakdown.total,
        lp = breakdown.lp,
        gdl = breakdown.gdl,
        adv = breakdown.adv,
        "combined loss"
    );
    println!("{}", serde_json::to_string_pretty(&breakdown)?);

    Ok(())
}

fn evaluate<const D: usize>(
    loss: &CombinedLoss<ProbeBackend>,
    batch_size: usize,
    sides: &[usize],
    device: &NdArrayDevice,
) -> Result<LossBreakdown>
where
    Tensor<ProbeBackend, D>: ForwardDifference,
{
    let gen_frames = synthetic_pyramid::<ProbeBackend, D>(batch_size, sides, device);
    let gt_frames = synthetic_pyramid::<ProbeBackend, D>(batch_size, sides, device);
    let d_preds = synthetic_predictions::<ProbeBackend>(batch_size, sides.len(), device);

    let output = loss
        .forward(gen_frames, gt_frames, d_preds)
        .context("Failed to evaluate combined loss")?;

    Ok(output.breakdown())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_frames_on_ndarray() {
        let device = NdArrayDevice::default();
        let loss = CombinedLossConfig::new().init::<ProbeBackend>().unwrap();

        let breakdown = evaluate::<4>(&loss, 2, &scale_sizes(8, 2), &device).unwrap();

        let adv = breakdown.adv.expect("adversarial term");
        assert!(breakdown.total.is_finite());
        assert!((breakdown.total - (breakdown.lp + breakdown.gdl + adv)).abs() < 1e-4);
    }

    #[test]
    fn evaluates_volumes_without_adversarial_term() {
        let device = NdArrayDevice::default();
        let loss = CombinedLossConfig::new()
            .with_adversarial(false)
            .init::<ProbeBackend>()
            .unwrap();

        let breakdown = evaluate::<5>(&loss, 1, &scale_sizes(4, 2), &device).unwrap();

        assert!(breakdown.adv.is_none());
        assert!((breakdown.total - (breakdown.lp + breakdown.gdl)).abs() < 1e-4);
    }
}
