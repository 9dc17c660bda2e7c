//! Command handler modules for hedge-cli.
//!
//! Shared plumbing (tracing, layered config, snapshot files) lives here.
//! Valuation commands live in [`valuation`].

pub mod valuation;

use anyhow::{Context, Result};
use hedge_config::{report_unused_keys, KernelConfig, UnusedKeyPolicy};
use hedge_kernel::{Money, PortfolioSnapshot, Position};
use serde::Deserialize;
use std::fs;
use tracing::warn;

/// Install the fmt subscriber on stderr. `RUST_LOG` wins over `filter`.
pub fn init_tracing(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .try_init();
}

/// Resolved settings for a snapshot command.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub kernel: KernelConfig,
    pub config_hash: Option<String>,
}

impl Settings {
    /// Load layered config (if any), then bring up tracing with its filter.
    pub fn load(config_paths: &[String]) -> Result<Self> {
        if config_paths.is_empty() {
            init_tracing(hedge_config::DEFAULT_LOG_FILTER);
            return Ok(Settings::default());
        }

        let path_refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
        let loaded = hedge_config::load_layered_yaml(&path_refs)?;
        let kernel = loaded.kernel().context("invalid kernel config")?;
        init_tracing(&kernel.log_filter);

        let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
        if !report.is_clean() {
            warn!(
                unused = ?report.unused_leaf_pointers,
                "config contains keys nothing reads"
            );
        }

        Ok(Settings {
            kernel,
            config_hash: Some(loaded.config_hash),
        })
    }
}

/// On-disk snapshot. Amounts are basis points; floats fail to parse.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotFile {
    pub cash: i64,
    #[serde(default)]
    pub positions: Vec<PositionRow>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionRow {
    pub asset_id: String,
    pub quantity: i64,
    pub mark_price: i64,
}

/// Read a snapshot file and build it under the configured input policy.
pub fn load_snapshot(path: &str, settings: &Settings) -> Result<PortfolioSnapshot> {
    hedge_kernel::initialize_kernel();
    let raw = fs::read_to_string(path).with_context(|| format!("read snapshot failed: {}", path))?;
    let file: SnapshotFile =
        serde_json::from_str(raw.trim()).context("snapshot must be valid JSON")?;

    let positions = file
        .positions
        .into_iter()
        .map(|r| Position::new(r.asset_id, r.quantity, Money::new(r.mark_price)))
        .collect();

    let snapshot = settings
        .kernel
        .input_policy
        .snapshot(Money::new(file.cash), positions)?;
    Ok(snapshot)
}
