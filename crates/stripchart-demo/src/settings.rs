// File: crates/stripchart-demo/src/settings.rs
// Summary: Demo settings loaded from TOML: chart configuration, feed pacing and output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stripchart_core::ChartConfig;

use crate::random_walk::WalkParams;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub chart: ChartConfig,
    pub feed: FeedSettings,
    pub output: OutputSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Data points to stream (one sample per line each).
    pub samples: usize,
    /// Feed period; 0 streams as fast as possible.
    pub interval_ms: u64,
    pub seed: u64,
    /// Read samples from a CSV (one column per line) instead of the random walk.
    pub csv: Option<PathBuf>,
    /// Per-line walk overrides; missing entries derive from the line's absolute bounds.
    pub walks: Vec<WalkParams>,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self { samples: 600, interval_ms: 40, seed: 0x5717, csv: None, walks: Vec::new() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: PathBuf,
    pub theme: String,
    pub width: i32,
    pub height: i32,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { dir: PathBuf::from("target/out"), theme: "dark".to_string(), width: 1024, height: 640 }
    }
}

impl DemoSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let settings = Self::from_toml(&data).with_context(|| format!("parsing {}", path.display()))?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        let settings: Self = toml::from_str(data)?;
        settings.chart.validate()?;
        for walk in &settings.feed.walks {
            walk.validate()?;
        }
        anyhow::ensure!(
            settings.output.width > 0 && settings.output.height > 0,
            "output size {}x{} must be positive",
            settings.output.width,
            settings.output.height
        );
        Ok(settings)
    }

    /// Walk parameters for every configured line.
    pub fn walk_params(&self) -> Vec<WalkParams> {
        self.chart
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                self.feed
                    .walks
                    .get(i)
                    .copied()
                    .unwrap_or_else(|| WalkParams::with_bounds(line.y_abs_min, line.y_abs_max))
            })
            .collect()
    }
}
