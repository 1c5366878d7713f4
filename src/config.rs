use std::{collections::BTreeMap, path::PathBuf};

use serde::Deserialize;

use crate::{io::quantize::Quantizer, offset::{BatchOffsets, EdgeLoop, EdgeOffsets, OffsetOptions, ParallelPolicy, DEFAULT_TOLERANCE}};

fn default_true() -> bool {
    true
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_scale() -> f64 {
    Quantizer::DEFAULT_SCALE
}

#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub input: PathBuf,
    /// Offset of each edge, by position
    #[serde(default)]
    pub offsets: Vec<f64>,
    /// Offset of the edges past the end of `offsets`
    #[serde(default)]
    pub default_offset: f64,
    /// Per-boundary replacements for `offsets`, keyed by the boundary's position in the input
    #[serde(default)]
    pub path_offsets: BTreeMap<usize, Vec<f64>>,
    #[serde(default)]
    pub edge_loop: EdgeLoop,
    #[serde(default)]
    pub parallel: ParallelPolicy,
    #[serde(default = "default_true")]
    pub resolve: bool,
}

impl JobConfig {
    pub fn batch_offsets(&self) -> BatchOffsets {
        self.path_offsets.iter().fold(
            BatchOffsets::new(EdgeOffsets::new(self.offsets.clone(), self.default_offset)),
            |batch, (path, offsets)| batch.with_path(*path, EdgeOffsets::new(offsets.clone(), self.default_offset)),
        )
    }

    pub fn options(&self, shared: &SharedConfig) -> OffsetOptions {
        OffsetOptions {
            edge_loop: self.edge_loop,
            parallel: self.parallel,
            resolve: self.resolve,
            tolerance: shared.tolerance,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SharedConfig {
    /// Longest segment when discretizing curves
    pub resolution: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Work on a fixed-point grid
    #[serde(default)]
    pub quantize: bool,
    /// Grid steps per unit when quantizing
    #[serde(default = "default_scale")]
    pub scale: f64,
}

#[derive(Debug, Deserialize)]
pub struct OffsetConfig {
    pub name: String,
    pub outdir: PathBuf,
    pub jobs: Vec<JobConfig>,
    pub shared: SharedConfig,
}
