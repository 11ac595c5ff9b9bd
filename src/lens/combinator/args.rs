//! Combinator lens arguments

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Arguments for combining the static info of solved paths
///
/// Usable as clap arguments (with the `cli` feature) or as a JSON payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct CombineArgs {
    /// JSON file holding one path solution or an array of path solutions
    #[cfg_attr(feature = "cli", clap(value_name = "FILE"))]
    pub file: PathBuf,

    /// Show the per-AS breakdown instead of the condensed path metadata
    #[cfg_attr(feature = "cli", clap(long))]
    #[serde(default)]
    pub per_as: bool,
}

impl CombineArgs {
    pub fn new<P: Into<PathBuf>>(file: P) -> Self {
        Self {
            file: file.into(),
            per_as: false,
        }
    }

    pub fn with_per_as(mut self, per_as: bool) -> Self {
        self.per_as = per_as;
        self
    }
}
