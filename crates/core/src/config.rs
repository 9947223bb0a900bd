//! Reproducible run configuration.
//!
//! A [`RunConfig`] captures everything needed to regenerate a sequence of
//! frames: engine, grid size, parameters, PRNG seed, step and frame counts,
//! and how the colorizer is scheduled. It round-trips through JSON so a run
//! can be saved next to its output and replayed.

use crate::error::VizError;
use crate::grid::Grid;
use crate::kernel::Dispatch;
use serde::{Deserialize, Serialize};

fn default_frames() -> usize {
    1
}

/// Everything needed to replay a run bit for bit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub engine: String,
    pub width: usize,
    pub height: usize,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    #[serde(default)]
    pub seed: u64,
    /// Engine steps between rendered frames.
    #[serde(default)]
    pub steps: usize,
    #[serde(default = "default_frames")]
    pub frames: usize,
    #[serde(default)]
    pub dispatch: Dispatch,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl RunConfig {
    /// A single-frame config with empty params and no steps.
    pub fn new(engine: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            engine: engine.to_string(),
            width,
            height,
            params: empty_params(),
            seed,
            steps: 0,
            frames: default_frames(),
            dispatch: Dispatch::default(),
        }
    }

    /// Grid geometry, rejecting zero or overflowing dimensions.
    pub fn grid(&self) -> Result<Grid, VizError> {
        Grid::new(self.width, self.height)
    }

    /// Parses a config from JSON text. Malformed input becomes `VizError::Io`.
    pub fn from_json_str(text: &str) -> Result<Self, VizError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| VizError::Io(format!("bad config: {e}")))?;
        config.grid()?;
        Ok(config)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, VizError> {
        serde_json::to_string_pretty(self).map_err(|e| VizError::Io(e.to_string()))
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new("heat", 256, 256, 42)
    }
}
