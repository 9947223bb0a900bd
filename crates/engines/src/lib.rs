#![deny(unsafe_code)]
//! Engine registry: maps engine names to implementations and turns their
//! fields into pixels.
//!
//! Sits between `simviz-core` (the `Engine` trait and colorizer) and the
//! engine crates, so the CLI has a single place to dispatch on names.

pub mod noise;
pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use log::debug;
use serde_json::Value;
use simviz_core::error::VizError;
use simviz_core::field::Field;
use simviz_core::Engine;

/// All available engine names.
const ENGINE_NAMES: &[&str] = &["heat", "noise"];

/// Every engine the registry can build.
pub enum EngineKind {
    /// Heat conduction with fixed heaters.
    Heat(simviz_heat::HeatTransfer),
    /// Seeded white noise.
    Noise(noise::Noise),
}

impl EngineKind {
    /// Constructs an engine by name.
    ///
    /// Returns `VizError::UnknownEngine` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, VizError> {
        let engine = match name {
            "heat" => EngineKind::Heat(simviz_heat::HeatTransfer::from_json(
                width, height, seed, params,
            )?),
            "noise" => EngineKind::Noise(noise::Noise::new(width, height, seed)?),
            _ => return Err(VizError::UnknownEngine(name.to_string())),
        };
        debug!("built engine '{name}' at {width}x{height}, seed {seed}");
        Ok(engine)
    }

    /// Returns a slice of all recognized engine names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }
}

impl Engine for EngineKind {
    fn step(&mut self) -> Result<(), VizError> {
        match self {
            EngineKind::Heat(e) => e.step(),
            EngineKind::Noise(e) => e.step(),
        }
    }

    fn field(&self) -> &Field {
        match self {
            EngineKind::Heat(e) => e.field(),
            EngineKind::Noise(e) => e.field(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::Heat(e) => e.params(),
            EngineKind::Noise(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::Heat(e) => e.param_schema(),
            EngineKind::Noise(e) => e.param_schema(),
        }
    }
}
