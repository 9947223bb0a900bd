#![deny(unsafe_code)]
//! Heat transfer engine.
//!
//! A rectangular plate conducts heat between neighboring cells while a set
//! of fixed heater cells hold their temperature. Each tick first copies the
//! heaters into the plate, then blends every cell toward its four
//! neighbors:
//!
//! ```text
//! out = c + speed * (top + bottom + left + right - 4c)
//! ```
//!
//! Cells on the border reuse their own value for the missing neighbor, so
//! no heat leaks out of the plate. A `step()` is many ticks; the plate after
//! the last tick is the field handed to the colorizer.

use log::trace;
use rayon::prelude::*;
use serde_json::{json, Value};
use simviz_core::error::VizError;
use simviz_core::field::Field;
use simviz_core::params::{param_f32, param_usize};
use simviz_core::Engine;

/// Temperature of the hottest heaters.
pub const MAX_TEMP: f32 = 1.0;
/// Temperature of the cold heaters. Zero marks "no heater", so cold is just above it.
pub const MIN_TEMP: f32 = 0.0001;

const DEFAULT_SPEED: f32 = 0.25;
/// Above 0.25 the explicit update overshoots and oscillates.
const MAX_SPEED: f32 = 0.25;
const DEFAULT_TICKS_PER_STEP: usize = 90;
const MAX_TICKS_PER_STEP: usize = 10_000;
/// Side of the plate the heater layout was designed for.
const REFERENCE_DIM: usize = 1024;

/// Conduction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatParams {
    /// Fraction of the neighbor difference moved per tick, in [0, 0.25].
    pub speed: f32,
    /// Ticks run by one `step()`, in [1, 10000].
    pub ticks_per_step: usize,
}

impl Default for HeatParams {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            ticks_per_step: DEFAULT_TICKS_PER_STEP,
        }
    }
}

impl HeatParams {
    /// Reads `speed` and `ticks_per_step`, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            speed: param_f32(params, "speed", DEFAULT_SPEED, 0.0, MAX_SPEED),
            ticks_per_step: param_usize(
                params,
                "ticks_per_step",
                DEFAULT_TICKS_PER_STEP,
                1,
                MAX_TICKS_PER_STEP,
            ),
        }
    }
}

/// Heat conduction over a plate with fixed heaters.
#[derive(Debug, Clone)]
pub struct HeatTransfer {
    plate: Field,
    scratch: Field,
    heaters: Field,
    params: HeatParams,
}

impl HeatTransfer {
    /// Creates a plate with the reference heater layout scaled to `width x height`.
    ///
    /// The plate starts at the heater temperatures plus a warm block in the
    /// lower-left corner that is free to cool.
    pub fn new(width: usize, height: usize, params: HeatParams) -> Result<Self, VizError> {
        let heaters = reference_heaters(width, height)?;
        let mut plate = heaters.clone();
        for y in 0..height {
            for x in 0..width {
                let (rx, ry) = to_reference(x, y, width, height);
                if ry >= 800 && rx < 200 {
                    plate.set(x, y, MAX_TEMP);
                }
            }
        }
        Self::from_fields(plate, heaters, params)
    }

    /// Creates an engine from an explicit starting plate and heater map.
    /// Heater cells are the non-zero cells of `heaters`.
    pub fn from_fields(plate: Field, heaters: Field, params: HeatParams) -> Result<Self, VizError> {
        if plate.grid() != heaters.grid() {
            return Err(VizError::DimensionMismatch {
                lhs_w: plate.width(),
                lhs_h: plate.height(),
                rhs_w: heaters.width(),
                rhs_h: heaters.height(),
            });
        }
        let scratch = Field::new(plate.width(), plate.height())?;
        Ok(Self {
            plate,
            scratch,
            heaters,
            params,
        })
    }

    /// Creates an engine from a JSON params object. `seed` is unused; the
    /// layout is fixed.
    pub fn from_json(
        width: usize,
        height: usize,
        _seed: u64,
        params: &Value,
    ) -> Result<Self, VizError> {
        Self::new(width, height, HeatParams::from_json(params))
    }

    /// The fixed heater map; zero cells are free.
    pub fn heaters(&self) -> &Field {
        &self.heaters
    }

    /// One conduction tick.
    pub fn tick(&mut self) {
        for (cell, &h) in self.plate.data_mut().iter_mut().zip(self.heaters.data()) {
            if h != 0.0 {
                *cell = h;
            }
        }

        let w = self.plate.width();
        let speed = self.params.speed;
        let src = &self.plate;
        self.scratch
            .data_mut()
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.iter_mut().enumerate() {
                    *out = blend(src, x as isize, y as isize, speed);
                }
            });

        std::mem::swap(&mut self.plate, &mut self.scratch);
    }
}

impl Engine for HeatTransfer {
    fn step(&mut self) -> Result<(), VizError> {
        for _ in 0..self.params.ticks_per_step {
            self.tick();
        }
        trace!("heat: {} ticks", self.params.ticks_per_step);
        Ok(())
    }

    fn field(&self) -> &Field {
        &self.plate
    }

    fn params(&self) -> Value {
        json!({
            "speed": self.params.speed,
            "ticks_per_step": self.params.ticks_per_step,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "speed": {
                "type": "number",
                "default": DEFAULT_SPEED,
                "min": 0.0,
                "max": MAX_SPEED,
                "description": "Fraction of the neighbor temperature difference moved per tick"
            },
            "ticks_per_step": {
                "type": "integer",
                "default": DEFAULT_TICKS_PER_STEP,
                "min": 1,
                "max": MAX_TICKS_PER_STEP,
                "description": "Conduction ticks per step()"
            }
        })
    }
}

/// Maps a plate cell to the 1024x1024 reference layout.
fn to_reference(x: usize, y: usize, width: usize, height: usize) -> (usize, usize) {
    (x * REFERENCE_DIM / width, y * REFERENCE_DIM / height)
}

/// Maps a reference coordinate onto a plate axis of length `dim`.
fn from_reference(r: usize, dim: usize) -> usize {
    r * dim / REFERENCE_DIM
}

/// The reference heater layout: a hot block, one lukewarm point, three cold
/// points and a cold block.
fn reference_heaters(width: usize, height: usize) -> Result<Field, VizError> {
    let mut heaters = Field::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let (rx, ry) = to_reference(x, y, width, height);
            if rx > 300 && rx < 600 && ry > 310 && ry < 601 {
                heaters.set(x, y, MAX_TEMP);
            }
        }
    }

    let points = [
        (100, 100, (MAX_TEMP + MIN_TEMP) / 2.0),
        (100, 700, MIN_TEMP),
        (300, 300, MIN_TEMP),
        (700, 200, MIN_TEMP),
    ];
    for (rx, ry, temp) in points {
        heaters.set(from_reference(rx, width), from_reference(ry, height), temp);
    }

    for y in 0..height {
        for x in 0..width {
            let (rx, ry) = to_reference(x, y, width, height);
            if (400..500).contains(&rx) && (800..900).contains(&ry) {
                heaters.set(x, y, MIN_TEMP);
            }
        }
    }
    Ok(heaters)
}

/// Four-neighbor blend with border cells standing in for missing neighbors.
fn blend(src: &Field, x: isize, y: isize, speed: f32) -> f32 {
    let c = src.get_clamped(x, y);
    let top = src.get_clamped(x, y - 1);
    let bottom = src.get_clamped(x, y + 1);
    let left = src.get_clamped(x - 1, y);
    let right = src.get_clamped(x + 1, y);
    c + speed * (top + bottom + left + right - c * 4.0)
}
