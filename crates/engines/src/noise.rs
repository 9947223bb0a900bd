//! White-noise engine for previewing the colorizer.
//!
//! Every step redraws the whole field from the seeded filler generator, so
//! frame `n` of a given seed is always the same image.

use serde_json::{json, Value};
use simviz_core::error::VizError;
use simviz_core::field::Field;
use simviz_core::prng::Xorshift64;
use simviz_core::random::random_block;
use simviz_core::Engine;

/// Field of independent samples in `[0, 1]`, quantized to 1/255.
pub struct Noise {
    field: Field,
    rng: Xorshift64,
}

impl Noise {
    pub fn new(width: usize, height: usize, seed: u64) -> Result<Self, VizError> {
        let mut noise = Self {
            field: Field::new(width, height)?,
            rng: Xorshift64::new(seed),
        };
        noise.redraw()?;
        Ok(noise)
    }

    fn redraw(&mut self) -> Result<(), VizError> {
        let bytes = random_block(self.field.data().len(), &mut self.rng)?;
        for (cell, b) in self.field.data_mut().iter_mut().zip(bytes) {
            *cell = f32::from(b) / 255.0;
        }
        Ok(())
    }
}

impl Engine for Noise {
    fn step(&mut self) -> Result<(), VizError> {
        self.redraw()
    }

    fn field(&self) -> &Field {
        &self.field
    }

    fn params(&self) -> Value {
        json!({})
    }

    fn param_schema(&self) -> Value {
        json!({})
    }
}
