//! The `Engine` trait implemented by every simulation that feeds the colorizer.
//!
//! The trait is object-safe so engines can be switched at runtime behind
//! `dyn Engine`.

use crate::error::VizError;
use crate::field::Field;
use serde_json::Value;

/// A step-based simulation producing a scalar [`Field`] nominally in [0, 1].
pub trait Engine {
    /// Advance the simulation by one step.
    fn step(&mut self) -> Result<(), VizError>;

    /// The scalar field the colorizer renders.
    fn field(&self) -> &Field;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing each parameter's type, range, and default.
    fn param_schema(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Counts steps into the first cell.
    struct Counter {
        field: Field,
    }

    impl Engine for Counter {
        fn step(&mut self) -> Result<(), VizError> {
            let next = self.field.get(0, 0) + 0.25;
            self.field.set(0, 0, next);
            Ok(())
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

    #[test]
    fn engine_is_usable_as_trait_object() {
        let mut engine: Box<dyn Engine> = Box::new(Counter {
            field: Field::new(2, 2).unwrap(),
        });
        engine.step().unwrap();
        engine.step().unwrap();
        assert_eq!(engine.field().get(0, 0), 0.5);
        assert_eq!(engine.params(), json!({}));
    }
}
