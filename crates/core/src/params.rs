//! Tolerant readers for engine parameters held in a `serde_json::Value`.
//!
//! Missing keys, wrong JSON types and out-of-range numbers all fall back or
//! clamp; a params object can never make engine construction fail.

use serde_json::Value;

/// Reads `params[name]` as `f32` clamped to `[min, max]`, or `default`.
///
/// Integers are accepted. NaN is not representable in JSON, so the clamp
/// always yields a finite value.
pub fn param_f32(params: &Value, name: &str, default: f32, min: f32, max: f32) -> f32 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .map(|v| (v as f32).clamp(min, max))
        .unwrap_or(default)
}

/// Reads `params[name]` as a non-negative integer clamped to `[min, max]`, or `default`.
pub fn param_usize(params: &Value, name: &str, default: usize, min: usize, max: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| usize::try_from(v).unwrap_or(usize::MAX).clamp(min, max))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f32_reads_floats_and_integers() {
        let params = json!({"speed": 0.125, "whole": 1});
        assert_eq!(param_f32(&params, "speed", 0.25, 0.0, 1.0), 0.125);
        assert_eq!(param_f32(&params, "whole", 0.25, 0.0, 1.0), 1.0);
    }

    #[test]
    fn param_f32_clamps_to_range() {
        let params = json!({"speed": 3.0, "neg": -1.0});
        assert_eq!(param_f32(&params, "speed", 0.1, 0.0, 0.25), 0.25);
        assert_eq!(param_f32(&params, "neg", 0.1, 0.0, 0.25), 0.0);
    }

    #[test]
    fn param_f32_falls_back_for_missing_or_mistyped() {
        let params = json!({"speed": "fast", "other": null});
        assert_eq!(param_f32(&params, "speed", 0.2, 0.0, 1.0), 0.2);
        assert_eq!(param_f32(&params, "other", 0.2, 0.0, 1.0), 0.2);
        assert_eq!(param_f32(&params, "absent", 0.2, 0.0, 1.0), 0.2);
        assert_eq!(param_f32(&json!("not an object"), "speed", 0.2, 0.0, 1.0), 0.2);
    }

    #[test]
    fn param_usize_reads_integers_within_bounds() {
        let params = json!({"ticks": 30, "zero": 0});
        assert_eq!(param_usize(&params, "ticks", 90, 1, 1000), 30);
        assert_eq!(param_usize(&params, "zero", 90, 1, 1000), 1);
    }

    #[test]
    fn param_usize_caps_huge_values() {
        let params = json!({"ticks": 1_000_000_000_000_u64});
        assert_eq!(param_usize(&params, "ticks", 90, 1, 10_000), 10_000);
    }

    #[test]
    fn param_usize_falls_back_for_floats_negatives_and_strings() {
        let params = json!({"a": 2.5, "b": -1, "c": "many"});
        assert_eq!(param_usize(&params, "a", 9, 1, 1000), 9);
        assert_eq!(param_usize(&params, "b", 9, 1, 1000), 9);
        assert_eq!(param_usize(&params, "c", 9, 1, 1000), 9);
        assert_eq!(param_usize(&params, "d", 9, 1, 1000), 9);
    }
}
