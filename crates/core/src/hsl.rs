//! HSL lightness/hue to RGB channel math used by the colorizer.
//!
//! Everything here is single precision and narrows with truncation, never
//! rounding or clamping: a channel value outside 0..=255 wraps modulo 256.

/// Degrees in one hue period.
const PERIOD: i32 = 360;

/// Evaluates one RGB channel from the HSL interpolation constants.
///
/// `hue` gets a single period of correction (`> 360` subtracts 360,
/// `< 0` adds 360). Inputs further out of range are not reduced again and
/// fall into whichever branch their value selects.
pub fn hue_channel(n1: f32, n2: f32, hue: i32) -> u8 {
    let hue = if hue > PERIOD {
        hue - PERIOD
    } else if hue < 0 {
        hue + PERIOD
    } else {
        hue
    };

    let v = if hue < 60 {
        255.0 * (n1 + (n2 - n1) * hue as f32 / 60.0)
    } else if hue < 180 {
        255.0 * n2
    } else if hue < 240 {
        255.0 * (n1 + (n2 - n1) * (240 - hue) as f32 / 60.0)
    } else {
        255.0 * n1
    };
    narrow(v)
}

/// Truncating float to byte narrowing: toward zero, then the low 8 bits.
fn narrow(v: f32) -> u8 {
    v as i32 as u8
}

/// Which lightness formula produced `m2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightnessBranch {
    /// `l <= 0.5`: `m2 = l * (1 + s)`.
    Lower,
    /// `l > 0.5`: `m2 = l + s - l * s`.
    Upper,
}

/// Selects the lightness formula for `l`. NaN selects `Upper`.
pub fn lightness_branch(l: f32) -> LightnessBranch {
    if l <= 0.5 {
        LightnessBranch::Lower
    } else {
        LightnessBranch::Upper
    }
}

/// Interpolation constants `(m1, m2)` for lightness `l` and saturation `s`.
pub fn interpolation_constants(l: f32, s: f32) -> (f32, f32) {
    let m2 = match lightness_branch(l) {
        LightnessBranch::Lower => l * (1.0 + s),
        LightnessBranch::Upper => l + s - l * s,
    };
    (2.0 * l - m2, m2)
}

/// Hue angle for lightness `l`: `(180 + trunc(360 l)) mod 360`.
///
/// The remainder keeps the sign of the dividend, so negative lightness gives
/// a negative hue.
pub fn hue_angle(l: f32) -> i32 {
    180_i32.wrapping_add((360.0 * l) as i32) % PERIOD
}
