//! Field to pixel buffer conversion through the HSL colorizer.
//!
//! Always available (no feature gate) so callers that never write PNGs can
//! still get RGBA bytes.

use simviz_core::field::Field;
use simviz_core::kernel::{float_to_color_with, Dispatch};
use simviz_core::pixel::{Rgba, CHANNELS};

/// Colors `field` into interleaved RGBA bytes, `width * height * 4` long.
pub fn field_to_rgba(field: &Field, dispatch: Dispatch) -> Vec<u8> {
    let mut out = vec![0u8; field.data().len() * CHANNELS];
    float_to_color_with(&mut out, field.data(), field.width(), field.height(), dispatch);
    out
}

/// Colors `field` into packed pixels, one per cell.
pub fn field_to_pixels(field: &Field, dispatch: Dispatch) -> Vec<Rgba> {
    let mut out = vec![Rgba::default(); field.data().len()];
    float_to_color_with(&mut out, field.data(), field.width(), field.height(), dispatch);
    out
}
