//! PNG rendering of a [`Field`] through the colorizer.
//!
//! Feature-gated behind `png` (default on) so builds without file output
//! skip the `image` crate. The pixel conversion lives in [`crate::pixel`].

use log::info;
use simviz_core::error::VizError;
use simviz_core::field::Field;
use simviz_core::kernel::Dispatch;
use simviz_core::status::check;
use std::path::Path;

use crate::pixel::field_to_rgba;

/// Colors `field` and writes it to `path` as an RGBA PNG.
///
/// Returns `VizError::InvalidDimensions` if the field dimensions overflow
/// `u32`, or `VizError::Status` if encoding or writing fails.
pub fn write_png(field: &Field, dispatch: Dispatch, path: &Path) -> Result<(), VizError> {
    let rgba = field_to_rgba(field, dispatch);
    let w = u32::try_from(field.width()).map_err(|_| VizError::InvalidDimensions)?;
    let h = u32::try_from(field.height()).map_err(|_| VizError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| VizError::Io("RGBA buffer size mismatch".into()))?;
    check(img.save(path))?;
    info!("wrote {}x{} png to {}", w, h, path.display());
    Ok(())
}
