//! Scalar field to RGBA colorizer kernel.
//!
//! Every grid cell is shaded independently: the sample is read as HSL
//! lightness at full saturation, its hue is derived from the same sample,
//! and the three RGB channels come from [`hue_channel`]. Alpha is always
//! opaque.
//!
//! The output buffer is anything implementing [`PixelSink`]. Two layouts
//! ship with the crate:
//! - `[u8]`: interleaved bytes, pixel `i` at `i * 4 .. i * 4 + 4`
//! - `[Rgba]`: one packed struct per pixel
//!
//! Both run the same [`shade`] closure, so they agree channel for channel.

use crate::error::VizError;
use crate::grid::Grid;
use crate::hsl::{hue_angle, hue_channel, interpolation_constants};
use crate::pixel::{Rgba, CHANNELS};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Saturation used for every pixel.
const SATURATION: f32 = 1.0;

/// How a dispatch schedules its per-pixel work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dispatch {
    /// Spread pixels over the rayon thread pool.
    #[default]
    Parallel,
    /// Shade pixels in order on the calling thread.
    Serial,
}

/// An output buffer the colorizer can write whole pixels into.
///
/// Implementors split themselves into disjoint per-pixel slots, so no
/// synchronization is needed while `fill_pixels` runs.
pub trait PixelSink {
    /// Name used in logs and size errors.
    const LAYOUT: &'static str;

    /// Whole pixels this buffer can hold.
    fn pixel_capacity(&self) -> usize;

    /// Writes `shade(i)` into pixel slot `i` for every `i` in `0..count`.
    ///
    /// Panics if the buffer holds fewer than `count` pixels.
    fn fill_pixels<F>(&mut self, count: usize, dispatch: Dispatch, shade: F)
    where
        F: Fn(usize) -> Rgba + Sync + Send;
}

impl PixelSink for [u8] {
    const LAYOUT: &'static str = "flat";

    fn pixel_capacity(&self) -> usize {
        self.len() / CHANNELS
    }

    fn fill_pixels<F>(&mut self, count: usize, dispatch: Dispatch, shade: F)
    where
        F: Fn(usize) -> Rgba + Sync + Send,
    {
        let bytes = &mut self[..count * CHANNELS];
        let write = |(i, px): (usize, &mut [u8])| px.copy_from_slice(&shade(i).to_array());
        match dispatch {
            Dispatch::Parallel => bytes
                .par_chunks_exact_mut(CHANNELS)
                .enumerate()
                .for_each(write),
            Dispatch::Serial => bytes.chunks_exact_mut(CHANNELS).enumerate().for_each(write),
        }
    }
}

impl PixelSink for [Rgba] {
    const LAYOUT: &'static str = "packed";

    fn pixel_capacity(&self) -> usize {
        self.len()
    }

    fn fill_pixels<F>(&mut self, count: usize, dispatch: Dispatch, shade: F)
    where
        F: Fn(usize) -> Rgba + Sync + Send,
    {
        let pixels = &mut self[..count];
        let write = |(i, px): (usize, &mut Rgba)| *px = shade(i);
        match dispatch {
            Dispatch::Parallel => pixels.par_iter_mut().enumerate().for_each(write),
            Dispatch::Serial => pixels.iter_mut().enumerate().for_each(write),
        }
    }
}

impl<T> PixelSink for Vec<T>
where
    [T]: PixelSink,
{
    const LAYOUT: &'static str = <[T] as PixelSink>::LAYOUT;

    fn pixel_capacity(&self) -> usize {
        self.as_slice().pixel_capacity()
    }

    fn fill_pixels<F>(&mut self, count: usize, dispatch: Dispatch, shade: F)
    where
        F: Fn(usize) -> Rgba + Sync + Send,
    {
        self.as_mut_slice().fill_pixels(count, dispatch, shade)
    }
}

/// Colors one scalar sample.
pub fn shade(l: f32) -> Rgba {
    let (m1, m2) = interpolation_constants(l, SATURATION);
    let h = hue_angle(l);
    Rgba {
        r: hue_channel(m1, m2, h + 120),
        g: hue_channel(m1, m2, h),
        b: hue_channel(m1, m2, h - 120),
        a: u8::MAX,
    }
}

/// Colors a `width x height` field into `out` using the parallel dispatch.
///
/// `input` must hold at least `width * height` samples and `out` at least
/// as many pixels. Sizes are not validated up front; an undersized buffer
/// panics on its slice bound. Use [`try_float_to_color`] for a checked call.
pub fn float_to_color<S>(out: &mut S, input: &[f32], width: usize, height: usize)
where
    S: PixelSink + ?Sized,
{
    float_to_color_with(out, input, width, height, Dispatch::Parallel)
}

/// [`float_to_color`] with an explicit scheduling mode.
pub fn float_to_color_with<S>(
    out: &mut S,
    input: &[f32],
    width: usize,
    height: usize,
    dispatch: Dispatch,
) where
    S: PixelSink + ?Sized,
{
    let count = width * height;
    debug!(
        "float_to_color: {width}x{height} grid, {} layout, {dispatch:?}",
        S::LAYOUT
    );
    let input = &input[..count];
    out.fill_pixels(count, dispatch, |offset| shade(input[offset]));
}

/// Validating variant of [`float_to_color_with`].
///
/// Returns `VizError::InvalidDimensions` for an empty grid and
/// `VizError::BufferTooSmall` when either buffer cannot cover it.
pub fn try_float_to_color<S>(
    out: &mut S,
    input: &[f32],
    width: usize,
    height: usize,
    dispatch: Dispatch,
) -> Result<(), VizError>
where
    S: PixelSink + ?Sized,
{
    let grid = Grid::new(width, height)?;
    if input.len() < grid.len() {
        return Err(VizError::BufferTooSmall {
            buffer: "field",
            needed: grid.len(),
            got: input.len(),
        });
    }
    if out.pixel_capacity() < grid.len() {
        return Err(VizError::BufferTooSmall {
            buffer: S::LAYOUT,
            needed: grid.len(),
            got: out.pixel_capacity(),
        });
    }
    float_to_color_with(out, input, width, height, dispatch);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_LIGHTNESS: [f32; 6] = [0.0, 0.25, 0.5, 0.500_000_1, 0.75, 1.0];

    fn flat(input: &[f32], width: usize, height: usize) -> Vec<u8> {
        let mut out = vec![0u8; width * height * CHANNELS];
        float_to_color(&mut out, input, width, height);
        out
    }

    fn packed(input: &[f32], width: usize, height: usize) -> Vec<Rgba> {
        let mut out = vec![Rgba::default(); width * height];
        float_to_color(&mut out, input, width, height);
        out
    }

    #[test]
    fn alpha_is_opaque_for_reference_lightness() {
        for &l in &REFERENCE_LIGHTNESS {
            let bytes = flat(&[l; 12], 4, 3);
            for (i, px) in bytes.chunks_exact(CHANNELS).enumerate() {
                assert_eq!(px[3], 255, "alpha at pixel {i} for l={l}");
            }
        }
    }

    #[test]
    fn zero_lightness_is_black() {
        assert_eq!(shade(0.0), Rgba::new(0, 0, 0, 255));
    }

    #[test]
    fn full_lightness_is_white() {
        assert_eq!(shade(1.0), Rgba::new(255, 255, 255, 255));
    }

    #[test]
    fn half_lightness_is_pure_red() {
        // h = 0, m1 = 0, m2 = 1: red at 120 is the plateau, green ramps from 0,
        // blue wraps to 240 and takes the n1 tail.
        assert_eq!(shade(0.5), Rgba::new(255, 0, 0, 255));
    }

    #[test]
    fn quarter_and_three_quarter_lightness() {
        // l = 0.25: h = 270, m1 = 0, m2 = 0.5
        assert_eq!(shade(0.25), Rgba::new(63, 0, 127, 255));
        // l = 0.75: h = 90, m1 = 0.5, m2 = 1
        assert_eq!(shade(0.75), Rgba::new(191, 255, 127, 255));
    }

    #[test]
    fn flat_layout_writes_channels_at_offset_times_four() {
        let input = [0.0, 0.5, 1.0, 0.25];
        let bytes = flat(&input, 2, 2);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 255]);
        assert_eq!(&bytes[4..8], &[255, 0, 0, 255]);
        assert_eq!(&bytes[8..12], &[255, 255, 255, 255]);
        assert_eq!(&bytes[12..16], &[63, 0, 127, 255]);
    }

    #[test]
    fn layouts_agree_channel_for_channel() {
        let input: Vec<f32> = (0..96).map(|i| i as f32 / 95.0).collect();
        let bytes = flat(&input, 12, 8);
        let pixels = packed(&input, 12, 8);
        for (offset, px) in pixels.iter().enumerate() {
            assert_eq!(
                &bytes[offset * CHANNELS..offset * CHANNELS + CHANNELS],
                &px.to_array(),
                "layouts differ at offset {offset}"
            );
        }
    }

    #[test]
    fn repeated_dispatch_is_byte_identical() {
        let input: Vec<f32> = (0..256).map(|i| (i as f32 * 0.37).fract()).collect();
        assert_eq!(flat(&input, 16, 16), flat(&input, 16, 16));
    }

    #[test]
    fn serial_and_parallel_dispatch_match() {
        let input: Vec<f32> = (0..300).map(|i| (i as f32 * 0.013).sin().abs()).collect();
        let mut serial = vec![0u8; 300 * CHANNELS];
        let mut parallel = vec![0u8; 300 * CHANNELS];
        float_to_color_with(&mut serial, &input, 20, 15, Dispatch::Serial);
        float_to_color_with(&mut parallel, &input, 20, 15, Dispatch::Parallel);
        assert_eq!(serial, parallel);
    }

    #[test]
    fn oversized_output_is_left_untouched_past_the_grid() {
        let mut out = vec![7u8; 5 * CHANNELS];
        float_to_color(&mut out, &[0.0; 4], 2, 2);
        assert_eq!(&out[16..], &[7, 7, 7, 7]);
    }

    #[test]
    fn out_of_range_samples_do_not_panic() {
        let input = [-1.0, 2.0, f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 1e30];
        let pixels = packed(&input, 3, 2);
        assert!(pixels.iter().all(|p| p.a == 255));
    }

    #[test]
    #[should_panic]
    fn undersized_pixel_buffer_panics_without_checked_entry() {
        let mut out = vec![0u8; 3 * CHANNELS];
        float_to_color(&mut out, &[0.5; 4], 2, 2);
    }

    #[test]
    fn checked_entry_reports_short_field() {
        let mut out = vec![Rgba::default(); 4];
        let err = try_float_to_color(&mut out, &[0.5; 3], 2, 2, Dispatch::Serial).unwrap_err();
        assert!(matches!(
            err,
            VizError::BufferTooSmall {
                buffer: "field",
                needed: 4,
                got: 3
            }
        ));
    }

    #[test]
    fn checked_entry_reports_short_pixel_buffer() {
        let mut out = vec![0u8; 15];
        let err = try_float_to_color(&mut out, &[0.5; 4], 2, 2, Dispatch::Serial).unwrap_err();
        assert!(matches!(
            err,
            VizError::BufferTooSmall {
                buffer: "flat",
                needed: 4,
                got: 3
            }
        ));
    }

    #[test]
    fn checked_entry_rejects_empty_grid() {
        let mut out: Vec<Rgba> = Vec::new();
        assert!(matches!(
            try_float_to_color(&mut out, &[], 0, 3, Dispatch::Parallel),
            Err(VizError::InvalidDimensions)
        ));
    }

    #[test]
    fn dispatch_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Dispatch::Serial).unwrap(), "\"serial\"");
        let d: Dispatch = serde_json::from_str("\"parallel\"").unwrap();
        assert_eq!(d, Dispatch::Parallel);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn uniform_field_gives_uniform_image(
                w in 1_usize..24,
                h in 1_usize..24,
                l in 0.0_f32..=1.0,
            ) {
                let pixels = packed(&vec![l; w * h], w, h);
                let first = pixels[0];
                prop_assert!(pixels.iter().all(|&p| p == first));
                prop_assert_eq!(first, shade(l));
            }

            #[test]
            fn every_pixel_matches_its_own_sample(
                samples in proptest::collection::vec(0.0_f32..=1.0, 1..200),
            ) {
                let n = samples.len();
                let bytes = flat(&samples, n, 1);
                for (i, &l) in samples.iter().enumerate() {
                    prop_assert_eq!(&bytes[i * CHANNELS..i * CHANNELS + CHANNELS], &shade(l).to_array()[..]);
                }
            }

            #[test]
            fn alpha_is_opaque_for_any_sample(l in proptest::num::f32::ANY) {
                prop_assert_eq!(shade(l).a, 255);
            }
        }
    }
}
