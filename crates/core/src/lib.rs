#![deny(unsafe_code)]
//! Core types for simviz, shared by the simulation demos.
//!
//! The centerpiece is [`kernel::float_to_color`], a data-parallel colorizer
//! that maps a scalar [`Field`] through HSL into RGBA, writing either a flat
//! byte buffer or packed [`Rgba`] pixels. Around it sit the host-side
//! helpers the demos share: the [`Engine`] trait, runtime status checks
//! that carry source locations, seeded filler buffers, and a small
//! start/join/cancel wrapper over OS threads.

pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod grid;
pub mod hsl;
pub mod kernel;
pub mod params;
pub mod pixel;
pub mod prng;
pub mod random;
pub mod status;
pub mod thread;

pub use config::RunConfig;
pub use engine::Engine;
pub use error::VizError;
pub use field::Field;
pub use grid::Grid;
pub use kernel::{float_to_color, float_to_color_with, try_float_to_color, Dispatch, PixelSink};
pub use pixel::Rgba;
pub use prng::Xorshift64;
pub use thread::{cancel_all, join_all, start_thread, CancelToken, HostThread};
