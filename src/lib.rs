// ripple-engine - Water ripple refraction over a static image
//
// Pointer drops energize a signed height field; a finite-difference wave
// update spreads and damps them each tick, and every changed cell refracts
// the source image into the output pixel buffer.
//
// The simulation core is target-independent. On wasm32 the `web` module
// binds it to an HTML canvas; natively the img2ripple binary renders
// frames offline.

pub mod config;
pub mod error;
pub mod render;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::RippleConfig;
pub use error::RippleError;
pub use render::Refractor;
pub use sim::{HeightField, RippleWorld};
