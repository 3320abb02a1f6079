//! DSP core — waveform generation and biquad filtering on mono f32 buffers.
//!
//! Every entry point takes its sample rate explicitly and returns a freshly
//! allocated buffer; filter state lives only for the duration of one call.

pub mod filter;
pub mod formant;
pub mod oscillator;
pub mod renderer;
