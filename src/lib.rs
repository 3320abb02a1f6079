pub mod dsp;
pub mod error;
pub mod math;

pub use crate::dsp::filter::{BiquadCoefficients, BiquadFilter, FilterType};
pub use crate::dsp::formant::{FormantParams, Vowel};
pub use crate::dsp::oscillator::{Oscillator, Waveform};
pub use crate::error::{ResonixError, Result};

use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sample rate shared by every generator and filter call made through this module.
pub const SAMPLE_RATE: u32 = 44_100;

/// Butterworth Q, the default resonance for the pass filters.
pub const DEFAULT_RESONANCE: f32 = dsp::filter::BUTTERWORTH_Q;

/// Generate `duration_secs` seconds of `shape` at `frequency` Hz.
///
/// Output length is `duration_secs * SAMPLE_RATE`. Sine, cosine, tangent,
/// cotangent and Phased-Hann are shifted by one sample's worth of phase
/// (`2π·f / SAMPLE_RATE`); square, triangle, sawtooth and Hann start at zero.
pub fn generate(shape: Waveform, duration_secs: u32, frequency: f32) -> Result<Vec<f32>> {
    let mut osc = Oscillator::new(shape, SAMPLE_RATE);
    osc.frequency = frequency;
    if shape.uses_phase_increment() {
        osc.phase_offset = math::TWO_PI * frequency / SAMPLE_RATE as f32;
    }
    osc.render(duration_secs)
}

/// Low-pass `samples` at `cutoff_hz`; `resonance` is the Q ([`DEFAULT_RESONANCE`] is flat).
/// Cutoffs above `0.49 × SAMPLE_RATE` are pulled down to that limit.
pub fn lowpass(samples: &[f32], cutoff_hz: f32, resonance: f32) -> Result<Vec<f32>> {
    dsp::filter::lowpass(samples, cutoff_hz, resonance, SAMPLE_RATE)
}

/// High-pass `samples` at `cutoff_hz`, with the same Q and cutoff limit as [`lowpass`].
pub fn highpass(samples: &[f32], cutoff_hz: f32, resonance: f32) -> Result<Vec<f32>> {
    dsp::filter::highpass(samples, cutoff_hz, resonance, SAMPLE_RATE)
}

/// Band-pass around `center_hz`. Q is `center_hz / bandwidth_hz`, boosted when
/// `resonance` is above [`DEFAULT_RESONANCE`].
pub fn bandpass(samples: &[f32], center_hz: f32, bandwidth_hz: f32, resonance: f32) -> Result<Vec<f32>> {
    dsp::filter::bandpass(samples, center_hz, bandwidth_hz, resonance, SAMPLE_RATE)
}

/// Vowel formant filter. `peak`, `mix` and `spread` are clamped to `[0, 1]` first.
pub fn formant(samples: &[f32], params: FormantParams) -> Result<Vec<f32>> {
    dsp::formant::formant(samples, params, SAMPLE_RATE)
}

/// Generate a waveform and encode it as a mono 16-bit WAV file.
pub fn render_wav(shape: Waveform, duration_secs: u32, frequency: f32) -> Result<Vec<u8>> {
    let samples = generate(shape, duration_secs, frequency)?;
    dsp::renderer::encode_wav(&samples, SAMPLE_RATE)
}

fn to_js(e: ResonixError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-exposed: return the resonix version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: the fixed sample rate used by every call.
#[wasm_bindgen]
pub fn sample_rate() -> u32 {
    SAMPLE_RATE
}

/// WASM-exposed: generate samples for a shape name such as `"sine"` or `"phased_hann"`.
#[wasm_bindgen]
pub fn generate_samples(shape: &str, duration_secs: u32, frequency: f32) -> Result<Vec<f32>, JsValue> {
    let shape: Waveform = shape.parse().map_err(to_js)?;
    generate(shape, duration_secs, frequency).map_err(to_js)
}

#[wasm_bindgen]
pub fn lowpass_filter(samples: &[f32], cutoff_hz: f32, resonance: Option<f32>) -> Result<Vec<f32>, JsValue> {
    lowpass(samples, cutoff_hz, resonance.unwrap_or(DEFAULT_RESONANCE)).map_err(to_js)
}

#[wasm_bindgen]
pub fn highpass_filter(samples: &[f32], cutoff_hz: f32, resonance: Option<f32>) -> Result<Vec<f32>, JsValue> {
    highpass(samples, cutoff_hz, resonance.unwrap_or(DEFAULT_RESONANCE)).map_err(to_js)
}

#[wasm_bindgen]
pub fn bandpass_filter(
    samples: &[f32],
    center_hz: f32,
    bandwidth_hz: f32,
    resonance: Option<f32>,
) -> Result<Vec<f32>, JsValue> {
    bandpass(samples, center_hz, bandwidth_hz, resonance.unwrap_or(DEFAULT_RESONANCE)).map_err(to_js)
}

/// WASM-exposed: formant filter. `params` is an object like `{ peak, mix, spread }`;
/// missing fields take their defaults and `undefined` means all defaults.
#[wasm_bindgen]
pub fn formant_filter(samples: &[f32], params: JsValue) -> Result<Vec<f32>, JsValue> {
    let params: FormantParams = if params.is_undefined() || params.is_null() {
        FormantParams::default()
    } else {
        serde_wasm_bindgen::from_value(params).map_err(|e| JsValue::from_str(&format!("{e}")))?
    };
    formant(samples, params).map_err(to_js)
}

/// WASM-exposed: generate a waveform and return it as WAV bytes.
#[wasm_bindgen(js_name = renderWav)]
pub fn render_wav_js(shape: &str, duration_secs: u32, frequency: f32) -> Result<Vec<u8>, JsValue> {
    let shape: Waveform = shape.parse().map_err(to_js)?;
    render_wav(shape, duration_secs, frequency).map_err(to_js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_uses_process_sample_rate() {
        for shape in Waveform::ALL {
            let out = generate(shape, 1, 440.0).unwrap();
            assert_eq!(out.len(), SAMPLE_RATE as usize, "{shape}");
        }
    }

    #[test]
    fn generate_rejects_invalid_calls() {
        assert_eq!(generate(Waveform::Sine, 0, 440.0), Err(ResonixError::InvalidDuration(0)));
        assert!(generate(Waveform::Sine, 1, 0.0).is_err());
        assert!(generate(Waveform::Hann, 1, -440.0).is_err());
    }

    #[test]
    fn square_starts_at_phase_zero() {
        let out = generate(Waveform::Square, 1, 1.0).unwrap();
        assert_eq!(out[0], 1.0);
        assert_eq!(out[22049], 1.0);
        assert_eq!(out[22050], -1.0);
        assert_eq!(out[44099], -1.0);
    }

    #[test]
    fn trig_shapes_start_one_sample_in() {
        // 441 Hz → one sample is 3.6°.
        let cosine = generate(Waveform::Cosine, 1, 441.0).unwrap();
        assert!((cosine[0] - 0.998_027).abs() < 1e-4, "cosine[0] = {}", cosine[0]);

        let sine = generate(Waveform::Sine, 1, 441.0).unwrap();
        assert!((sine[0] - 0.062_790_5).abs() < 1e-4, "sine[0] = {}", sine[0]);

        let tangent = generate(Waveform::Tangent, 1, 441.0).unwrap();
        assert!((tangent[0] - 0.062_914_4).abs() < 1e-4, "tangent[0] = {}", tangent[0]);

        let cotangent = generate(Waveform::Cotangent, 1, 441.0).unwrap();
        assert!(!math::is_nan(cotangent[0]));
        assert!((cotangent[0] - 15.894_545).abs() < 1e-2, "cotangent[0] = {}", cotangent[0]);
    }

    #[test]
    fn square_family_and_hann_start_at_zero() {
        assert_eq!(generate(Waveform::Triangle, 1, 441.0).unwrap()[0], -1.0);
        assert_eq!(generate(Waveform::Sawtooth, 1, 441.0).unwrap()[0], -1.0);
        assert_eq!(generate(Waveform::Hann, 1, 441.0).unwrap()[0], 0.0);
    }

    #[test]
    fn phased_hann_is_shifted_by_one_sample() {
        // 441 Hz → exactly 100 samples per cycle.
        let out = generate(Waveform::PhasedHann, 1, 441.0).unwrap();
        let mut osc = Oscillator::new(Waveform::PhasedHann, SAMPLE_RATE);
        osc.frequency = 441.0;
        let unshifted = osc.render(1).unwrap();
        for i in 0..500 {
            assert!(
                (out[i] - unshifted[i + 1]).abs() < 1e-3,
                "sample {i}: {} vs {}",
                out[i],
                unshifted[i + 1]
            );
        }
    }

    #[test]
    fn filters_reject_empty_input() {
        assert_eq!(lowpass(&[], 1000.0, DEFAULT_RESONANCE), Err(ResonixError::EmptyInput));
        assert_eq!(highpass(&[], 1000.0, DEFAULT_RESONANCE), Err(ResonixError::EmptyInput));
        assert_eq!(bandpass(&[], 1000.0, 100.0, DEFAULT_RESONANCE), Err(ResonixError::EmptyInput));
        assert_eq!(formant(&[], FormantParams::default()), Err(ResonixError::EmptyInput));
    }

    #[test]
    fn generate_then_filter_pipeline() {
        let saw = generate(Waveform::Sawtooth, 1, 110.0).unwrap();
        let vowel = formant(&saw, FormantParams { peak: 0.1, mix: 1.0, spread: 0.0 }).unwrap();
        let smooth = lowpass(&vowel, 2000.0, DEFAULT_RESONANCE).unwrap();
        assert_eq!(smooth.len(), saw.len());
        assert!(smooth.iter().all(|s| s.is_finite()));
        assert!(smooth.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn render_wav_has_one_second_of_data() {
        let wav = render_wav(Waveform::Triangle, 1, 220.0).unwrap();
        assert_eq!(wav.len(), 44 + SAMPLE_RATE as usize * 2);
    }
}
