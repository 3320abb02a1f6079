//! Formant filter — four parallel band-passes tuned to a vowel.
//!
//! Each band filters the *dry* input independently; the weighted band outputs
//! are summed, scaled by [`FORMANT_GAIN`], then blended with the dry signal.

use serde::{Deserialize, Serialize};

use super::filter::{BiquadCoefficients, BiquadFilter};
use crate::error::{check_input, Result};
use crate::math;

pub const FORMANT_COUNT: usize = 4;

/// Base Q per band, before spread widening.
pub const BAND_Q: [f32; FORMANT_COUNT] = [8.0, 12.0, 16.0, 20.0];

/// Output scale applied to the summed bands.
pub const FORMANT_GAIN: f32 = 0.5;
/// Band `i` is weighted by `1 - i * BAND_WEIGHT_STEP`.
pub const BAND_WEIGHT_STEP: f32 = 0.15;
/// Band `i` center is scaled by `1 + i * spread * BAND_SPREAD_STEP`.
pub const BAND_SPREAD_STEP: f32 = 0.2;
/// Every band's Q is scaled by `1 + spread * Q_SPREAD`.
pub const Q_SPREAD: f32 = 0.5;

/// Maps `peak ∈ [0, 1]` onto the five vowels without letting `1.0` overflow.
const PEAK_SCALE: f32 = 4.99;

/// Vowel formant frequencies (Hz), F1–F4.
const VOWEL_FORMANTS: [[f32; FORMANT_COUNT]; 5] = [
    [800.0, 1150.0, 2900.0, 3900.0], // ah
    [400.0, 1600.0, 2700.0, 3300.0], // eh
    [350.0, 1700.0, 2700.0, 3700.0], // ee
    [450.0, 800.0, 2830.0, 3800.0],  // oh
    [325.0, 700.0, 2530.0, 3500.0],  // oo
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vowel {
    Ah,
    Eh,
    Ee,
    Oh,
    Oo,
}

impl Vowel {
    pub const ALL: [Vowel; 5] = [Vowel::Ah, Vowel::Eh, Vowel::Ee, Vowel::Oh, Vowel::Oo];

    /// `floor(clamp(peak, 0, 1) * 4.99)`; NaN selects the first vowel.
    pub fn from_peak(peak: f32) -> Self {
        let peak = math::clamp(peak, 0.0, 1.0);
        let index = ((peak * PEAK_SCALE) as usize).min(Self::ALL.len() - 1);
        Self::ALL[index]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn formants(self) -> [f32; FORMANT_COUNT] {
        VOWEL_FORMANTS[self.index()]
    }
}

/// User-facing formant controls. Every field is clamped into `[0, 1]` before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormantParams {
    /// Vowel selector, `ah` at 0 through `oo` at 1.
    pub peak: f32,
    /// Dry/wet blend; 0 is the untouched input.
    pub mix: f32,
    /// Pushes the upper bands apart and narrows every band.
    pub spread: f32,
}

impl Default for FormantParams {
    fn default() -> Self {
        FormantParams {
            peak: 0.0,
            mix: 0.5,
            spread: 0.0,
        }
    }
}

impl FormantParams {
    pub fn clamped(self) -> Self {
        FormantParams {
            peak: math::clamp(self.peak, 0.0, 1.0),
            mix: math::clamp(self.mix, 0.0, 1.0),
            spread: math::clamp(self.spread, 0.0, 1.0),
        }
    }
}

/// Four band-pass cells tuned to one vowel.
#[derive(Debug, Clone)]
pub struct FormantBank {
    vowel: Vowel,
    bands: [BiquadFilter; FORMANT_COUNT],
}

impl FormantBank {
    pub fn new(vowel: Vowel, spread: f32, sample_rate: u32) -> Self {
        let frequencies = Self::band_frequencies(vowel, spread);
        let qs = Self::band_qs(spread);
        let bands = std::array::from_fn(|band| {
            BiquadFilter::new(BiquadCoefficients::bandpass(frequencies[band], qs[band], sample_rate))
        });
        FormantBank { vowel, bands }
    }

    pub fn vowel(&self) -> Vowel {
        self.vowel
    }

    pub fn band_frequencies(vowel: Vowel, spread: f32) -> [f32; FORMANT_COUNT] {
        let base = vowel.formants();
        std::array::from_fn(|band| base[band] * (1.0 + band as f32 * spread * BAND_SPREAD_STEP))
    }

    pub fn band_qs(spread: f32) -> [f32; FORMANT_COUNT] {
        BAND_Q.map(|q| q * (1.0 + spread * Q_SPREAD))
    }

    pub fn band_weight(band: usize) -> f32 {
        1.0 - band as f32 * BAND_WEIGHT_STEP
    }

    pub fn reset(&mut self) {
        for band in &mut self.bands {
            band.reset();
        }
    }

    /// Wet output for one input sample.
    pub fn process(&mut self, input: f32) -> f32 {
        let sum: f32 = self
            .bands
            .iter_mut()
            .enumerate()
            .map(|(band, filter)| filter.process(input) * Self::band_weight(band))
            .sum();
        sum * FORMANT_GAIN
    }
}

/// Apply the vowel filter to a mono buffer.
pub fn formant(samples: &[f32], params: FormantParams, sample_rate: u32) -> Result<Vec<f32>> {
    let samples = check_input(samples)?;
    let params = params.clamped();
    let vowel = Vowel::from_peak(params.peak);
    tracing::debug!(?vowel, mix = params.mix, spread = params.spread, "formant filter");

    let mut bank = FormantBank::new(vowel, params.spread, sample_rate);
    let dry = 1.0 - params.mix;
    Ok(samples
        .iter()
        .map(|&x| x * dry + bank.process(x) * params.mix)
        .collect())
}
