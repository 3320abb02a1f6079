//! Biquad filter — RBJ Audio EQ Cookbook coefficients, Direct Form I.
//!
//! Coefficient design uses the degree-based primitives in [`crate::math`], so
//! the whole chain stays free of the platform math library.

use crate::error::{check_frequency, check_input, Result};
use crate::math;

/// Q of a maximally flat (Butterworth) second-order response.
pub const BUTTERWORTH_Q: f32 = 0.707;

/// Design frequencies are pulled down to this fraction of the sample rate.
pub const MAX_DESIGN_RATIO: f32 = 0.49;

/// Filter response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterType {
    Lowpass,
    Highpass,
    /// Constant 0 dB peak gain band-pass.
    Bandpass,
}

/// Biquad coefficients, already normalized by `a0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Pass-through: `y[n] = x[n]`.
    pub const IDENTITY: BiquadCoefficients = BiquadCoefficients {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Normalize raw cookbook terms by `a0`.
    pub fn from_raw(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        BiquadCoefficients {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Compute coefficients for `filter_type` at `frequency` Hz with quality `q`.
    ///
    /// Poles are not checked; Q in `[0.5, 10]` with a frequency below Nyquist
    /// gives a stable filter.
    pub fn design(filter_type: FilterType, frequency: f32, q: f32, sample_rate: u32) -> Self {
        let omega_degrees = design_angle(frequency, sample_rate);
        let cos_w0 = math::cosine(omega_degrees);
        let sin_w0 = math::sine(omega_degrees);
        let alpha = sin_w0 / (2.0 * q);

        let (b0, b1, b2) = match filter_type {
            FilterType::Lowpass => {
                let b1 = 1.0 - cos_w0;
                (b1 / 2.0, b1, b1 / 2.0)
            }
            FilterType::Highpass => {
                let b1 = -(1.0 + cos_w0);
                ((1.0 + cos_w0) / 2.0, b1, (1.0 + cos_w0) / 2.0)
            }
            FilterType::Bandpass => (alpha, 0.0, -alpha),
        };
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_w0;
        let a2 = 1.0 - alpha;

        let coefficients = Self::from_raw(b0, b1, b2, a0, a1, a2);
        tracing::debug!(?filter_type, frequency, q, ?coefficients, "designed biquad");
        coefficients
    }

    pub fn lowpass(cutoff_hz: f32, resonance: f32, sample_rate: u32) -> Self {
        Self::design(FilterType::Lowpass, cutoff_hz, resonance, sample_rate)
    }

    pub fn highpass(cutoff_hz: f32, resonance: f32, sample_rate: u32) -> Self {
        Self::design(FilterType::Highpass, cutoff_hz, resonance, sample_rate)
    }

    pub fn bandpass(center_hz: f32, q: f32, sample_rate: u32) -> Self {
        Self::design(FilterType::Bandpass, center_hz, q, sample_rate)
    }
}

/// Normalized angular frequency `ω = 360° · f / sample_rate`, in degrees.
fn design_angle(frequency: f32, sample_rate: u32) -> f32 {
    let sample_rate = sample_rate as f32;
    let frequency = math::min(frequency, MAX_DESIGN_RATIO * sample_rate);
    360.0 * frequency / sample_rate
}

/// Effective Q of a band-pass: `center / bandwidth`, boosted by `resonance / 0.707`
/// when `resonance` exceeds the Butterworth value.
pub fn bandpass_q(center_hz: f32, bandwidth_hz: f32, resonance: f32) -> f32 {
    let q = center_hz / bandwidth_hz;
    if resonance > BUTTERWORTH_Q {
        q * (resonance / BUTTERWORTH_Q)
    } else {
        q
    }
}

/// A second-order IIR cell: five coefficients and four history registers.
///
/// One instance filters exactly one mono stream.
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coefficients: BiquadCoefficients,

    // Direct Form I history
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Default for BiquadFilter {
    fn default() -> Self {
        Self::new(BiquadCoefficients::IDENTITY)
    }
}

impl BiquadFilter {
    pub fn new(coefficients: BiquadCoefficients) -> Self {
        BiquadFilter {
            coefficients,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coefficients
    }

    /// Replace the coefficients. History is kept; call [`reset`](Self::reset)
    /// before starting a new stream.
    pub fn set_coefficients(&mut self, coefficients: BiquadCoefficients) {
        self.coefficients = coefficients;
    }

    /// Zero the input and output history.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    /// Process a single sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coefficients;
        let output =
            c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;
        output
    }

    /// Filter a whole buffer into a new one.
    pub fn process_buffer(&mut self, input: &[f32]) -> Vec<f32> {
        input.iter().map(|&x| self.process(x)).collect()
    }
}

fn run(samples: &[f32], coefficients: BiquadCoefficients) -> Vec<f32> {
    let mut filter = BiquadFilter::new(coefficients);
    filter.process_buffer(samples)
}

/// Second-order resonant low-pass. `resonance` acts as Q.
pub fn lowpass(samples: &[f32], cutoff_hz: f32, resonance: f32, sample_rate: u32) -> Result<Vec<f32>> {
    let samples = check_input(samples)?;
    let cutoff_hz = check_frequency("cutoff_hz", cutoff_hz)?;
    Ok(run(samples, BiquadCoefficients::lowpass(cutoff_hz, resonance, sample_rate)))
}

/// Second-order resonant high-pass. `resonance` acts as Q.
pub fn highpass(samples: &[f32], cutoff_hz: f32, resonance: f32, sample_rate: u32) -> Result<Vec<f32>> {
    let samples = check_input(samples)?;
    let cutoff_hz = check_frequency("cutoff_hz", cutoff_hz)?;
    Ok(run(samples, BiquadCoefficients::highpass(cutoff_hz, resonance, sample_rate)))
}

/// Band-pass around `center_hz` with the given bandwidth; see [`bandpass_q`].
pub fn bandpass(
    samples: &[f32],
    center_hz: f32,
    bandwidth_hz: f32,
    resonance: f32,
    sample_rate: u32,
) -> Result<Vec<f32>> {
    let samples = check_input(samples)?;
    let center_hz = check_frequency("center_hz", center_hz)?;
    let bandwidth_hz = check_frequency("bandwidth_hz", bandwidth_hz)?;
    let q = bandpass_q(center_hz, bandwidth_hz, resonance);
    Ok(run(samples, BiquadCoefficients::bandpass(center_hz, q, sample_rate)))
}
