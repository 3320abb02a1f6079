//! Waveform generators.
//!
//! Every generator is a pure function of the sample index: the phase of sample
//! `i` is `f·i/sample_rate` cycles plus a fixed offset, so buffers of any
//! length can be produced without carrying state between calls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{check_frequency, ResonixError, Result};
use crate::math;

/// Supported waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
    Cosine,
    /// Not band-limited; NaN samples at the poles.
    Tangent,
    /// Not band-limited; NaN samples at the poles.
    Cotangent,
    /// Sine tone under a single Hann envelope spanning the whole buffer.
    Hann,
    /// One Hann pulse per cycle, shifted by the phase offset.
    PhasedHann,
}

impl Waveform {
    pub const ALL: [Waveform; 9] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Sawtooth,
        Waveform::Cosine,
        Waveform::Tangent,
        Waveform::Cotangent,
        Waveform::Hann,
        Waveform::PhasedHann,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Cosine => "cosine",
            Waveform::Tangent => "tangent",
            Waveform::Cotangent => "cotangent",
            Waveform::Hann => "hann",
            Waveform::PhasedHann => "phased_hann",
        }
    }

    /// Shapes whose phase is advanced by one sample's worth of phase
    /// (`2π·f / sample_rate`) when generated through the crate facade.
    /// The square family and the whole-buffer Hann envelope start at zero.
    pub fn uses_phase_increment(self) -> bool {
        matches!(
            self,
            Waveform::Sine
                | Waveform::Cosine
                | Waveform::Tangent
                | Waveform::Cotangent
                | Waveform::PhasedHann
        )
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = ResonixError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Waveform::ALL
            .into_iter()
            .find(|w| w.name() == wanted)
            .ok_or_else(|| ResonixError::UnknownShape(s.to_string()))
    }
}

/// Number of samples in `duration_secs` seconds, or `None` if it does not fit in memory.
pub fn sample_count(duration_secs: u32, sample_rate: u32) -> Option<usize> {
    (duration_secs as usize).checked_mul(sample_rate as usize)
}

/// A stateless tone generator.
#[derive(Debug, Clone)]
pub struct Oscillator {
    pub waveform: Waveform,
    pub frequency: f32,
    /// Phase offset in radians added to every sample's phase.
    pub phase_offset: f32,
    sample_rate: u32,
}

impl Oscillator {
    pub fn new(waveform: Waveform, sample_rate: u32) -> Self {
        Oscillator {
            waveform,
            frequency: 440.0,
            phase_offset: 0.0,
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Render `duration_secs` seconds of audio.
    pub fn render(&self, duration_secs: u32) -> Result<Vec<f32>> {
        if duration_secs == 0 {
            tracing::warn!(duration_secs, "rejecting zero-length generator call");
            return Err(ResonixError::InvalidDuration(duration_secs));
        }
        check_frequency("frequency", self.frequency)?;
        let total = sample_count(duration_secs, self.sample_rate)
            .ok_or(ResonixError::InvalidDuration(duration_secs))?;

        tracing::debug!(
            waveform = %self.waveform,
            frequency = self.frequency,
            total,
            "rendering waveform"
        );

        Ok((0..total).map(|i| self.sample_at(i, total)).collect())
    }

    /// Value of sample `index` in a buffer of `total` samples.
    pub fn sample_at(&self, index: usize, total: usize) -> f32 {
        let position = self.cycle_position(index);
        match self.waveform {
            Waveform::Sine => math::sine(360.0 * position),
            Waveform::Cosine => math::cosine(360.0 * position),
            Waveform::Tangent => math::tangent(360.0 * position),
            Waveform::Cotangent => math::cotangent(360.0 * position),
            Waveform::Square => square(position),
            Waveform::Triangle => triangle(position),
            Waveform::Sawtooth => sawtooth(position),
            Waveform::Hann => {
                math::sine(360.0 * position) * math::hann(index as f32, total as f32)
            }
            Waveform::PhasedHann => {
                let samples_per_cycle = self.sample_rate as f32 / self.frequency;
                math::hann(position * samples_per_cycle, samples_per_cycle)
            }
        }
    }

    /// Position within the current cycle, in `[0, 1)`.
    fn cycle_position(&self, index: usize) -> f32 {
        let cycles = self.frequency as f64 * index as f64 / self.sample_rate as f64
            + self.phase_offset as f64 / std::f64::consts::TAU;
        let position = cycles.rem_euclid(1.0) as f32;
        // Narrowing can round 0.99999999 up to 1.0.
        if position >= 1.0 { 0.0 } else { position }
    }
}

fn square(position: f32) -> f32 {
    if position < 0.5 { 1.0 } else { -1.0 }
}

/// -1 → +1 over the first half cycle, +1 → -1 over the second.
fn triangle(position: f32) -> f32 {
    if position < 0.5 {
        4.0 * position - 1.0
    } else {
        3.0 - 4.0 * position
    }
}

fn sawtooth(position: f32) -> f32 {
    2.0 * position - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn osc(waveform: Waveform, frequency: f32, sample_rate: u32) -> Oscillator {
        let mut o = Oscillator::new(waveform, sample_rate);
        o.frequency = frequency;
        o
    }

    #[test]
    fn buffer_length_is_duration_times_rate() {
        let out = osc(Waveform::Sine, 440.0, 44100).render(2).unwrap();
        assert_eq!(out.len(), 88200);
    }

    #[test]
    fn rejects_zero_duration_and_bad_frequency() {
        assert_eq!(
            osc(Waveform::Sine, 440.0, 44100).render(0),
            Err(ResonixError::InvalidDuration(0))
        );
        for f in [0.0, -10.0, f32::NAN] {
            let err = osc(Waveform::Square, f, 44100).render(1).unwrap_err();
            assert!(matches!(err, ResonixError::InvalidFrequency { name: "frequency", .. }));
        }
    }

    #[test]
    fn square_one_hertz_at_eight_samples() {
        let out = osc(Waveform::Square, 1.0, 8).render(1).unwrap();
        assert_eq!(out, vec![1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0]);
    }

    #[test]
    fn square_follows_phase_formula() {
        for (f, r) in [(2.0_f32, 8_u32), (3.0, 16), (440.0, 44100), (1000.0, 48000), (55.5, 22050)] {
            let out = osc(Waveform::Square, f, r).render(1).unwrap();
            for i in [0_usize, 1, 5, 17, 63, 101, 4000] {
                if i >= out.len() {
                    continue;
                }
                let p = (i as f64 * f as f64 / r as f64).rem_euclid(1.0) as f32;
                let expected = if p < 0.5 { 1.0 } else { -1.0 };
                assert_eq!(out[i], expected, "square f={f} r={r} i={i}");
            }
        }
    }

    #[test]
    fn triangle_and_sawtooth_shapes() {
        let tri = osc(Waveform::Triangle, 1.0, 8).render(1).unwrap();
        assert_eq!(tri, vec![-1.0, -0.5, 0.0, 0.5, 1.0, 0.5, 0.0, -0.5]);

        let saw = osc(Waveform::Sawtooth, 1.0, 8).render(1).unwrap();
        assert_eq!(saw, vec![-1.0, -0.75, -0.5, -0.25, 0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn sine_and_cosine_quadrants() {
        let sine = osc(Waveform::Sine, 1.0, 4).render(1).unwrap();
        assert_eq!(sine, vec![0.0, 1.0, 0.0, -1.0]);

        let cosine = osc(Waveform::Cosine, 1.0, 4).render(1).unwrap();
        assert_eq!(cosine, vec![1.0, 0.0, -1.0, 0.0]);
    }

    #[test]
    fn sine_range() {
        let out = osc(Waveform::Sine, 440.0, 44100).render(1).unwrap();
        assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn phase_offset_shifts_the_cycle() {
        let mut o = osc(Waveform::Sine, 1.0, 4);
        o.phase_offset = std::f32::consts::FRAC_PI_2;
        let out = o.render(1).unwrap();
        let expected = [1.0, 0.0, -1.0, 0.0];
        for (got, want) in out.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5, "got {got}, want {want}");
        }
    }

    #[test]
    fn tangent_keeps_nan_at_poles() {
        let out = osc(Waveform::Tangent, 1.0, 8).render(1).unwrap();
        assert!(math::is_nan(out[2]), "90° should be NaN");
        assert!(math::is_nan(out[6]), "270° should be NaN");
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 1.0).abs() < 1e-5);

        let cot = osc(Waveform::Cotangent, 1.0, 8).render(1).unwrap();
        assert!(math::is_nan(cot[0]));
        assert!(math::is_nan(cot[4]));
        assert!(cot[2].abs() < 1e-6);
    }

    #[test]
    fn hann_envelope_spans_whole_buffer() {
        let out = osc(Waveform::Hann, 25.0, 100).render(1).unwrap();
        assert_eq!(out[0], 0.0);
        assert_eq!(out[99], 0.0);
        let peak = out.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()));
        assert!(peak > 0.9, "envelope should open to near full scale, got {peak}");
        // First quarter of the buffer is quieter than the middle.
        let early = out[..10].iter().fold(0.0_f32, |acc, s| acc.max(s.abs()));
        assert!(early < 0.3, "envelope start should be quiet, got {early}");
    }

    #[test]
    fn phased_hann_repeats_every_cycle() {
        let out = osc(Waveform::PhasedHann, 10.0, 100).render(1).unwrap();
        for i in 0..90 {
            assert!((out[i] - out[i + 10]).abs() < 1e-4, "cycle mismatch at {i}");
            assert!((0.0..=1.0).contains(&out[i]), "out of range at {i}: {}", out[i]);
        }
        for start in (0..100).step_by(10) {
            assert!(out[start].abs() < 1e-5, "pulse should start at zero, got {}", out[start]);
        }
    }

    #[test]
    fn parses_shape_names() {
        assert_eq!("sine".parse::<Waveform>().unwrap(), Waveform::Sine);
        assert_eq!("PHASED_HANN".parse::<Waveform>().unwrap(), Waveform::PhasedHann);
        assert_eq!("phased-hann".parse::<Waveform>().unwrap(), Waveform::PhasedHann);
        assert_eq!(
            "noise".parse::<Waveform>(),
            Err(ResonixError::UnknownShape("noise".to_string()))
        );
        for w in Waveform::ALL {
            assert_eq!(w.to_string().parse::<Waveform>().unwrap(), w);
        }
    }

    #[test]
    fn phase_increment_applies_to_trig_family_only() {
        let shifted: Vec<Waveform> = Waveform::ALL
            .into_iter()
            .filter(|w| w.uses_phase_increment())
            .collect();
        assert_eq!(
            shifted,
            vec![
                Waveform::Sine,
                Waveform::Cosine,
                Waveform::Tangent,
                Waveform::Cotangent,
                Waveform::PhasedHann,
            ]
        );
    }

    #[test]
    fn serde_names_match_display() {
        let json = serde_json::to_string(&Waveform::PhasedHann).unwrap();
        assert_eq!(json, "\"phased_hann\"");
        let w: Waveform = serde_json::from_str("\"sawtooth\"").unwrap();
        assert_eq!(w, Waveform::Sawtooth);
    }
}
