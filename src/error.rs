use thiserror::Error;

/// Rejected generator or filter call.
///
/// Numeric trouble inside a valid call (a tangent pole, a degenerate window)
/// is not an error: it shows up as NaN samples in the returned buffer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResonixError {
    #[error("duration must be at least one second, got {0}")]
    InvalidDuration(u32),

    #[error("{name} must be a positive finite frequency, got {value}")]
    InvalidFrequency { name: &'static str, value: f32 },

    #[error("input buffer is empty")]
    EmptyInput,

    #[error("unknown waveform shape '{0}'")]
    UnknownShape(String),

    #[error("{0} samples do not fit in a WAV data chunk")]
    WavTooLarge(usize),
}

pub type Result<T, E = ResonixError> = std::result::Result<T, E>;

/// Reject non-positive and non-finite frequency-like parameters.
pub(crate) fn check_frequency(name: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        tracing::warn!(name, value, "rejecting frequency parameter");
        Err(ResonixError::InvalidFrequency { name, value })
    }
}

pub(crate) fn check_input(samples: &[f32]) -> Result<&[f32]> {
    if samples.is_empty() {
        tracing::warn!("rejecting empty input buffer");
        return Err(ResonixError::EmptyInput);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_check_rejects_non_positive() {
        assert!(check_frequency("cutoff_hz", 440.0).is_ok());
        assert_eq!(
            check_frequency("cutoff_hz", 0.0),
            Err(ResonixError::InvalidFrequency { name: "cutoff_hz", value: 0.0 })
        );
        assert!(check_frequency("cutoff_hz", -1.0).is_err());
        assert!(check_frequency("cutoff_hz", f32::NAN).is_err());
        assert!(check_frequency("cutoff_hz", f32::INFINITY).is_err());
    }

    #[test]
    fn messages_name_the_parameter() {
        let err = ResonixError::InvalidFrequency { name: "bandwidth_hz", value: -3.0 };
        assert_eq!(err.to_string(), "bandwidth_hz must be a positive finite frequency, got -3");
        assert_eq!(ResonixError::EmptyInput.to_string(), "input buffer is empty");
    }
}
