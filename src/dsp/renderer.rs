//! WAV renderer — encodes a mono sample buffer as a 16-bit PCM WAV byte buffer.

use super::oscillator::{Oscillator, Waveform};
use crate::error::{ResonixError, Result};

const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// Generate `duration_secs` of `waveform`, starting at phase zero, and encode it as WAV.
pub fn render_wav(waveform: Waveform, duration_secs: u32, frequency: f32, sample_rate: u32) -> Result<Vec<u8>> {
    let mut osc = Oscillator::new(waveform, sample_rate);
    osc.frequency = frequency;
    let samples = osc.render(duration_secs)?;
    encode_wav(&samples, sample_rate)
}

/// Convert one sample to 16-bit PCM. Out-of-range values are clamped; NaN becomes silence.
pub fn to_pcm_i16(sample: f32) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Size in bytes of the data chunk for `sample_count` mono samples.
///
/// RIFF sizes are 32-bit, so the whole file (data plus the 36 header bytes
/// counted by the RIFF size field) must stay below 4 GiB.
pub fn data_chunk_size(sample_count: usize) -> Result<u32> {
    sample_count
        .checked_mul(BITS_PER_SAMPLE as usize / 8)
        .and_then(|bytes| u32::try_from(bytes).ok())
        .filter(|bytes| bytes.checked_add(36).is_some())
        .ok_or(ResonixError::WavTooLarge(sample_count))
}

/// Encode mono f32 samples to a WAV byte buffer (16-bit PCM).
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let byte_rate = sample_rate * CHANNELS as u32 * (BITS_PER_SAMPLE as u32 / 8);
    let block_align = CHANNELS * (BITS_PER_SAMPLE / 8);
    let data_size = data_chunk_size(samples.len()).inspect_err(|_| {
        tracing::warn!(samples = samples.len(), "buffer too large for a WAV file");
    })?;
    let file_size = 36 + data_size;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    buf.extend_from_slice(&CHANNELS.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        buf.extend_from_slice(&to_pcm_i16(sample).to_le_bytes());
    }

    Ok(buf)
}
