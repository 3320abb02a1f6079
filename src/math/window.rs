use super::{cosine, is_nan, nan};

/// Hann (raised cosine) window value at position `n` of a window spanning `len` points.
///
/// `0.5 * (1 - cos(360° * n / (len - 1)))`: zero at `n = 0` and `n = len - 1`,
/// one at the midpoint. NaN when `len <= 1` or either argument is NaN.
pub fn hann(n: f32, len: f32) -> f32 {
    if is_nan(n) || is_nan(len) || len <= 1.0 {
        return nan();
    }
    let degrees = 360.0 * n / (len - 1.0);
    0.5 * (1.0 - cosine(degrees))
}
