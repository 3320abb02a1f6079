//! Numeric primitives for the generators and filter designs.
//!
//! Every angle in this module is in **degrees**. Undefined results (division by
//! zero, trigonometric poles, degenerate windows) are reported by returning the
//! quiet-NaN sentinel from [`nan`]; callers test for it with [`is_nan`]. Nothing
//! here panics or returns a `Result`.

pub mod trig;
pub mod window;

pub use trig::{cosine, cotangent, sine, tangent};
pub use window::hann;

pub const PI: f32 = std::f32::consts::PI;
pub const TWO_PI: f32 = std::f32::consts::TAU;
pub const DEG_TO_RAD: f32 = PI / 180.0;

/// Smallest denominator magnitude accepted by the rational approximations.
pub const EPSILON: f32 = 1e-6;

/// IEEE-754 single precision quiet NaN: sign 0, exponent all ones, top mantissa bit set.
pub const NAN_BITS: u32 = 0x7FC0_0000;

/// The "undefined result" sentinel.
#[inline]
pub const fn nan() -> f32 {
    f32::from_bits(NAN_BITS)
}

#[inline]
pub fn is_nan(value: f32) -> bool {
    value.is_nan()
}

/// Truncating remainder of `x / y`, carrying the sign of `x`.
///
/// The result is exact for every finite `x`: the divisor is scaled by powers
/// of two and subtracted from the top down, and each subtraction has operands
/// within a factor of two of each other. Returns NaN when `y == 0`, when `y`
/// is NaN, or when `x` is not finite.
pub fn fmod(x: f32, y: f32) -> f32 {
    if y == 0.0 || is_nan(y) || !x.is_finite() {
        return nan();
    }
    let divisor = abs(y);
    let mut rem = abs(x);
    if rem >= divisor {
        // Largest divisor·2^k not above rem.
        let mut step = divisor;
        while step <= rem * 0.5 {
            step *= 2.0;
        }
        while step >= divisor {
            if rem >= step {
                rem -= step;
            }
            step *= 0.5;
        }
    }
    if x.is_sign_negative() { -rem } else { rem }
}

pub fn abs(value: f32) -> f32 {
    if is_nan(value) {
        return nan();
    }
    if value < 0.0 { -value } else { value }
}

/// Smaller of two values; NaN if either is NaN. Ties return `a`.
pub fn min(a: f32, b: f32) -> f32 {
    if is_nan(a) || is_nan(b) {
        return nan();
    }
    if b < a { b } else { a }
}

/// Clamp `value` into `[lo, hi]`. NaN input stays NaN.
pub fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    if is_nan(value) {
        return nan();
    }
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}
