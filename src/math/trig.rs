//! Degree-based trigonometry without the platform math library.
//!
//! Sine is an odd 7th-order minimax polynomial evaluated on a quarter period;
//! cosine reuses it with a 90° shift. Tangent and cotangent use a [5/4] Padé
//! approximant on `[-45°, 45°]` and the complementary-angle identity outside it.

use super::{abs, fmod, is_nan, nan, DEG_TO_RAD, EPSILON};

// sin(x) ≈ x·(S1 + S3·x² + S5·x⁴ + S7·x⁶) on [-π/2, π/2], max error ≈ 6e-7.
const S1: f32 = 0.999_996_6;
const S3: f32 = -0.166_648_3;
const S5: f32 = 0.008_306_349;
const S7: f32 = -0.000_183_642_85;

/// Angular distance (degrees) from a pole inside which tangent/cotangent are undefined.
pub const POLE_TOLERANCE: f32 = 0.1;

/// Sine of an angle in degrees.
///
/// The angle is wrapped into `[0, 360)`, centered on `(-180, 180]` and folded
/// onto `[-90, 90]` before the polynomial is evaluated. Non-finite input
/// yields NaN.
pub fn sine(degrees: f32) -> f32 {
    let mut angle = fmod(degrees, 360.0);
    if is_nan(angle) {
        return nan();
    }
    if angle < 0.0 {
        angle += 360.0;
    }

    if angle > 180.0 {
        angle -= 360.0;
    }
    if angle > 90.0 {
        angle = 180.0 - angle;
    } else if angle < -90.0 {
        angle = -180.0 - angle;
    }

    // Exact at the crests.
    if angle == 90.0 {
        return 1.0;
    }
    if angle == -90.0 {
        return -1.0;
    }

    let x = angle * DEG_TO_RAD;
    let x2 = x * x;
    let value = x * (S1 + x2 * (S3 + x2 * (S5 + x2 * S7)));
    value.clamp(-1.0, 1.0)
}

/// Cosine of an angle in degrees, defined as `sine(degrees + 90)`.
pub fn cosine(degrees: f32) -> f32 {
    sine(degrees + 90.0)
}

/// Tangent of an angle in degrees.
///
/// NaN within [`POLE_TOLERANCE`] of an odd multiple of 90°, or when the
/// approximant's denominator collapses below [`EPSILON`].
pub fn tangent(degrees: f32) -> f32 {
    let angle = half_period(degrees);
    if is_nan(angle) || 90.0 - abs(angle) < POLE_TOLERANCE {
        return nan();
    }

    if abs(angle) <= 45.0 {
        let (num, den) = pade_tan(angle * DEG_TO_RAD);
        ratio(num, den)
    } else {
        // tan(a) = cot(±90 - a)
        let (num, den) = pade_tan(complement(angle) * DEG_TO_RAD);
        ratio(den, num)
    }
}

/// Cotangent of an angle in degrees.
///
/// NaN within [`POLE_TOLERANCE`] of a multiple of 180°, or when the
/// approximant's denominator collapses below [`EPSILON`].
pub fn cotangent(degrees: f32) -> f32 {
    let angle = half_period(degrees);
    if is_nan(angle) || abs(angle) < POLE_TOLERANCE {
        return nan();
    }

    if abs(angle) <= 45.0 {
        let (num, den) = pade_tan(angle * DEG_TO_RAD);
        ratio(den, num)
    } else {
        // cot(a) = tan(±90 - a)
        let (num, den) = pade_tan(complement(angle) * DEG_TO_RAD);
        ratio(num, den)
    }
}

/// Reduce to the half-period form `(-90, 90]`.
fn half_period(degrees: f32) -> f32 {
    let mut angle = fmod(degrees, 180.0);
    if is_nan(angle) {
        return nan();
    }
    if angle > 90.0 {
        angle -= 180.0;
    } else if angle <= -90.0 {
        angle += 180.0;
    }
    angle
}

/// Complementary angle on the same side of zero; maps `|a| ∈ (45, 90]` onto `[0, 45)`.
fn complement(angle: f32) -> f32 {
    if angle > 0.0 { 90.0 - angle } else { -90.0 - angle }
}

/// [5/4] Padé approximant of tan(x) as `(numerator, denominator)`, valid for |x| <= π/4.
fn pade_tan(x: f32) -> (f32, f32) {
    let x2 = x * x;
    let num = x * (945.0 - 105.0 * x2 + x2 * x2);
    let den = 945.0 - 420.0 * x2 + 15.0 * x2 * x2;
    (num, den)
}

fn ratio(num: f32, den: f32) -> f32 {
    if abs(den) < EPSILON {
        return nan();
    }
    num / den
}
