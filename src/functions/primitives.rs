//! Protected versions of the partial math functions used by expression trees.
//!
//! Every function here is total over finite inputs: domain violations map to a
//! fixed sentinel instead of NaN. The same table is mirrored by the JavaScript
//! helpers embedded in HTML reports, so the constants must not drift.

/// Magnitude below which a denominator (or cosine) counts as zero.
pub const ZERO_GUARD: f64 = 1e-9;

/// Value returned by `log`/`log10` for non-positive arguments.
pub const LOG_FLOOR: f64 = -10.0;

pub fn protected_div(a: f64, b: f64) -> f64 {
    if b.abs() < ZERO_GUARD {
        1.0
    } else {
        a / b
    }
}

pub fn safe_pow(base: f64, exponent: f64) -> f64 {
    // Negative base with a fractional exponent has no real result.
    if base < 0.0 && (exponent - exponent.round()).abs() > ZERO_GUARD {
        return 0.0;
    }
    let result = base.powf(exponent);
    if result.is_finite() {
        result
    } else {
        0.0
    }
}

pub fn safe_tan(x: f64) -> f64 {
    let cos = x.cos();
    if cos.abs() < ZERO_GUARD {
        0.0
    } else {
        x.sin() / cos
    }
}

pub fn safe_asin(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin()
}

pub fn safe_acos(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}

pub fn safe_log(x: f64) -> f64 {
    if x <= 0.0 {
        LOG_FLOOR
    } else {
        x.ln()
    }
}

pub fn safe_log10(x: f64) -> f64 {
    if x <= 0.0 {
        LOG_FLOOR
    } else {
        x.log10()
    }
}

pub fn safe_sqrt(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else {
        x.sqrt()
    }
}

/// `min` that keeps NaN, unlike `f64::min` which returns the other operand.
pub fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

pub fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}
