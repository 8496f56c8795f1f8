//! Safe entry points. Results, including NaN and infinities, come straight
//! from the backend.

use crate::backend;

/// `x` raised to `y`, with the standard double-precision `pow` semantics.
#[inline]
pub fn pow_wrapper(x: f64, y: f64) -> f64 {
    backend::pow(x, y)
}

/// Base-2 logarithm: `-inf` at zero, NaN for negative or NaN input.
#[inline]
pub fn log2_wrapper(x: f64) -> f64 {
    backend::log2(x)
}

#[inline]
pub fn powf_wrapper(x: f32, y: f32) -> f32 {
    backend::powf(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow_exact_values() {
        assert_eq!(pow_wrapper(2.0, 10.0), 1024.0);
        assert_eq!(pow_wrapper(0.0, 0.0), 1.0);
        assert_eq!(pow_wrapper(9.0, 0.5), 3.0);
        assert_eq!(pow_wrapper(-2.0, 3.0), -8.0);
    }

    #[test]
    fn pow_special_cases() {
        assert!(pow_wrapper(-8.0, 1.0 / 3.0).is_nan());
        assert_eq!(pow_wrapper(f64::NAN, 0.0), 1.0);
        assert_eq!(pow_wrapper(1.0, f64::NAN), 1.0);
        assert!(pow_wrapper(f64::NAN, 2.0).is_nan());
        assert_eq!(pow_wrapper(0.0, -1.0), f64::INFINITY);
        assert_eq!(pow_wrapper(-0.0, -1.0), f64::NEG_INFINITY);
        assert_eq!(pow_wrapper(f64::INFINITY, -2.0), 0.0);
        assert_eq!(pow_wrapper(0.5, f64::INFINITY), 0.0);
    }

    #[test]
    fn log2_contract() {
        assert_eq!(log2_wrapper(1.0), 0.0);
        assert_eq!(log2_wrapper(8.0), 3.0);
        assert_eq!(log2_wrapper(0.0), f64::NEG_INFINITY);
        assert_eq!(log2_wrapper(-0.0), f64::NEG_INFINITY);
        assert!(log2_wrapper(-1.0).is_nan());
        assert!(log2_wrapper(f64::NAN).is_nan());
        assert_eq!(log2_wrapper(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn powf_single_precision() {
        let root2 = powf_wrapper(2.0, 0.5);
        assert!((root2 - 1.414_213_6_f32).abs() <= f32::EPSILON * 2.0);
        assert_eq!(powf_wrapper(3.0, 2.0), 9.0);
        assert!(powf_wrapper(-1.5, 0.5).is_nan());
    }
}
