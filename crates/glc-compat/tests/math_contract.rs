use std::hint::black_box;

use glc_compat::link::{LINK_BACKEND, legacy_target};
use glc_compat::{log2_wrapper, pow_wrapper, powf_wrapper};
use glc_symver::Backend;

fn positive_inputs() -> Vec<(f64, f64)> {
    let bases = [1e-300, 1e-7, 0.3, 0.999_999, 1.0, 1.5, 2.0, 7.25, 1e5, 1e300];
    let exponents = [-310.5, -2.0, -0.5, 0.0, 0.333, 1.0, 2.5, 17.0, 1024.0];
    bases
        .iter()
        .flat_map(|&x| exponents.iter().map(move |&y| (x, y)))
        .collect()
}

#[test]
fn pow_matches_platform_reference_bit_for_bit() {
    if LINK_BACKEND != Backend::LegacyGlibc {
        return;
    }
    for (x, y) in positive_inputs() {
        let reference = black_box(x).powf(black_box(y));
        assert_eq!(
            pow_wrapper(x, y).to_bits(),
            reference.to_bits(),
            "pow({x}, {y})"
        );
    }
}

#[test]
fn pow_edge_cases() {
    assert_eq!(pow_wrapper(2.0, 10.0), 1024.0);
    assert_eq!(pow_wrapper(0.0, 0.0), 1.0);
    assert_eq!(pow_wrapper(f64::INFINITY, 0.0), 1.0);
    assert_eq!(pow_wrapper(-1.0, f64::INFINITY), 1.0);
    assert_eq!(pow_wrapper(2.0, f64::NEG_INFINITY), 0.0);
    assert_eq!(pow_wrapper(f64::NEG_INFINITY, 3.0), f64::NEG_INFINITY);
    assert_eq!(pow_wrapper(10.0, 400.0), f64::INFINITY);
    assert!(pow_wrapper(-2.0, 0.5).is_nan());
}

#[test]
fn log2_edge_cases() {
    assert_eq!(log2_wrapper(1.0), 0.0);
    assert_eq!(log2_wrapper(8.0), 3.0);
    assert_eq!(log2_wrapper(0.0), f64::NEG_INFINITY);
    assert!(log2_wrapper(-1.0).is_nan());
    assert!(log2_wrapper(f64::NAN).is_nan());
    assert_eq!(log2_wrapper(f64::MIN_POSITIVE), -1022.0);
    assert_eq!(log2_wrapper(f64::from_bits(1)), -1074.0);
}

#[test]
fn powf_is_single_precision() {
    let root2 = powf_wrapper(2.0, 0.5);
    assert!((root2 - 1.414_213_56_f32).abs() <= f32::EPSILON, "{root2}");
    assert_eq!(powf_wrapper(0.0, 0.0), 1.0);
    assert_eq!(powf_wrapper(2.0, 128.0), f32::INFINITY);
    assert!(powf_wrapper(-8.0, 1.0 / 3.0).is_nan());
}

#[test]
fn legacy_targets_name_the_baseline_node() {
    match LINK_BACKEND {
        Backend::LegacyGlibc => {
            let target = legacy_target("pow").expect("pow is forwarded");
            assert!(target.starts_with("pow@GLIBC_2."), "{target}");
            assert!(!target.contains("2.29"), "{target}");
            assert!(legacy_target("exp").is_none());
        }
        Backend::Portable => assert!(legacy_target("pow").is_none()),
    }
}
