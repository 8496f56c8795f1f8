//! Inspects this test binary's own symbol table.

use glc_compat::link::{ALIASES_EXPORTED, LINK_BACKEND, LINK_BASELINE};
use glc_compat::{__glc_log2_wrapper, __glc_pow_wrapper, __glc_powf_wrapper};
use glc_inspect::{Expectations, inspect_path, verify};
use glc_symver::Backend;

#[cfg(glc_export_aliases)]
fn call_through_canonical_names() -> (f64, f64, f32) {
    unsafe extern "C" {
        fn pow(x: f64, y: f64) -> f64;
        fn log2(x: f64) -> f64;
        fn powf(x: f32, y: f32) -> f32;
    }
    // SAFETY: the aliases have the wrappers' C signatures.
    unsafe { (pow(2.0, 10.0), log2(8.0), powf(4.0, 0.5)) }
}

#[cfg(not(glc_export_aliases))]
fn call_through_canonical_names() -> (f64, f64, f32) {
    (
        __glc_pow_wrapper(2.0, 10.0),
        __glc_log2_wrapper(8.0),
        __glc_powf_wrapper(4.0, 0.5),
    )
}

#[test]
fn canonical_names_reach_the_wrappers() {
    assert_eq!(call_through_canonical_names(), (1024.0, 3.0, 2.0));
}

#[test]
fn linked_binary_binds_aliases_to_wrappers() {
    if !ALIASES_EXPORTED {
        return;
    }
    // Keep every wrapper referenced so none is collected by the linker.
    let _ = call_through_canonical_names();
    let _ = (
        __glc_pow_wrapper as extern "C" fn(f64, f64) -> f64,
        __glc_log2_wrapper as extern "C" fn(f64) -> f64,
        __glc_powf_wrapper as extern "C" fn(f32, f32) -> f32,
    );

    let exe = std::env::current_exe().expect("current exe");
    let report = inspect_path(&exe).expect("inspect test binary");
    if report.defined.is_empty() {
        // Stripped binary; nothing to check.
        return;
    }

    let findings = verify(
        &report,
        &Expectations {
            require_aliases: true,
            ..Expectations::default()
        },
    );
    assert!(findings.is_empty(), "{findings:?}");
}

#[test]
fn linked_binary_imports_only_the_legacy_versions() {
    if LINK_BACKEND != Backend::LegacyGlibc {
        return;
    }
    let _ = call_through_canonical_names();
    let baseline = LINK_BASELINE.expect("legacy backend has a baseline");

    let exe = std::env::current_exe().expect("current exe");
    let report = inspect_path(&exe).expect("inspect test binary");
    for name in ["pow", "log2", "powf"] {
        for import in report.imports_of(name) {
            assert_eq!(
                import.version,
                Some(baseline),
                "{name} imported as {}",
                import.symbol
            );
        }
    }
}

#[test]
fn aliases_stay_out_of_the_dynamic_symbol_table() {
    if !ALIASES_EXPORTED {
        return;
    }
    assert_eq!(call_through_canonical_names(), (1024.0, 3.0, 2.0));

    let exe = std::env::current_exe().expect("current exe");
    let report = inspect_path(&exe).expect("inspect test binary");
    for name in ["pow", "log2", "powf"] {
        assert!(
            !report.exports(name),
            "{name} is in .dynsym and would satisfy its own legacy import"
        );
    }
}
