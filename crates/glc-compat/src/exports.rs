//! C-ABI wrapper symbols and the `pow`/`log2`/`powf` aliases bound to them.
//!
//! The aliases are `.set` to the wrappers, which must be defined in the same
//! object, so both live in this module.

#[cfg(glc_export_aliases)]
std::arch::global_asm!(include_str!(concat!(env!("OUT_DIR"), "/aliases.s")));

#[unsafe(no_mangle)]
#[inline(never)]
pub extern "C" fn __glc_pow_wrapper(x: f64, y: f64) -> f64 {
    crate::wrappers::pow_wrapper(x, y)
}

#[unsafe(no_mangle)]
#[inline(never)]
pub extern "C" fn __glc_log2_wrapper(x: f64) -> f64 {
    crate::wrappers::log2_wrapper(x)
}

#[unsafe(no_mangle)]
#[inline(never)]
pub extern "C" fn __glc_powf_wrapper(x: f32, y: f32) -> f32 {
    crate::wrappers::powf_wrapper(x, y)
}
