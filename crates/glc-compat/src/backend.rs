//! The math the wrappers forward to.
//!
//! The `.symver` directives only rename references assembled into the same
//! object file, so the directives, the imports and their callers share a
//! module and the callers are never inlined elsewhere.

#[cfg(glc_legacy_glibc)]
pub(crate) use legacy::{log2, pow, powf};
#[cfg(not(glc_legacy_glibc))]
pub(crate) use portable::{log2, pow, powf};

#[cfg(glc_legacy_glibc)]
mod legacy {
    use std::arch::global_asm;

    // .symver __glc_legacy_<name>, <name>@GLIBC_<baseline>
    global_asm!(include_str!(concat!(env!("OUT_DIR"), "/forwarding.s")));

    #[link(name = "m")]
    unsafe extern "C" {
        #[link_name = "__glc_legacy_pow"]
        fn legacy_pow(x: f64, y: f64) -> f64;
        #[link_name = "__glc_legacy_log2"]
        fn legacy_log2(x: f64) -> f64;
        #[link_name = "__glc_legacy_powf"]
        fn legacy_powf(x: f32, y: f32) -> f32;
    }

    #[inline(never)]
    pub(crate) fn pow(x: f64, y: f64) -> f64 {
        // SAFETY: libm's pow reads only its arguments.
        unsafe { legacy_pow(x, y) }
    }

    #[inline(never)]
    pub(crate) fn log2(x: f64) -> f64 {
        // SAFETY: as above.
        unsafe { legacy_log2(x) }
    }

    #[inline(never)]
    pub(crate) fn powf(x: f32, y: f32) -> f32 {
        // SAFETY: as above.
        unsafe { legacy_powf(x, y) }
    }
}

#[cfg(not(glc_legacy_glibc))]
mod portable {
    #[inline]
    pub(crate) fn pow(x: f64, y: f64) -> f64 {
        libm::pow(x, y)
    }

    #[inline]
    pub(crate) fn log2(x: f64) -> f64 {
        libm::log2(x)
    }

    #[inline]
    pub(crate) fn powf(x: f32, y: f32) -> f32 {
        libm::powf(x, y)
    }
}

#[cfg(all(test, not(glc_legacy_glibc)))]
mod tests {
    #[test]
    fn portable_backend_matches_libm_crate() {
        assert_eq!(super::pow(3.0, 4.0), libm::pow(3.0, 4.0));
        assert_eq!(super::log2(1024.0), 10.0);
        assert_eq!(super::powf(4.0, 0.5), 2.0);
    }
}
