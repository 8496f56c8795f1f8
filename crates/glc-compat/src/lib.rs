//! Drop-in `pow`, `log2` and `powf` for binaries that must load on older glibc.
//!
//! glibc 2.29 gave `pow` and `log2` new default versions, and glibc 2.27 did
//! the same for `powf`. Anything linked on a newer system records those
//! requirements. Linking this crate (as `rlib` or `libglc_compat.a`) defines
//! the three names inside the binary and forwards them to the oldest version
//! node the architecture exports, so the newer requirements never appear.
//!
//! On targets without glibc the wrappers forward to the `libm` crate and no
//! aliases are exported.

mod backend;
mod exports;
mod registry;
mod wrappers;

/// How this build binds its symbols, as decided by the build script.
pub mod link {
    use glc_symver::{Backend, GlibcVersion};

    include!(concat!(env!("OUT_DIR"), "/link_plan.rs"));

    /// The versioned libm symbol `name` forwards to, e.g. `pow@GLIBC_2.2.5`.
    pub fn legacy_target(name: &str) -> Option<String> {
        if LINK_BACKEND != Backend::LegacyGlibc {
            return None;
        }
        let baseline = LINK_BASELINE?;
        glc_symver::shimmed_symbol(name).map(|sym| format!("{}@{baseline}", sym.name))
    }

    /// The GNU ld version script declaring the new default version nodes.
    pub const VERSION_SCRIPT: &str = include_str!(concat!(env!("OUT_DIR"), "/glc_compat.map"));
}

pub use exports::{__glc_log2_wrapper, __glc_pow_wrapper, __glc_powf_wrapper};
pub use registry::{Result, RoutineHandle, ScalarRoutine, ShimError, ShimRegistry, ShimSpec};
pub use wrappers::{log2_wrapper, pow_wrapper, powf_wrapper};
