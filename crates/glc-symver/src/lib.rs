//! glibc symbol-version bookkeeping for the math compat shim.
//!
//! This crate provides:
//! - parsing and ordering of `GLIBC_x.y[.z]` version tags and `name@VER` symbols
//! - the table of shimmed math symbols and per-architecture baseline versions
//! - build configuration and rendering of `.symver`/alias directives and
//!   linker version scripts

mod config;
mod error;
mod render;
mod symbols;
mod table;
mod version;

pub use config::{Backend, ENV_BACKEND, ENV_BASELINE, ENV_EXPORT_ALIASES, ShimConfig};
pub use error::{Result, SymverError};
pub use render::LinkPlan;
pub use symbols::{SymbolBinding, VersionedSymbol, canonical_symbol};
pub use table::{
    Precision, SHIMMED_SYMBOLS, ShimmedSymbol, baseline_for_arch, shimmed_symbol,
};
pub use version::GlibcVersion;
