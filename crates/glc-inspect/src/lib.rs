//! Symbol-table inspection for binaries linked with the math compat shim.
//!
//! Reads ELF relocatable objects, `ar` archives, executables and shared
//! objects, and reports which shimmed names are defined where and which
//! glibc versions the file imports.

mod error;
mod report;
mod scan;
mod verify;

pub use error::{InspectError, Result};
pub use report::{DefinedSymbol, FileClass, Import, InspectionReport};
pub use scan::{inspect_bytes, inspect_path};
pub use verify::{Expectations, Finding, verify};
