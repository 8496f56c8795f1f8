use serde::Serialize;

use crate::error::{Result, SymverError};
use crate::version::GlibcVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    Single,
    Double,
}

/// A libm entry point the shim re-exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShimmedSymbol {
    pub name: &'static str,
    pub wrapper: &'static str,
    pub precision: Precision,
    pub arity: usize,
    /// The version at which glibc made a new default for this symbol.
    pub introduced: GlibcVersion,
}

impl ShimmedSymbol {
    /// Name of the undefined symbol the wrapper calls, renamed by `.symver`.
    pub fn legacy_import(&self) -> String {
        format!("__glc_legacy_{}", self.name)
    }
}

pub const SHIMMED_SYMBOLS: &[ShimmedSymbol] = &[
    ShimmedSymbol {
        name: "pow",
        wrapper: "__glc_pow_wrapper",
        precision: Precision::Double,
        arity: 2,
        introduced: GlibcVersion::new(2, 29),
    },
    ShimmedSymbol {
        name: "log2",
        wrapper: "__glc_log2_wrapper",
        precision: Precision::Double,
        arity: 1,
        introduced: GlibcVersion::new(2, 29),
    },
    ShimmedSymbol {
        name: "powf",
        wrapper: "__glc_powf_wrapper",
        precision: Precision::Single,
        arity: 2,
        introduced: GlibcVersion::new(2, 27),
    },
];

/// Looks up a shimmed symbol by canonical or wrapper name.
pub fn shimmed_symbol(name: &str) -> Option<&'static ShimmedSymbol> {
    SHIMMED_SYMBOLS
        .iter()
        .find(|sym| sym.name == name || sym.wrapper == name)
}

/// Oldest glibc version node exported for `arch` (a `CARGO_CFG_TARGET_ARCH` value).
///
/// `powerpc64` is split on endianness because little-endian ports started at 2.17.
pub fn baseline_for_arch(arch: &str, little_endian: bool) -> Result<GlibcVersion> {
    let version = match arch {
        "x86_64" => GlibcVersion::with_patch(2, 2, 5),
        "x86" | "i386" | "i586" | "i686" => GlibcVersion::new(2, 0),
        "aarch64" => GlibcVersion::new(2, 17),
        "arm" => GlibcVersion::new(2, 4),
        "powerpc" => GlibcVersion::new(2, 0),
        "powerpc64" if little_endian => GlibcVersion::new(2, 17),
        "powerpc64" => GlibcVersion::new(2, 3),
        "s390x" => GlibcVersion::new(2, 2),
        "sparc64" => GlibcVersion::new(2, 2),
        "mips" | "mips64" => GlibcVersion::new(2, 0),
        "riscv64" => GlibcVersion::new(2, 27),
        "loongarch64" => GlibcVersion::new(2, 36),
        other => return Err(SymverError::UnknownArchitecture(other.to_string())),
    };
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_two_release_lines() {
        let pow = shimmed_symbol("pow").unwrap();
        let log2 = shimmed_symbol("log2").unwrap();
        let powf = shimmed_symbol("powf").unwrap();
        assert_eq!(pow.introduced, GlibcVersion::new(2, 29));
        assert_eq!(log2.introduced, pow.introduced);
        assert_eq!(powf.introduced, GlibcVersion::new(2, 27));
        assert_eq!(powf.precision, Precision::Single);
    }

    #[test]
    fn resolves_by_wrapper_name() {
        let sym = shimmed_symbol("__glc_log2_wrapper").unwrap();
        assert_eq!(sym.name, "log2");
        assert_eq!(sym.arity, 1);
        assert_eq!(sym.legacy_import(), "__glc_legacy_log2");
        assert!(shimmed_symbol("exp").is_none());
    }

    #[test]
    fn baselines_follow_architecture() {
        assert_eq!(
            baseline_for_arch("x86_64", true).unwrap().to_string(),
            "GLIBC_2.2.5"
        );
        assert_eq!(
            baseline_for_arch("aarch64", true).unwrap().to_string(),
            "GLIBC_2.17"
        );
        assert_eq!(
            baseline_for_arch("powerpc64", false).unwrap().to_string(),
            "GLIBC_2.3"
        );
        assert_eq!(
            baseline_for_arch("powerpc64", true).unwrap().to_string(),
            "GLIBC_2.17"
        );
        assert_eq!(
            baseline_for_arch("wasm32", true),
            Err(SymverError::UnknownArchitecture("wasm32".to_string()))
        );
    }
}
