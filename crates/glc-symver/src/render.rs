//! Turns a [`ShimConfig`] into the directives the shim is assembled with.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::config::{Backend, ENV_EXPORT_ALIASES, ShimConfig};
use crate::error::{Result, SymverError};
use crate::symbols::{SymbolBinding, VersionedSymbol};
use crate::table::{SHIMMED_SYMBOLS, ShimmedSymbol, baseline_for_arch, shimmed_symbol};
use crate::version::GlibcVersion;

/// The resolved binding decisions for one build of the shim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkPlan {
    pub backend: Backend,
    /// Version node the wrappers forward to. Always set for [`Backend::LegacyGlibc`].
    pub baseline: Option<GlibcVersion>,
    pub export_aliases: bool,
    pub symbols: &'static [ShimmedSymbol],
}

impl LinkPlan {
    pub fn resolve(config: &ShimConfig) -> Result<Self> {
        let backend = config.backend_override.unwrap_or(if config.is_glibc() {
            Backend::LegacyGlibc
        } else {
            Backend::Portable
        });

        let baseline = match config.baseline_override {
            Some(version) => Some(version),
            None => match backend {
                Backend::LegacyGlibc => Some(baseline_for_arch(
                    &config.target_arch,
                    config.little_endian,
                )?),
                Backend::Portable => {
                    baseline_for_arch(&config.target_arch, config.little_endian).ok()
                }
            },
        };

        let export_aliases = config
            .export_aliases
            .unwrap_or(backend == Backend::LegacyGlibc);
        if export_aliases && !config.is_elf() {
            return Err(SymverError::InvalidSetting {
                key: ENV_EXPORT_ALIASES.to_string(),
                value: format!("aliases need an ELF target, got {}", config.target_os),
            });
        }
        if backend == Backend::LegacyGlibc && !config.is_elf() {
            return Err(SymverError::InvalidSetting {
                key: crate::config::ENV_BACKEND.to_string(),
                value: format!(
                    "legacy glibc forwarding needs an ELF target, got {}",
                    config.target_os
                ),
            });
        }

        Ok(Self {
            backend,
            baseline,
            export_aliases,
            symbols: SHIMMED_SYMBOLS,
        })
    }

    /// The versioned libm symbol a wrapper forwards to, e.g. `pow@GLIBC_2.2.5`.
    pub fn legacy_target(&self, name: &str) -> Result<VersionedSymbol> {
        let symbol = shimmed_symbol(name).ok_or_else(|| SymverError::NotShimmed(name.to_string()))?;
        let baseline = self
            .baseline
            .ok_or_else(|| SymverError::UnknownArchitecture("unresolved baseline".to_string()))?;
        Ok(VersionedSymbol::with_tag(
            symbol.name,
            &baseline.to_string(),
            SymbolBinding::Hidden,
        ))
    }

    /// `.globl`/`.hidden`/`.set` directives binding each canonical name to its wrapper.
    ///
    /// The aliases are hidden: an exported unversioned `pow` would satisfy the
    /// wrappers' own `pow@GLIBC_<baseline>` import at load time.
    pub fn render_alias_asm(&self) -> String {
        let mut out = String::new();
        for symbol in self.symbols {
            let _ = writeln!(out, ".globl {}", symbol.name);
            let _ = writeln!(out, ".hidden {}", symbol.name);
            let _ = writeln!(out, ".set {}, {}", symbol.name, symbol.wrapper);
        }
        out
    }

    /// `.symver` directives renaming each legacy import to the baseline node.
    pub fn render_forwarding_asm(&self) -> Result<String> {
        let mut out = String::new();
        for symbol in self.symbols {
            let target = self.legacy_target(symbol.name)?;
            let _ = writeln!(out, ".symver {}, {target}", symbol.legacy_import());
        }
        Ok(out)
    }

    /// A GNU ld version script declaring the new default version nodes.
    ///
    /// Nodes are emitted oldest first, each inheriting from the previous one.
    pub fn render_version_script(&self) -> String {
        let mut nodes = BTreeMap::<GlibcVersion, Vec<&'static str>>::new();
        for symbol in self.symbols {
            nodes.entry(symbol.introduced).or_default().push(symbol.name);
        }

        let mut out = String::new();
        let mut parent: Option<GlibcVersion> = None;
        for (version, mut names) in nodes {
            names.sort_unstable();
            if parent.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "{version} {{");
            out.push_str("  global:\n");
            for name in names {
                let _ = writeln!(out, "    {name};");
            }
            match parent {
                Some(parent) => {
                    let _ = writeln!(out, "}} {parent};");
                }
                None => out.push_str("};\n"),
            }
            parent = Some(version);
        }
        out
    }

    /// Rust source with the plan as constants, for `include!` from build output.
    pub fn render_manifest(&self) -> String {
        let backend = match self.backend {
            Backend::LegacyGlibc => "Backend::LegacyGlibc",
            Backend::Portable => "Backend::Portable",
        };
        let baseline = match self.baseline {
            Some(GlibcVersion {
                major,
                minor,
                patch: Some(patch),
            }) => format!("Some(GlibcVersion::with_patch({major}, {minor}, {patch}))"),
            Some(GlibcVersion {
                major,
                minor,
                patch: None,
            }) => format!("Some(GlibcVersion::new({major}, {minor}))"),
            None => "None".to_string(),
        };

        let mut out = String::new();
        let _ = writeln!(out, "pub const LINK_BACKEND: Backend = {backend};");
        let _ = writeln!(out, "pub const LINK_BASELINE: Option<GlibcVersion> = {baseline};");
        let _ = writeln!(out, "pub const ALIASES_EXPORTED: bool = {};", self.export_aliases);
        out
    }
}
