use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, SymverError};
use crate::version::GlibcVersion;

pub const ENV_BASELINE: &str = "GLC_GLIBC_BASELINE";
pub const ENV_BACKEND: &str = "GLC_BACKEND";
pub const ENV_EXPORT_ALIASES: &str = "GLC_EXPORT_ALIASES";

/// Where the wrapper bodies get their math from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Forward to the legacy version node of the system libm.
    LegacyGlibc,
    /// Forward to the pure-Rust `libm` crate.
    Portable,
}

impl Display for Backend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::LegacyGlibc => f.write_str("legacy"),
            Backend::Portable => f.write_str("portable"),
        }
    }
}

impl FromStr for Backend {
    type Err = SymverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "glibc" | "legacy-glibc" => Ok(Backend::LegacyGlibc),
            "portable" | "libm" => Ok(Backend::Portable),
            other => Err(SymverError::InvalidSetting {
                key: ENV_BACKEND.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Build-time inputs that decide how the shim binds its symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimConfig {
    pub target_arch: String,
    pub target_os: String,
    pub target_env: String,
    pub little_endian: bool,
    pub baseline_override: Option<GlibcVersion>,
    pub backend_override: Option<Backend>,
    pub export_aliases: Option<bool>,
}

impl ShimConfig {
    /// Reads cargo's `CARGO_CFG_TARGET_*` values and the `GLC_*` overrides
    /// through `lookup`, normally `|key| std::env::var(key).ok()`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let baseline_override = non_empty(ENV_BASELINE)
            .map(|raw| GlibcVersion::parse(&raw))
            .transpose()?;
        let backend_override = non_empty(ENV_BACKEND)
            .map(|raw| raw.parse::<Backend>())
            .transpose()?;
        let export_aliases = non_empty(ENV_EXPORT_ALIASES)
            .map(|raw| parse_flag(ENV_EXPORT_ALIASES, &raw))
            .transpose()?;

        Ok(Self {
            target_arch: lookup("CARGO_CFG_TARGET_ARCH").unwrap_or_default(),
            target_os: lookup("CARGO_CFG_TARGET_OS").unwrap_or_default(),
            target_env: lookup("CARGO_CFG_TARGET_ENV").unwrap_or_default(),
            little_endian: lookup("CARGO_CFG_TARGET_ENDIAN").as_deref() != Some("big"),
            baseline_override,
            backend_override,
            export_aliases,
        })
    }

    /// Configuration describing the machine this process runs on.
    pub fn host() -> Self {
        let target_env = if cfg!(target_env = "gnu") {
            "gnu"
        } else if cfg!(target_env = "musl") {
            "musl"
        } else {
            ""
        };
        Self {
            target_arch: std::env::consts::ARCH.to_string(),
            target_os: std::env::consts::OS.to_string(),
            target_env: target_env.to_string(),
            little_endian: cfg!(target_endian = "little"),
            baseline_override: None,
            backend_override: None,
            export_aliases: None,
        }
    }

    pub fn is_glibc(&self) -> bool {
        self.target_os == "linux" && self.target_env == "gnu"
    }

    /// `.globl`/`.set` aliases and `.symver` are only meaningful for ELF output.
    pub fn is_elf(&self) -> bool {
        !matches!(
            self.target_os.as_str(),
            "macos" | "ios" | "tvos" | "watchos" | "visionos" | "windows" | "uefi"
        ) && !self.target_arch.starts_with("wasm")
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SymverError::InvalidSetting {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}
