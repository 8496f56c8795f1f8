use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Result, SymverError};

const PREFIX: &str = "GLIBC_";

/// A glibc symbol version node such as `GLIBC_2.29` or `GLIBC_2.2.5`.
///
/// Ordering is numeric per component, so `GLIBC_2.2.5 < GLIBC_2.17`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlibcVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: Option<u16>,
}

impl GlibcVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self {
            major,
            minor,
            patch: None,
        }
    }

    pub const fn with_patch(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch: Some(patch),
        }
    }

    /// Accepts `GLIBC_2.29`, `2.29` and `2.2.5`.
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        let numeric = trimmed.strip_prefix(PREFIX).unwrap_or(trimmed);
        let invalid = || SymverError::InvalidVersion(tag.to_string());

        let mut parts = numeric.split('.');
        let major = parse_component(parts.next()).ok_or_else(invalid)?;
        let minor = parse_component(parts.next()).ok_or_else(invalid)?;
        let patch = match parts.next() {
            Some(raw) => Some(parse_component(Some(raw)).ok_or_else(invalid)?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            major,
            minor,
            patch,
        })
    }

    pub fn is_glibc_tag(tag: &str) -> bool {
        tag.starts_with(PREFIX)
    }
}

fn parse_component(raw: Option<&str>) -> Option<u16> {
    let raw = raw?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

impl Display for GlibcVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{PREFIX}{}.{}.{patch}", self.major, self.minor),
            None => write!(f, "{PREFIX}{}.{}", self.major, self.minor),
        }
    }
}

impl FromStr for GlibcVersion {
    type Err = SymverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for GlibcVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
