use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::error::{Result, SymverError};
use crate::version::GlibcVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolBinding {
    /// `pow`
    Unversioned,
    /// `pow@GLIBC_2.2.5`: a non-default (compat) version.
    Hidden,
    /// `pow@@GLIBC_2.29`: the default version new links bind to.
    Default,
}

/// A symbol name as it appears in ELF symbol tables or `.symver` directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionedSymbol {
    pub name: String,
    pub tag: Option<String>,
    pub binding: SymbolBinding,
}

impl VersionedSymbol {
    pub fn unversioned(name: &str) -> Self {
        Self {
            name: canonical_symbol(name),
            tag: None,
            binding: SymbolBinding::Unversioned,
        }
    }

    pub fn with_tag(name: &str, tag: &str, binding: SymbolBinding) -> Self {
        Self {
            name: canonical_symbol(name),
            tag: Some(tag.to_string()),
            binding,
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim().trim_end_matches('\0');
        let invalid = || SymverError::InvalidSymbol(raw.to_string());

        let (name, tag, binding) = match raw.split_once('@') {
            None => (raw, None, SymbolBinding::Unversioned),
            Some((name, rest)) => match rest.strip_prefix('@') {
                Some(tag) => (name, Some(tag), SymbolBinding::Default),
                None => (name, Some(rest), SymbolBinding::Hidden),
            },
        };

        let name = canonical_symbol(name);
        if name.is_empty() {
            return Err(invalid());
        }
        if let Some(tag) = tag {
            if tag.is_empty() || tag.contains('@') {
                return Err(invalid());
            }
        }

        Ok(Self {
            name,
            tag: tag.map(str::to_string),
            binding,
        })
    }

    /// The glibc version of the tag, when the tag is a `GLIBC_` node.
    pub fn glibc_version(&self) -> Option<GlibcVersion> {
        let tag = self.tag.as_deref()?;
        if !GlibcVersion::is_glibc_tag(tag) {
            return None;
        }
        GlibcVersion::parse(tag).ok()
    }
}

impl Display for VersionedSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.tag, self.binding) {
            (Some(tag), SymbolBinding::Default) => write!(f, "{}@@{tag}", self.name),
            (Some(tag), _) => write!(f, "{}@{tag}", self.name),
            (None, _) => f.write_str(&self.name),
        }
    }
}

pub fn canonical_symbol(name: &str) -> String {
    name.trim()
        .trim_end_matches('\0')
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_' || *ch == '.')
        .collect()
}
