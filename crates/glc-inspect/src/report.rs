use glc_symver::{GlibcVersion, VersionedSymbol};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileClass {
    Relocatable,
    Archive,
    Executable,
    SharedObject,
    Other,
}

/// A global symbol with a definition in some section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinedSymbol {
    pub name: String,
    /// Archive member the symbol came from.
    pub member: Option<String>,
    pub section: Option<String>,
    pub address: u64,
}

impl DefinedSymbol {
    /// Two symbols alias when they sit at the same place in the same object.
    pub fn aliases(&self, other: &DefinedSymbol) -> bool {
        self.member == other.member
            && self.section == other.section
            && self.address == other.address
    }
}

/// An undefined symbol, with its version tag when one is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    pub symbol: VersionedSymbol,
    pub member: Option<String>,
    pub version: Option<GlibcVersion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectionReport {
    pub class: FileClass,
    pub defined: Vec<DefinedSymbol>,
    pub imports: Vec<Import>,
    /// Names a linked image offers to the dynamic linker.
    pub exported: Vec<String>,
    /// Highest `GLIBC_` version across all imports.
    pub max_required: Option<GlibcVersion>,
    /// Oldest glibc node for the file's machine, when it is a known glibc port.
    pub baseline: Option<GlibcVersion>,
}

impl InspectionReport {
    pub fn new(class: FileClass) -> Self {
        Self {
            class,
            defined: Vec::new(),
            imports: Vec::new(),
            exported: Vec::new(),
            max_required: None,
            baseline: None,
        }
    }

    pub fn defined(&self, name: &str) -> impl Iterator<Item = &DefinedSymbol> {
        self.defined.iter().filter(move |sym| sym.name == name)
    }

    pub fn exports(&self, name: &str) -> bool {
        self.exported.iter().any(|exported| exported == name)
    }

    pub fn imports_of(&self, name: &str) -> impl Iterator<Item = &Import> {
        self.imports.iter().filter(move |import| import.symbol.name == name)
    }

    pub(crate) fn push_import(&mut self, import: Import) {
        let duplicate = self
            .imports
            .iter()
            .any(|existing| existing.symbol == import.symbol && existing.member == import.member);
        if duplicate {
            return;
        }
        if let Some(version) = import.version {
            self.max_required = Some(self.max_required.map_or(version, |max| max.max(version)));
        }
        self.imports.push(import);
    }
}

#[cfg(test)]
mod tests {
    use glc_symver::SymbolBinding;

    use super::*;

    fn import(raw: &str) -> Import {
        let symbol = VersionedSymbol::parse(raw).unwrap();
        Import {
            version: symbol.glibc_version(),
            symbol,
            member: None,
        }
    }

    #[test]
    fn tracks_highest_required_version() {
        let mut report = InspectionReport::new(FileClass::Executable);
        report.push_import(import("memcpy@GLIBC_2.14"));
        report.push_import(import("pow@GLIBC_2.2.5"));
        report.push_import(import("_Unwind_Resume@GCC_3.0"));
        assert_eq!(report.max_required, Some(GlibcVersion::new(2, 14)));
        report.push_import(import("pow@GLIBC_2.29"));
        assert_eq!(report.max_required, Some(GlibcVersion::new(2, 29)));
    }

    #[test]
    fn drops_duplicate_imports() {
        let mut report = InspectionReport::new(FileClass::Relocatable);
        report.push_import(import("log2@GLIBC_2.2.5"));
        report.push_import(import("log2@GLIBC_2.2.5"));
        assert_eq!(report.imports_of("log2").count(), 1);
        assert_eq!(report.imports[0].symbol.binding, SymbolBinding::Hidden);
    }

    #[test]
    fn aliases_compare_location() {
        let wrapper = DefinedSymbol {
            name: "__glc_pow_wrapper".to_string(),
            member: Some("glc_compat.o".to_string()),
            section: Some(".text".to_string()),
            address: 0x40,
        };
        let alias = DefinedSymbol {
            name: "pow".to_string(),
            ..wrapper.clone()
        };
        assert!(alias.aliases(&wrapper));
        let elsewhere = DefinedSymbol {
            address: 0x80,
            ..alias
        };
        assert!(!elsewhere.aliases(&wrapper));
    }
}
