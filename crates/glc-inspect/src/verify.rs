use std::fmt::{Display, Formatter};

use glc_symver::{GlibcVersion, SHIMMED_SYMBOLS};
use serde::Serialize;
use tracing::warn;

use crate::report::InspectionReport;

/// What a file linked with the shim is expected to look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectations {
    /// Require `pow`, `log2` and `powf` to be defined at their wrapper addresses.
    pub require_aliases: bool,
    /// Highest glibc version any import may need.
    pub ceiling: Option<GlibcVersion>,
    /// Legacy node the wrappers forward to. Defaults to the report's baseline.
    pub baseline: Option<GlibcVersion>,
}

impl Default for Expectations {
    fn default() -> Self {
        Self {
            require_aliases: true,
            ceiling: None,
            baseline: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "finding", rename_all = "snake_case")]
pub enum Finding {
    AliasMissing {
        symbol: String,
    },
    AliasMismatch {
        symbol: String,
        wrapper: String,
    },
    /// The alias is in the dynamic symbol table, where it would satisfy the
    /// wrapper's own legacy import.
    AliasExported {
        symbol: String,
    },
    /// `version` is at or above the shim's cutoff, or above the configured ceiling.
    NewerVersionRequired {
        symbol: String,
        version: GlibcVersion,
        limit: GlibcVersion,
    },
}

impl Display for Finding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::AliasMissing { symbol } => write!(f, "{symbol} is not defined"),
            Finding::AliasMismatch { symbol, wrapper } => {
                write!(f, "{symbol} is defined but not bound to {wrapper}")
            }
            Finding::AliasExported { symbol } => {
                write!(f, "{symbol} is exported to the dynamic linker")
            }
            Finding::NewerVersionRequired {
                symbol,
                version,
                limit,
            } => write!(f, "{symbol} requires {version} (limit {limit})"),
        }
    }
}

/// Checks `report` against `expectations`. An empty result means verified.
pub fn verify(report: &InspectionReport, expectations: &Expectations) -> Vec<Finding> {
    let mut findings = Vec::new();
    let baseline = expectations.baseline.or(report.baseline);

    for shimmed in SHIMMED_SYMBOLS {
        if expectations.require_aliases {
            let wrappers: Vec<_> = report.defined(shimmed.wrapper).collect();
            let mut aliases = report.defined(shimmed.name).peekable();
            if aliases.peek().is_none() {
                findings.push(Finding::AliasMissing {
                    symbol: shimmed.name.to_string(),
                });
            } else if !aliases.any(|alias| wrappers.iter().any(|wrapper| alias.aliases(wrapper)))
            {
                findings.push(Finding::AliasMismatch {
                    symbol: shimmed.name.to_string(),
                    wrapper: shimmed.wrapper.to_string(),
                });
            }
            if report.exports(shimmed.name) {
                findings.push(Finding::AliasExported {
                    symbol: shimmed.name.to_string(),
                });
            }
        }

        // Ports whose oldest node postdates the cutoff only export that node.
        for import in report.imports_of(shimmed.name) {
            if let Some(version) = import.version {
                let at_baseline = baseline.is_some_and(|baseline| version <= baseline);
                if version >= shimmed.introduced && !at_baseline {
                    findings.push(Finding::NewerVersionRequired {
                        symbol: import.symbol.to_string(),
                        version,
                        limit: shimmed.introduced,
                    });
                }
            }
        }
    }

    if let Some(ceiling) = expectations.ceiling {
        for import in &report.imports {
            let Some(version) = import.version else { continue };
            let name = import.symbol.to_string();
            let already = findings.iter().any(|finding| {
                matches!(finding, Finding::NewerVersionRequired { symbol, .. } if *symbol == name)
            });
            if version > ceiling && !already {
                findings.push(Finding::NewerVersionRequired {
                    symbol: name,
                    version,
                    limit: ceiling,
                });
            }
        }
    }

    for finding in &findings {
        warn!(%finding, "verification finding");
    }
    findings
}
