use std::collections::BTreeMap;
use std::sync::Arc;

use glc_symver::{Precision, SHIMMED_SYMBOLS, ShimmedSymbol, VersionedSymbol, canonical_symbol};
use thiserror::Error;

use crate::wrappers::{log2_wrapper, pow_wrapper, powf_wrapper};

pub type Result<T> = std::result::Result<T, ShimError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShimError {
    #[error("routine not registered: {symbol}")]
    RoutineNotRegistered { symbol: String },

    #[error("invalid argument count for {symbol}: expected {expected}, got {got}")]
    InvalidArgumentCount {
        symbol: String,
        expected: usize,
        got: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimSpec {
    pub symbol: String,
    pub wrapper: String,
    pub precision: Precision,
    pub expected_args: usize,
}

impl From<&ShimmedSymbol> for ShimSpec {
    fn from(symbol: &ShimmedSymbol) -> Self {
        Self {
            symbol: symbol.name.to_string(),
            wrapper: symbol.wrapper.to_string(),
            precision: symbol.precision,
            expected_args: symbol.arity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineHandle {
    pub symbol: String,
}

/// Single-precision routines receive arguments narrowed to `f32`.
pub type ScalarRoutine = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync + 'static>;

/// Dispatches math routines by C symbol name.
///
/// Lookups accept the canonical name (`pow`), the wrapper symbol
/// (`__glc_pow_wrapper`) or a versioned spelling (`pow@@GLIBC_2.29`).
#[derive(Default)]
pub struct ShimRegistry {
    routines: BTreeMap<String, (ShimSpec, ScalarRoutine)>,
}

impl ShimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the three shimmed routines.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for symbol in SHIMMED_SYMBOLS {
            let routine: ScalarRoutine = match symbol.name {
                "pow" => Arc::new(|args: &[f64]| pow_wrapper(args[0], args[1])),
                "log2" => Arc::new(|args: &[f64]| log2_wrapper(args[0])),
                "powf" => Arc::new(|args: &[f64]| {
                    f64::from(powf_wrapper(args[0] as f32, args[1] as f32))
                }),
                _ => continue,
            };
            registry.register(ShimSpec::from(symbol), routine);
        }
        registry
    }

    pub fn register(&mut self, spec: ShimSpec, routine: ScalarRoutine) -> RoutineHandle {
        let canonical = canonical_symbol(&spec.symbol);
        let spec = ShimSpec {
            symbol: canonical.clone(),
            ..spec
        };
        self.routines.insert(canonical.clone(), (spec, routine));
        RoutineHandle { symbol: canonical }
    }

    pub fn spec(&self, symbol: &str) -> Option<&ShimSpec> {
        let resolved = self.resolve_symbol(symbol)?;
        self.routines.get(&resolved).map(|entry| &entry.0)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &ShimSpec> {
        self.routines.values().map(|entry| &entry.0)
    }

    pub fn call(&self, symbol: &str, args: &[f64]) -> Result<f64> {
        let not_registered = || ShimError::RoutineNotRegistered {
            symbol: symbol.to_string(),
        };
        let resolved = self.resolve_symbol(symbol).ok_or_else(not_registered)?;
        let (spec, routine) = self.routines.get(&resolved).ok_or_else(not_registered)?;

        if args.len() != spec.expected_args {
            return Err(ShimError::InvalidArgumentCount {
                symbol: resolved,
                expected: spec.expected_args,
                got: args.len(),
            });
        }
        Ok(routine(args))
    }

    fn resolve_symbol(&self, symbol: &str) -> Option<String> {
        if self.routines.contains_key(symbol) {
            return Some(symbol.to_string());
        }

        let name = VersionedSymbol::parse(symbol).ok()?.name;
        if self.routines.contains_key(&name) {
            return Some(name);
        }

        self.routines
            .values()
            .find(|(spec, _)| spec.wrapper == name)
            .map(|(spec, _)| spec.symbol.clone())
    }
}
