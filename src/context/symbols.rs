use crate::error::{CalcError, Result};
use std::collections::HashMap;

/// Constants every session starts with, as five-decimal literals.
#[allow(clippy::approx_constant)]
pub const PREDEFINED_CONSTANTS: [(&str, f64); 2] = [("pi", 3.14159), ("e", 2.71828)];

#[derive(Debug, Copy, Clone, PartialEq)]
struct Symbol {
    value: f64,
    constant: bool,
}

/// Session variables and named constants, keyed by lower-case name.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolStore {
    symbols: HashMap<String, Symbol>,
}

impl Default for SymbolStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolStore {
    /// Creates a store seeded with [`PREDEFINED_CONSTANTS`].
    pub fn new() -> Self {
        let mut store = Self {
            symbols: HashMap::new(),
        };
        for (name, value) in PREDEFINED_CONSTANTS {
            store.define_constant(name, value);
        }
        store
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.symbols
            .get(&name.to_lowercase())
            .map(|symbol| symbol.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(&name.to_lowercase())
    }

    pub fn is_constant(&self, name: &str) -> bool {
        self.symbols
            .get(&name.to_lowercase())
            .is_some_and(|symbol| symbol.constant)
    }

    /// Implicitly declares `name` with value 0.0 unless it already exists.
    pub fn declare(&mut self, name: &str) {
        self.symbols
            .entry(name.to_lowercase())
            .or_insert(Symbol {
                value: 0.0,
                constant: false,
            });
    }

    /// Stores `value` under `name`, declaring it if needed. Constants are read-only.
    pub fn assign(&mut self, name: &str, value: f64) -> Result<()> {
        let symbol = self
            .symbols
            .entry(name.to_lowercase())
            .or_insert(Symbol {
                value: 0.0,
                constant: false,
            });
        if symbol.constant {
            return Err(CalcError::InvalidAssignmentTarget(format!(
                "'{}' is a constant",
                name
            )));
        }
        symbol.value = value;
        Ok(())
    }

    /// Adds a read-only symbol, replacing any variable of the same name.
    pub fn define_constant(&mut self, name: &str, value: f64) {
        self.symbols.insert(
            name.to_lowercase(),
            Symbol {
                value,
                constant: true,
            },
        );
    }

    /// Variables (not constants) currently defined, sorted by name.
    pub fn variables(&self) -> Vec<(&str, f64)> {
        let mut variables: Vec<(&str, f64)> = self
            .symbols
            .iter()
            .filter(|(_, symbol)| !symbol.constant)
            .map(|(name, symbol)| (name.as_str(), symbol.value))
            .collect();
        variables.sort_by(|a, b| a.0.cmp(b.0));
        variables
    }
}
