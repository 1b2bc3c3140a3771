mod functions;
mod symbols;

pub use functions::*;
pub use symbols::*;

use crate::config::Config;
use crate::error::Result;

/// One evaluation session: its variables, its functions and its settings.
///
/// Every pipeline stage borrows the context explicitly, so two sessions never
/// share state and can live on different threads.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub symbols: SymbolStore,
    pub functions: FunctionRegistry,
    pub config: Config,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            symbols: SymbolStore::new(),
            functions: FunctionRegistry::new(),
            config,
        }
    }

    /// Registers a function callable from expressions.
    ///
    /// # Arguments
    ///
    /// * `name` - Case-insensitive name used in expressions.
    /// * `arity` - Number of arguments, 1 or 2.
    /// * `function` - Receives the evaluated arguments in written order.
    pub fn register_function<F>(&mut self, name: &str, arity: usize, function: F) -> Result<()>
    where
        F: Fn(&[f64]) -> Result<f64, String> + Send + Sync + 'static,
    {
        self.functions.register(name, arity, function)
    }

    /// Current value of a variable or constant.
    pub fn variable(&self, name: &str) -> Option<f64> {
        self.symbols.get(name)
    }
}
