use crate::config::AngleMode;
use crate::error::{CalcError, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type Function = Arc<dyn Fn(&[f64]) -> Result<f64, String> + Send + Sync>;

/// Functions every session knows about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Log,
    Sqrt,
    Exp,
    Abs,
    Log10,
    Log2,
    Loge,
    LogBase,
}

impl Builtin {
    pub const ALL: [Builtin; 11] = [
        Builtin::Sin,
        Builtin::Cos,
        Builtin::Tan,
        Builtin::Log,
        Builtin::Sqrt,
        Builtin::Exp,
        Builtin::Abs,
        Builtin::Log10,
        Builtin::Log2,
        Builtin::Loge,
        Builtin::LogBase,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Sin => "sin",
            Builtin::Cos => "cos",
            Builtin::Tan => "tan",
            Builtin::Log => "log",
            Builtin::Sqrt => "sqrt",
            Builtin::Exp => "exp",
            Builtin::Abs => "abs",
            Builtin::Log10 => "log10",
            Builtin::Log2 => "log2",
            Builtin::Loge => "loge",
            Builtin::LogBase => "logbase",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Builtin::LogBase => 2,
            _ => 1,
        }
    }

    /// Applies the function to arguments given in written order.
    /// Domain errors (`sqrt(-1)`, `log(0)`) follow IEEE and are not reported.
    pub fn apply(&self, args: &[f64], angle_mode: AngleMode) -> Result<f64> {
        if args.len() != self.arity() {
            return Err(CalcError::InvalidOperation(format!(
                "{} expects {} argument(s), got {}",
                self.name(),
                self.arity(),
                args.len()
            )));
        }

        let x = args[0];
        let value = match self {
            Builtin::Sin => angle_mode.sine_argument(x).sin(),
            Builtin::Cos => angle_mode.cosine_argument(x).cos(),
            Builtin::Tan => angle_mode.cosine_argument(x).tan(),
            Builtin::Log | Builtin::Loge => x.ln(),
            Builtin::Sqrt => x.sqrt(),
            Builtin::Exp => x.exp(),
            Builtin::Abs => x.abs(),
            Builtin::Log10 => x.log10(),
            Builtin::Log2 => x.log2(),
            // logbase(base, value)
            Builtin::LogBase => args[1].ln() / x.ln(),
        };
        Ok(value)
    }
}

#[derive(Clone)]
pub enum FunctionBody {
    Builtin(Builtin),
    Custom(Function),
    /// Name registered on first use as a call, with nothing to run.
    Unbound,
}

impl fmt::Debug for FunctionBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionBody::Builtin(builtin) => write!(f, "Builtin({})", builtin.name()),
            FunctionBody::Custom(_) => write!(f, "Custom"),
            FunctionBody::Unbound => write!(f, "Unbound"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FunctionEntry {
    pub arity: usize,
    pub body: FunctionBody,
}

/// Function names known to a session, with their arity and implementation.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionEntry>,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Creates a registry holding every [`Builtin`].
    pub fn new() -> Self {
        let functions = Builtin::ALL
            .iter()
            .map(|builtin| {
                (
                    builtin.name().to_string(),
                    FunctionEntry {
                        arity: builtin.arity(),
                        body: FunctionBody::Builtin(*builtin),
                    },
                )
            })
            .collect();
        Self { functions }
    }

    pub fn get(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_lowercase())
    }

    pub fn arity(&self, name: &str) -> Option<usize> {
        self.get(name).map(|entry| entry.arity)
    }

    /// Registers a callable function. Tree nodes carry at most two operands,
    /// so only arities 1 and 2 are accepted.
    pub fn register<F>(&mut self, name: &str, arity: usize, function: F) -> Result<()>
    where
        F: Fn(&[f64]) -> Result<f64, String> + Send + Sync + 'static,
    {
        if !(1..=2).contains(&arity) {
            return Err(CalcError::WrongArity {
                name: name.to_string(),
                arity,
            });
        }
        self.functions.insert(
            name.to_lowercase(),
            FunctionEntry {
                arity,
                body: FunctionBody::Custom(Arc::new(function)),
            },
        );
        Ok(())
    }

    /// Records `name` as a one-argument function without an implementation,
    /// unless the name is already known.
    pub fn register_unbound(&mut self, name: &str) {
        self.functions
            .entry(name.to_lowercase())
            .or_insert(FunctionEntry {
                arity: 1,
                body: FunctionBody::Unbound,
            });
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
