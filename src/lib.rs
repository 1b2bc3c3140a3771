//! Scientific expression evaluation: infix text is tokenized, reordered into
//! postfix with the shunting-yard algorithm, folded into a tree and reduced to
//! a number against a caller-owned [`Context`].

pub mod ast;
pub mod calculator;
pub mod config;
pub mod context;
pub mod error;

pub use calculator::{calculate, evaluate_expression, Calculator, EvaluationOutcome};
pub use config::{AngleMode, Config};
pub use context::Context;
pub use error::{CalcError, ErrorKind, Result};
pub use scicalc_macros::calc_fn;
