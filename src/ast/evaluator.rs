use crate::ast::{AstNode, Children, Token};
use crate::context::{Context, FunctionBody};
use crate::error::{CalcError, Result};
use log::debug;

/// Reduces expression trees to numbers against a session.
pub struct Evaluator;

impl Evaluator {
    /// Evaluates `tree` bottom-up. The tree is only borrowed, so the same
    /// tree can be evaluated again; assignments write into `context`.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` with the value of the root node.
    /// * `Err(CalcError)` from the first node that fails. An assignment whose
    ///   right-hand side fails leaves the target unchanged.
    pub fn evaluate(tree: &AstNode, context: &mut Context) -> Result<f64> {
        let value = Self::reduce(tree, context)?;
        debug!("Result: {}", value);
        Ok(value)
    }

    fn reduce(node: &AstNode, context: &mut Context) -> Result<f64> {
        match (&node.token, &node.children) {
            (Token::Number(value), Children::None) => Ok(*value),

            (Token::Variable(name), Children::None) => context.symbols.get(name).ok_or_else(|| {
                CalcError::InvalidOperation(format!("variable '{}' has no value", name))
            }),

            (Token::Operator(operator), Children::Binary { left, right }) => {
                let left = Self::reduce(left, context)?;
                let right = Self::reduce(right, context)?;
                operator.apply(left, right)
            }

            (Token::Unary(sign), Children::Unary(child)) => {
                Ok(sign.apply(Self::reduce(child, context)?))
            }

            (Token::Function(name), Children::Unary(child)) => {
                let argument = Self::reduce(child, context)?;
                Self::call(name, &[argument], context)
            }

            (Token::Function(name), Children::Binary { left, right }) => {
                let first = Self::reduce(left, context)?;
                let second = Self::reduce(right, context)?;
                Self::call(name, &[first, second], context)
            }

            (Token::Equality, Children::Binary { left, right }) => {
                Self::assign(left, right, context)
            }

            (token, _) => Err(CalcError::InvalidOperation(format!(
                "'{}' has the wrong number of operands",
                token
            ))),
        }
    }

    fn call(name: &str, args: &[f64], context: &Context) -> Result<f64> {
        let entry = context
            .functions
            .get(name)
            .ok_or_else(|| CalcError::UndefinedFunction(name.to_string()))?;

        if entry.arity != args.len() {
            return Err(CalcError::InvalidOperation(format!(
                "'{}' takes {} argument(s), the tree holds {}",
                name,
                entry.arity,
                args.len()
            )));
        }

        match &entry.body {
            FunctionBody::Builtin(builtin) => builtin.apply(args, context.config.angle_mode),
            FunctionBody::Custom(function) => function(args)
                .map_err(|message| CalcError::InvalidOperation(format!("{}: {}", name, message))),
            FunctionBody::Unbound => Err(CalcError::UndefinedFunction(name.to_string())),
        }
    }

    fn assign(target: &AstNode, value: &AstNode, context: &mut Context) -> Result<f64> {
        let name = match &target.token {
            Token::Variable(name) if target.is_leaf() => name,
            other => {
                return Err(CalcError::InvalidAssignmentTarget(format!(
                    "cannot assign to '{}'",
                    other
                )))
            }
        };

        if context.symbols.is_constant(name) {
            return Err(CalcError::InvalidAssignmentTarget(format!(
                "'{}' is a constant",
                name
            )));
        }

        let value = Self::reduce(value, context)?;
        context.symbols.assign(name, value)?;
        debug!("Assigned {} = {}", name, value);
        Ok(value)
    }
}
