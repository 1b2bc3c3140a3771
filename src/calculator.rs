use crate::ast::{AstBuilder, AstNode, Evaluator, ShuntingYard, Token, Tokenizer};
use crate::config::Config;
use crate::context::Context;
use crate::error::{CalcError, ErrorKind, Result};
use log::debug;

/// Value or failure of one expression, flattened for callers that do not
/// want to match on [`CalcError`].
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    Value { value: f64 },
    Error { kind: ErrorKind, message: String },
}

impl EvaluationOutcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            EvaluationOutcome::Value { value } => Some(*value),
            EvaluationOutcome::Error { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, EvaluationOutcome::Error { .. })
    }
}

impl From<Result<f64>> for EvaluationOutcome {
    fn from(result: Result<f64>) -> Self {
        match result {
            Ok(value) => EvaluationOutcome::Value { value },
            Err(error) => EvaluationOutcome::Error {
                kind: error.kind(),
                message: error.to_string(),
            },
        }
    }
}

/// Checks the shape of an assignment: at most one `=`, and only directly
/// after a leading variable.
pub fn validate_assignment(tokens: &[Token]) -> Result<()> {
    let equalities = tokens
        .iter()
        .filter(|token| matches!(token, Token::Equality))
        .count();

    match (equalities, tokens) {
        (0, _) => Ok(()),
        (1, [Token::Variable(_), Token::Equality, ..]) => Ok(()),
        (1, _) => Err(CalcError::InvalidAssignmentTarget(
            "the left side of '=' must be a single variable".to_string(),
        )),
        _ => Err(CalcError::InvalidAssignmentTarget(
            "only one '=' is allowed".to_string(),
        )),
    }
}

/// Runs the whole pipeline on `raw` within `context`.
pub fn calculate(raw: &str, context: &mut Context) -> Result<f64> {
    debug!("Evaluating expression: {}", raw);
    let tree = parse(raw, context)?;
    Evaluator::evaluate(&tree, context)
}

/// Evaluates `raw` within `context`, reporting failures as data.
///
/// # Examples
///
/// ```
/// use scicalc_rs::{evaluate_expression, Context, EvaluationOutcome};
///
/// let mut context = Context::new();
/// assert_eq!(
///     evaluate_expression("3+4*2", &mut context),
///     EvaluationOutcome::Value { value: 11.0 }
/// );
/// ```
pub fn evaluate_expression(raw: &str, context: &mut Context) -> EvaluationOutcome {
    EvaluationOutcome::from(calculate(raw, context))
}

fn postfix(raw: &str, context: &mut Context) -> Result<Vec<Token>> {
    let tokens = Tokenizer::tokenize(raw, context)?;
    validate_assignment(&tokens)?;
    ShuntingYard::to_postfix(&tokens, &context.functions)
}

fn parse(raw: &str, context: &mut Context) -> Result<AstNode> {
    let postfix = postfix(raw, context)?;
    AstBuilder::build(&postfix, &context.functions)
}

/// A session bundled with the pipeline stages, for callers that evaluate many
/// expressions or want the intermediate forms.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    context: Context,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            context: Context::with_config(config),
        }
    }

    pub fn with_context(context: Context) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn into_context(self) -> Context {
        self.context
    }

    pub fn register_function<F>(&mut self, name: &str, arity: usize, function: F) -> Result<()>
    where
        F: Fn(&[f64]) -> Result<f64, String> + Send + Sync + 'static,
    {
        self.context.register_function(name, arity, function)
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.context.variable(name)
    }

    /// Infix tokens of `raw`. Identifiers seen for the first time are declared.
    pub fn tokenize(&mut self, raw: &str) -> Result<Vec<Token>> {
        Tokenizer::tokenize(raw, &mut self.context)
    }

    /// Postfix tokens of `raw`, after the assignment shape check.
    pub fn to_postfix(&mut self, raw: &str) -> Result<Vec<Token>> {
        postfix(raw, &mut self.context)
    }

    /// Expression tree of `raw`, ready for [`Calculator::evaluate_ast`].
    pub fn parse(&mut self, raw: &str) -> Result<AstNode> {
        parse(raw, &mut self.context)
    }

    pub fn evaluate_ast(&mut self, tree: &AstNode) -> Result<f64> {
        Evaluator::evaluate(tree, &mut self.context)
    }

    pub fn evaluate(&mut self, raw: &str) -> Result<f64> {
        calculate(raw, &mut self.context)
    }

    pub fn evaluate_expression(&mut self, raw: &str) -> EvaluationOutcome {
        evaluate_expression(raw, &mut self.context)
    }
}
