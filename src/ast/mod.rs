use crate::error::{CalcError, Result};
use std::fmt;

mod builder;
mod evaluator;
mod precedence;
mod shunting_yard;
mod tokenizer;

pub use builder::*;
pub use evaluator::*;
pub use precedence::*;
pub use shunting_yard::*;
pub use tokenizer::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Modulo => '%',
            Operator::Power => '^',
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> Result<f64> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    Err(CalcError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
            Operator::Modulo => {
                if right == 0.0 {
                    Err(CalcError::DivisionByZero)
                } else {
                    Ok(left % right)
                }
            }
            Operator::Power => Ok(left.powf(right)),
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = CalcError;

    fn try_from(value: char) -> Result<Self> {
        match value {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            '%' => Ok(Operator::Modulo),
            '^' => Ok(Operator::Power),
            _ => Err(CalcError::UnknownOperator(value)),
        }
    }
}

/// Prefix sign in front of an operand, as in `-3` or `2 * +x`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Sign::Negative => -value,
            Sign::Positive => value,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Paren {
    Open,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Operator),
    /// Lower-case name of a function in the session's registry.
    Function(String),
    /// Lower-case name of a symbol in the session's store.
    Variable(String),
    Parenthesis(Paren),
    Equality,
    Unary(Sign),
    Comma,
}

impl Token {
    /// True for tokens that can end an operand: a `-` following one of these
    /// is a subtraction, anywhere else it is a sign.
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::Variable(_) | Token::Parenthesis(Paren::Close)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Operator(operator) => write!(f, "{}", operator.symbol()),
            Token::Function(name) | Token::Variable(name) => write!(f, "{}", name),
            Token::Parenthesis(Paren::Open) => write!(f, "("),
            Token::Parenthesis(Paren::Close) => write!(f, ")"),
            Token::Equality => write!(f, "="),
            Token::Unary(Sign::Negative) => write!(f, "neg"),
            Token::Unary(Sign::Positive) => write!(f, "pos"),
            Token::Comma => write!(f, ","),
        }
    }
}

/// Renders a token sequence space-separated, e.g. `3 4 2 * +`.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq)]
pub enum Children {
    None,
    /// Operand of a sign or of a one-argument function.
    Unary(Box<AstNode>),
    /// Operands of a binary operator, a two-argument function or `=`.
    Binary {
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
}

/// A token together with the operands it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub token: Token,
    pub children: Children,
}

impl AstNode {
    pub fn leaf(token: Token) -> Self {
        Self {
            token,
            children: Children::None,
        }
    }

    pub fn unary(token: Token, child: AstNode) -> Self {
        Self {
            token,
            children: Children::Unary(Box::new(child)),
        }
    }

    pub fn binary(token: Token, left: AstNode, right: AstNode) -> Self {
        Self {
            token,
            children: Children::Binary {
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.children, Children::None)
    }

    /// Number of nodes in the tree rooted here.
    pub fn size(&self) -> usize {
        1 + match &self.children {
            Children::None => 0,
            Children::Unary(child) => child.size(),
            Children::Binary { left, right } => left.size() + right.size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_apply() {
        assert_eq!(Operator::Add.apply(2.0, 3.0), Ok(5.0));
        assert_eq!(Operator::Subtract.apply(2.0, 3.0), Ok(-1.0));
        assert_eq!(Operator::Multiply.apply(2.0, 3.0), Ok(6.0));
        assert_eq!(Operator::Divide.apply(3.0, 2.0), Ok(1.5));
        assert_eq!(Operator::Modulo.apply(7.0, 4.0), Ok(3.0));
        assert_eq!(Operator::Power.apply(2.0, 10.0), Ok(1024.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(Operator::Divide.apply(1.0, 0.0), Err(CalcError::DivisionByZero));
        assert_eq!(Operator::Modulo.apply(1.0, 0.0), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_operator_from_char() {
        assert_eq!(Operator::try_from('^'), Ok(Operator::Power));
        assert_eq!(Operator::try_from('!'), Err(CalcError::UnknownOperator('!')));
        for operator in "+-*/%^".chars() {
            assert_eq!(Operator::try_from(operator).unwrap().symbol(), operator);
        }
    }

    #[test]
    fn test_token_display() {
        let tokens = vec![
            Token::Unary(Sign::Negative),
            Token::Function("sin".to_string()),
            Token::Parenthesis(Paren::Open),
            Token::Number(2.5),
            Token::Comma,
            Token::Variable("x".to_string()),
            Token::Parenthesis(Paren::Close),
            Token::Equality,
        ];
        assert_eq!(format_tokens(&tokens), "neg sin ( 2.5 , x ) =");
    }

    #[test]
    fn test_tree_size() {
        let tree = AstNode::binary(
            Token::Operator(Operator::Add),
            AstNode::leaf(Token::Number(1.0)),
            AstNode::unary(
                Token::Unary(Sign::Negative),
                AstNode::leaf(Token::Number(2.0)),
            ),
        );
        assert_eq!(tree.size(), 4);
        assert!(!tree.is_leaf());
    }
}
