use crate::ast::{Operator, Paren, Token};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OperatorInfo {
    pub precedence: u8,
    pub associativity: Associativity,
}

impl OperatorInfo {
    const fn new(precedence: u8, associativity: Associativity) -> Self {
        Self {
            precedence,
            associativity,
        }
    }

    /// Whether an operator already on the stack (`self`) must be emitted before
    /// `incoming` is pushed.
    pub fn yields_to(&self, incoming: &OperatorInfo) -> bool {
        self.precedence > incoming.precedence
            || (self.precedence == incoming.precedence
                && incoming.associativity == Associativity::Left)
    }
}

pub const FUNCTION: OperatorInfo = OperatorInfo::new(5, Associativity::Left);
pub const PARENTHESIS: OperatorInfo = OperatorInfo::new(4, Associativity::Left);
pub const POWER: OperatorInfo = OperatorInfo::new(3, Associativity::Right);
/// Signs share the exponent level so `-2^2` reads as `-(2^2)`.
pub const SIGN: OperatorInfo = OperatorInfo::new(3, Associativity::Right);
pub const MULTIPLICATIVE: OperatorInfo = OperatorInfo::new(2, Associativity::Left);
pub const ADDITIVE: OperatorInfo = OperatorInfo::new(1, Associativity::Left);
pub const ASSIGNMENT: OperatorInfo = OperatorInfo::new(0, Associativity::Right);

/// Static precedence facts, looked up by symbol.
pub struct OperatorTable;

impl OperatorTable {
    const ENTRIES: [(&'static str, OperatorInfo); 17] = [
        ("(", PARENTHESIS),
        (")", PARENTHESIS),
        ("^", POWER),
        ("neg", SIGN),
        ("pos", SIGN),
        ("*", MULTIPLICATIVE),
        ("/", MULTIPLICATIVE),
        ("%", MULTIPLICATIVE),
        ("+", ADDITIVE),
        ("-", ADDITIVE),
        ("=", ASSIGNMENT),
        ("+=", ASSIGNMENT),
        ("-=", ASSIGNMENT),
        ("*=", ASSIGNMENT),
        ("/=", ASSIGNMENT),
        ("%=", ASSIGNMENT),
        ("()", FUNCTION),
    ];

    /// Looks up an operator symbol. Function names all share the `()` entry.
    pub fn lookup(symbol: &str) -> Option<OperatorInfo> {
        Self::ENTRIES
            .iter()
            .find(|(entry, _)| *entry == symbol)
            .map(|(_, info)| *info)
    }

    /// Precedence facts for a token that can sit on the operator stack.
    pub fn for_token(token: &Token) -> Option<OperatorInfo> {
        match token {
            Token::Operator(operator) => Some(operator.info()),
            Token::Unary(_) => Some(SIGN),
            Token::Function(_) => Some(FUNCTION),
            Token::Parenthesis(Paren::Open | Paren::Close) => Some(PARENTHESIS),
            Token::Equality => Some(ASSIGNMENT),
            Token::Number(_) | Token::Variable(_) | Token::Comma => None,
        }
    }
}

impl Operator {
    pub fn info(&self) -> OperatorInfo {
        match self {
            Operator::Power => POWER,
            Operator::Multiply | Operator::Divide | Operator::Modulo => MULTIPLICATIVE,
            Operator::Add | Operator::Subtract => ADDITIVE,
        }
    }
}
