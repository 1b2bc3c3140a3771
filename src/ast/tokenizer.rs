use crate::ast::{format_tokens, Operator, Paren, Sign, Token};
use crate::context::Context;
use crate::error::{push_checked, CalcError, Result};
use log::{debug, trace, warn};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "ast/lexeme.pest"]
struct LexemeParser;

/// Characters split out as lexemes of their own, whether or not the
/// expression language gives them a meaning.
pub const SPECIAL_CHARACTERS: &str = "()+-*/=^!<>{}[]&|,%";

pub struct Tokenizer;

impl Tokenizer {
    /// Splits `input` into tokens, resolving identifiers against `context`.
    ///
    /// Unknown identifiers are declared in the symbol store with value 0.0.
    /// When `auto_register_functions` is set, an unknown identifier written as
    /// a call is registered as an unbound one-argument function instead.
    pub fn tokenize(input: &str, context: &mut Context) -> Result<Vec<Token>> {
        debug!("Tokenizing expression: {}", input);
        if input.trim().is_empty() {
            return Err(CalcError::NullOrEmptyInput);
        }

        let len = input.chars().count();
        let max = context.config.max_input_len;
        if len > max {
            return Err(CalcError::InputTooLong { len, max });
        }

        let padded = pad_special_characters(input)?.to_lowercase();
        let mut lexemes = padded.split_whitespace().peekable();

        let mut tokens = Vec::new();
        let mut opened = 0usize;
        let mut closed = 0usize;

        while let Some(lexeme) = lexemes.next() {
            let token = Self::classify(lexeme, tokens.last(), lexemes.peek().copied(), context)?;
            trace!("Lexeme '{}' -> {:?}", lexeme, token);
            match token {
                Token::Parenthesis(Paren::Open) => opened += 1,
                Token::Parenthesis(Paren::Close) => closed += 1,
                _ => {}
            }
            push_checked(&mut tokens, token)?;
        }

        if opened != closed {
            debug!("Unbalanced input: {} '(' against {} ')'", opened, closed);
            return Err(CalcError::MismatchedParenthesis);
        }

        debug!("Tokens: {}", format_tokens(&tokens));
        Ok(tokens)
    }

    fn classify(
        lexeme: &str,
        previous: Option<&Token>,
        next: Option<&str>,
        context: &mut Context,
    ) -> Result<Token> {
        let mut chars = lexeme.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Ok(operator) = Operator::try_from(c) {
                let sign_position = previous.map_or(true, |token| !token.ends_operand());
                return Ok(match (operator, sign_position) {
                    (Operator::Subtract, true) => Token::Unary(Sign::Negative),
                    (Operator::Add, true) => Token::Unary(Sign::Positive),
                    _ => Token::Operator(operator),
                });
            }
            match c {
                '(' => return Ok(Token::Parenthesis(Paren::Open)),
                ')' => return Ok(Token::Parenthesis(Paren::Close)),
                '=' => return Ok(Token::Equality),
                ',' => return Ok(Token::Comma),
                _ => {}
            }
        }

        if LexemeParser::parse(Rule::number_lexeme, lexeme).is_ok() {
            return lexeme
                .parse::<f64>()
                .map(Token::Number)
                .map_err(|_| CalcError::InvalidCharacterOrFormat(lexeme.to_string()));
        }

        if LexemeParser::parse(Rule::identifier_lexeme, lexeme).is_ok() {
            return Ok(Self::resolve_identifier(lexeme, next, context));
        }

        Err(CalcError::InvalidCharacterOrFormat(lexeme.to_string()))
    }

    fn resolve_identifier(name: &str, next: Option<&str>, context: &mut Context) -> Token {
        if context.functions.contains(name) {
            return Token::Function(name.to_string());
        }

        if context.config.auto_register_functions
            && next == Some("(")
            && !context.symbols.contains(name)
        {
            warn!("Registering unknown function '{}' with arity 1", name);
            context.functions.register_unbound(name);
            return Token::Function(name.to_string());
        }

        context.symbols.declare(name);
        Token::Variable(name.to_string())
    }
}

/// Surrounds every [`SPECIAL_CHARACTERS`] occurrence with spaces.
pub fn pad_special_characters(input: &str) -> Result<String> {
    let mut padded = String::new();
    padded.try_reserve(input.len() * 3)?;
    for c in input.chars() {
        if SPECIAL_CHARACTERS.contains(c) {
            padded.push(' ');
            padded.push(c);
            padded.push(' ');
        } else {
            padded.push(c);
        }
    }
    Ok(padded)
}
