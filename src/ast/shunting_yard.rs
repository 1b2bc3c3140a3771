use crate::ast::{format_tokens, OperatorTable, Paren, Token};
use crate::context::FunctionRegistry;
use crate::error::{buffer_with_capacity, push_checked, CalcError, Result};
use log::debug;

/// What an open parenthesis on the operator stack belongs to.
enum Frame {
    Group,
    Call {
        name: String,
        arity: usize,
        arguments: usize,
    },
}

/// Infix to postfix conversion with an explicit operator stack.
pub struct ShuntingYard;

impl ShuntingYard {
    /// Reorders `tokens` into postfix form.
    ///
    /// Parentheses and commas are consumed; a function name is emitted right
    /// after the last token of its argument list. Every call must be written
    /// `name(...)` with exactly as many arguments as `functions` records.
    pub fn to_postfix(tokens: &[Token], functions: &FunctionRegistry) -> Result<Vec<Token>> {
        let mut output: Vec<Token> = buffer_with_capacity(tokens.len())?;
        let mut stack: Vec<Token> = buffer_with_capacity(tokens.len())?;
        let mut frames: Vec<Frame> = Vec::new();
        let mut previous: Option<&Token> = None;

        for (index, token) in tokens.iter().enumerate() {
            match token {
                Token::Number(_) | Token::Variable(_) => push_checked(&mut output, token.clone())?,
                Token::Unary(_) => push_checked(&mut stack, token.clone())?,
                Token::Function(name) => {
                    if !matches!(tokens.get(index + 1), Some(Token::Parenthesis(Paren::Open))) {
                        return Err(CalcError::syntax(format!(
                            "'{}' must be followed by '('",
                            name
                        )));
                    }
                    push_checked(&mut stack, token.clone())?;
                }
                Token::Operator(operator) => {
                    let incoming = operator.info();
                    while let Some(top) = stack.last() {
                        let yields = match top {
                            Token::Operator(_) | Token::Unary(_) => OperatorTable::for_token(top)
                                .map_or(false, |info| info.yields_to(&incoming)),
                            _ => false,
                        };
                        if !yields {
                            break;
                        }
                        Self::transfer(&mut stack, &mut output)?;
                    }
                    push_checked(&mut stack, token.clone())?;
                }
                Token::Parenthesis(Paren::Open) => {
                    let frame = match previous {
                        Some(Token::Function(name)) => Frame::Call {
                            name: name.clone(),
                            arity: functions
                                .arity(name)
                                .ok_or_else(|| CalcError::UndefinedFunction(name.clone()))?,
                            arguments: 1,
                        },
                        _ => Frame::Group,
                    };
                    push_checked(&mut frames, frame)?;
                    push_checked(&mut stack, token.clone())?;
                }
                Token::Parenthesis(Paren::Close) => {
                    loop {
                        match stack.pop() {
                            Some(Token::Parenthesis(Paren::Open)) => break,
                            Some(top) => push_checked(&mut output, top)?,
                            None => return Err(CalcError::MismatchedParenthesis),
                        }
                    }
                    let frame = frames.pop().ok_or(CalcError::MismatchedParenthesis)?;
                    Self::close(frame, previous)?;
                    if matches!(stack.last(), Some(Token::Function(_))) {
                        Self::transfer(&mut stack, &mut output)?;
                    }
                }
                Token::Comma => {
                    match frames.last_mut() {
                        Some(Frame::Call { name, arguments, .. }) => {
                            if Self::argument_missing(previous) {
                                return Err(CalcError::syntax(format!(
                                    "empty argument in call to '{}'",
                                    name
                                )));
                            }
                            *arguments += 1;
                        }
                        _ => return Err(CalcError::syntax("comma outside of an argument list")),
                    }
                    while let Some(top) = stack.last() {
                        if matches!(top, Token::Parenthesis(Paren::Open)) {
                            break;
                        }
                        Self::transfer(&mut stack, &mut output)?;
                    }
                }
                Token::Equality => {
                    while let Some(top) = stack.last() {
                        if matches!(top, Token::Parenthesis(Paren::Open)) {
                            break;
                        }
                        Self::transfer(&mut stack, &mut output)?;
                    }
                    push_checked(&mut stack, token.clone())?;
                }
            }
            previous = Some(token);
        }

        while let Some(top) = stack.pop() {
            if matches!(top, Token::Parenthesis(Paren::Open)) {
                return Err(CalcError::MismatchedParenthesis);
            }
            push_checked(&mut output, top)?;
        }

        debug!("Postfix: {}", format_tokens(&output));
        Ok(output)
    }

    /// Checks the contents of a parenthesis pair once its `)` is reached.
    fn close(frame: Frame, previous: Option<&Token>) -> Result<()> {
        let empty = matches!(previous, Some(Token::Parenthesis(Paren::Open)));
        match frame {
            Frame::Group if empty => Err(CalcError::syntax("empty parentheses")),
            Frame::Group => Ok(()),
            Frame::Call { name, .. } if !empty && Self::argument_missing(previous) => Err(
                CalcError::syntax(format!("empty argument in call to '{}'", name)),
            ),
            Frame::Call {
                name,
                arity,
                arguments,
            } => {
                let arguments = if empty { 0 } else { arguments };
                if arguments != arity {
                    return Err(CalcError::syntax(format!(
                        "'{}' expects {} argument(s), got {}",
                        name, arity, arguments
                    )));
                }
                Ok(())
            }
        }
    }

    /// True when the argument being closed has no tokens, as in `f(,1)` or `f(1,)`.
    fn argument_missing(previous: Option<&Token>) -> bool {
        matches!(
            previous,
            Some(Token::Parenthesis(Paren::Open)) | Some(Token::Comma)
        )
    }

    fn transfer(stack: &mut Vec<Token>, output: &mut Vec<Token>) -> Result<()> {
        if let Some(top) = stack.pop() {
            push_checked(output, top)?;
        }
        Ok(())
    }
}
