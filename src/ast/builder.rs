use crate::ast::{AstNode, Token};
use crate::context::FunctionRegistry;
use crate::error::{buffer_with_capacity, push_checked, CalcError, Result};
use log::debug;

/// Deepest tree the builder hands out. Evaluation and drop recurse once per
/// level, so anything deeper is rejected instead of risking the thread stack.
pub const MAX_TREE_DEPTH: usize = 1024;

/// A finished subtree and its depth.
type Subtree = (AstNode, usize);

/// Builds an expression tree from postfix tokens.
pub struct AstBuilder;

impl AstBuilder {
    /// Folds `postfix` into a single tree. Function arities come from
    /// `functions`; for two-argument calls `left` is the first written argument.
    /// Trees deeper than [`MAX_TREE_DEPTH`] fail with a syntax error.
    pub fn build(postfix: &[Token], functions: &FunctionRegistry) -> Result<AstNode> {
        let mut stack: Vec<Subtree> = buffer_with_capacity(postfix.len())?;

        for token in postfix {
            let subtree = match token {
                Token::Number(_) | Token::Variable(_) => (AstNode::leaf(token.clone()), 1),
                Token::Operator(operator) => {
                    let (left, right) = Self::pop_pair(&mut stack, &operator.symbol().to_string())?;
                    Self::binary(token, left, right)
                }
                Token::Equality => {
                    let (left, right) = Self::pop_pair(&mut stack, "=")?;
                    Self::binary(token, left, right)
                }
                Token::Unary(_) => {
                    let child = stack
                        .pop()
                        .ok_or_else(|| CalcError::syntax(format!("sign '{}' has no operand", token)))?;
                    Self::unary(token, child)
                }
                Token::Function(name) => {
                    let arity = functions
                        .arity(name)
                        .ok_or_else(|| CalcError::UndefinedFunction(name.clone()))?;
                    match arity {
                        1 => {
                            let child = stack.pop().ok_or_else(|| {
                                CalcError::syntax(format!("'{}' expects 1 argument", name))
                            })?;
                            Self::unary(token, child)
                        }
                        2 => {
                            let (left, right) = Self::pop_pair(&mut stack, name)?;
                            Self::binary(token, left, right)
                        }
                        _ => {
                            return Err(CalcError::syntax(format!(
                                "'{}' has unsupported arity {}",
                                name, arity
                            )))
                        }
                    }
                }
                Token::Parenthesis(_) | Token::Comma => {
                    return Err(CalcError::syntax(format!(
                        "unexpected '{}' in postfix input",
                        token
                    )))
                }
            };
            if subtree.1 > MAX_TREE_DEPTH {
                return Err(CalcError::syntax(format!(
                    "expression nests deeper than {} levels",
                    MAX_TREE_DEPTH
                )));
            }
            push_checked(&mut stack, subtree)?;
        }

        let (root, depth) = match stack.pop() {
            Some(root) if stack.is_empty() => root,
            Some(_) => {
                return Err(CalcError::syntax(format!(
                    "{} operands left without an operator",
                    stack.len() + 1
                )))
            }
            None => return Err(CalcError::syntax("empty expression")),
        };

        debug!("Built tree with {} nodes, depth {}", root.size(), depth);
        Ok(root)
    }

    fn unary(token: &Token, (child, depth): Subtree) -> Subtree {
        (AstNode::unary(token.clone(), child), depth + 1)
    }

    fn binary(token: &Token, (left, left_depth): Subtree, (right, right_depth): Subtree) -> Subtree {
        (
            AstNode::binary(token.clone(), left, right),
            left_depth.max(right_depth) + 1,
        )
    }

    /// Pops the right operand, then the left one.
    fn pop_pair(stack: &mut Vec<Subtree>, symbol: &str) -> Result<(Subtree, Subtree)> {
        if stack.len() < 2 {
            return Err(CalcError::syntax(format!("'{}' expects 2 operands", symbol)));
        }
        match (stack.pop(), stack.pop()) {
            (Some(right), Some(left)) => Ok((left, right)),
            _ => Err(CalcError::syntax(format!("'{}' expects 2 operands", symbol))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Children, Operator, Paren, ShuntingYard, Sign, Tokenizer};
    use crate::config::Config;
    use crate::context::Context;

    fn build_in(input: &str, context: &mut Context) -> Result<AstNode> {
        let tokens = Tokenizer::tokenize(input, context)?;
        let postfix = ShuntingYard::to_postfix(&tokens, &context.functions)?;
        AstBuilder::build(&postfix, &context.functions)
    }

    fn build(input: &str) -> Result<AstNode> {
        build_in(input, &mut Context::new())
    }

    fn depth(node: &AstNode) -> usize {
        match &node.children {
            Children::None => 1,
            Children::Unary(child) => depth(child) + 1,
            Children::Binary { left, right } => depth(left).max(depth(right)) + 1,
        }
    }

    fn number(value: f64) -> AstNode {
        AstNode::leaf(Token::Number(value))
    }

    #[test]
    fn test_binary_operands_keep_order() {
        assert_eq!(
            build("8-3").unwrap(),
            AstNode::binary(Token::Operator(Operator::Subtract), number(8.0), number(3.0))
        );
    }

    #[test]
    fn test_nested_tree() {
        let tree = build("3+4*2").unwrap();
        assert_eq!(
            tree,
            AstNode::binary(
                Token::Operator(Operator::Add),
                number(3.0),
                AstNode::binary(Token::Operator(Operator::Multiply), number(4.0), number(2.0)),
            )
        );
        assert_eq!(tree.size(), 5);
    }

    #[test]
    fn test_sign_node() {
        assert_eq!(
            build("-3").unwrap(),
            AstNode::unary(Token::Unary(Sign::Negative), number(3.0))
        );
    }

    #[test]
    fn test_two_argument_function() {
        let tree = build("logbase(2,8)").unwrap();
        match tree.children {
            Children::Binary { left, right } => {
                assert_eq!(*left, number(2.0));
                assert_eq!(*right, number(8.0));
            }
            other => panic!("expected two operands, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_node() {
        let tree = build("x=5").unwrap();
        assert_eq!(tree.token, Token::Equality);
        assert_eq!(
            tree.children,
            Children::Binary {
                left: Box::new(AstNode::leaf(Token::Variable("x".to_string()))),
                right: Box::new(number(5.0)),
            }
        );
    }

    #[test]
    fn test_missing_operand() {
        assert!(matches!(build("3+"), Err(CalcError::SyntaxError(_))));
        assert!(matches!(build("*3"), Err(CalcError::SyntaxError(_))));
        assert!(matches!(build("-"), Err(CalcError::SyntaxError(_))));
    }

    #[test]
    fn test_missing_argument() {
        assert!(matches!(build("logbase(8)"), Err(CalcError::SyntaxError(_))));
        assert!(matches!(build("sin()"), Err(CalcError::SyntaxError(_))));
    }

    #[test]
    fn test_unknown_call_rejected() {
        assert!(matches!(build("foo(1,2)"), Err(CalcError::SyntaxError(_))));
        assert!(matches!(build("2 3"), Err(CalcError::SyntaxError(_))));
    }

    #[test]
    fn test_unregistered_function_token() {
        let postfix = vec![Token::Number(1.0), Token::Function("nope".to_string())];
        assert_eq!(
            AstBuilder::build(&postfix, &FunctionRegistry::new()),
            Err(CalcError::UndefinedFunction("nope".to_string()))
        );
    }

    #[test]
    fn test_grouping_tokens_rejected() {
        let postfix = vec![Token::Number(1.0), Token::Parenthesis(Paren::Open)];
        assert!(matches!(
            AstBuilder::build(&postfix, &FunctionRegistry::new()),
            Err(CalcError::SyntaxError(_))
        ));
    }

    #[test]
    fn test_empty_postfix() {
        assert_eq!(
            AstBuilder::build(&[], &FunctionRegistry::new()),
            Err(CalcError::syntax("empty expression"))
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut context = Context::with_config(Config::new().with_max_input_len(200_000));

        let deepest = format!("{}1", "-".repeat(MAX_TREE_DEPTH - 1));
        assert_eq!(depth(&build_in(&deepest, &mut context).unwrap()), MAX_TREE_DEPTH);

        let signs = format!("{}1", "-".repeat(100_000));
        assert!(matches!(
            build_in(&signs, &mut context),
            Err(CalcError::SyntaxError(_))
        ));

        let powers = format!("{}2", "2^".repeat(MAX_TREE_DEPTH));
        assert!(matches!(
            build_in(&powers, &mut context),
            Err(CalcError::SyntaxError(_))
        ));
    }
}
