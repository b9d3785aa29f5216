use crate::interpreter::operator::{Associativity, BinaryOperator};
use crate::interpreter::parser::postfix::{Postfix, PostfixToken};
use crate::interpreter::token::{Token, TokenKind};
use log::debug;
use std::collections::VecDeque;

/// Tuning of the infix to postfix conversion.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// How chains of `^` group. Left by default, so `2 ^ 3 ^ 2` is `(2 ^ 3) ^ 2`.
    pub exponent_associativity: Associativity,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            exponent_associativity: Associativity::Left,
        }
    }
}

impl ConverterConfig {
    fn associativity(&self, operator: &BinaryOperator) -> Associativity {
        match operator {
            BinaryOperator::Exponentiate => self.exponent_associativity,
            _ => Associativity::Left,
        }
    }
}

/// What a token means to the converter, decided once from its kind.
#[derive(Debug, Clone, PartialEq)]
enum Symbol {
    Operand(String),
    Operator(BinaryOperator),
    OpenParenthesis,
    CloseParenthesis,
}

fn classify(token: &Token) -> Option<Symbol> {
    match token.kind {
        TokenKind::Number | TokenKind::Identifier | TokenKind::Keyword => {
            Some(Symbol::Operand(token.text.clone()))
        }
        TokenKind::Operator => token.text.parse::<BinaryOperator>().ok().map(Symbol::Operator),
        TokenKind::Delimiter => match token.text.as_str() {
            "(" => Some(Symbol::OpenParenthesis),
            ")" => Some(Symbol::CloseParenthesis),
            _ => None,
        },
        TokenKind::String | TokenKind::EndOfInput => None,
    }
}

/// Rewrites an infix expression into postfix order using the shunting-yard algorithm,
/// with every operator (`^` included) grouping from the left.
///
/// Tokens that are neither operands, arithmetic operators nor parentheses are dropped,
/// and unbalanced parentheses are tolerated rather than rejected.
///
/// # Arguments
///
/// * `infix_tokens`: The expression tokens, in infix order.
///
/// returns: The equivalent postfix sequence.
///
/// # Examples
///
/// ```
/// use arithmetic_evaluator::interpreter::lexer::tokenize;
/// use arithmetic_evaluator::interpreter::parser::infix_to_postfix;
///
/// let tokens = tokenize("3 + 4 * 2");
/// let postfix = infix_to_postfix(&tokens);
/// assert_eq!(postfix.to_string(), "3 4 2 * +");
/// ```
pub fn infix_to_postfix(infix_tokens: &[Token]) -> Postfix {
    infix_to_postfix_with(infix_tokens, &ConverterConfig::default())
}

/// Same as [`infix_to_postfix`], with the grouping of `^` taken from `config`.
pub fn infix_to_postfix_with(infix_tokens: &[Token], config: &ConverterConfig) -> Postfix {
    let mut operators: VecDeque<Symbol> = VecDeque::new();
    let mut output: Vec<PostfixToken> = vec![];

    for symbol in infix_tokens.iter().filter_map(classify) {
        match symbol {
            Symbol::Operand(text) => output.push(PostfixToken::Operand(text)),
            Symbol::OpenParenthesis => operators.push_front(Symbol::OpenParenthesis),
            Symbol::Operator(operator) => {
                parse_operator_symbol(&mut operators, &mut output, operator, config)
            }
            Symbol::CloseParenthesis => parse_closing_parenthesis(&mut operators, &mut output),
        }
    }

    transfer_leftover_operators(&mut operators, &mut output);

    let postfix = Postfix::new(output);
    debug!("Converted to postfix: {}", postfix);
    postfix
}

fn transfer_leftover_operators(operators: &mut VecDeque<Symbol>, output: &mut Vec<PostfixToken>) {
    while let Some(symbol) = operators.pop_front() {
        if let Symbol::Operator(operator) = symbol {
            output.push(PostfixToken::Operator(operator));
        }
        // Unmatched open parentheses are discarded.
    }
}

fn parse_closing_parenthesis(operators: &mut VecDeque<Symbol>, output: &mut Vec<PostfixToken>) {
    while let Some(symbol) = operators.pop_front() {
        match symbol {
            Symbol::OpenParenthesis => break,
            Symbol::Operator(operator) => output.push(PostfixToken::Operator(operator)),
            Symbol::Operand(_) | Symbol::CloseParenthesis => {}
        }
    }
}

fn parse_operator_symbol(
    operators: &mut VecDeque<Symbol>,
    output: &mut Vec<PostfixToken>,
    operator: BinaryOperator,
    config: &ConverterConfig,
) {
    while let Some(Symbol::Operator(other_operator)) = operators.front() {
        let binds_tighter = other_operator.precedence_gt(&operator)
            || (other_operator.precedence_eq(&operator)
                && config.associativity(&operator) == Associativity::Left);
        if !binds_tighter {
            break;
        }
        output.push(PostfixToken::Operator(*other_operator));
        operators.pop_front();
    }

    operators.push_front(Symbol::Operator(operator));
}
