pub mod declarations;
mod infix_converter;
pub mod postfix;

pub use crate::interpreter::parser::declarations::collect_declarations;
pub use crate::interpreter::parser::infix_converter::{
    infix_to_postfix, infix_to_postfix_with, ConverterConfig,
};

use crate::interpreter::parser::declarations::VariableTable;
use crate::interpreter::token::Token;
use itertools::Itertools;
use log::debug;

/// The parts of a program the evaluator cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedProgram {
    /// Right-hand side of the first assignment, in infix order.
    pub expression: Vec<Token>,
    pub variables: VariableTable,
}

/// Extracts the expression and the declared variables from a token stream.
///
/// # Arguments
///
/// * `tokens`: The whole token stream, as produced by the lexer.
///
/// returns: The expression of the first assignment and every declared variable.
///
/// # Examples
///
/// ```
/// use arithmetic_evaluator::interpreter::lexer::tokenize;
/// use arithmetic_evaluator::interpreter::parser::parse;
///
/// let program = parse(&tokenize("int a = 5;\nint b = a + 1;"));
/// assert_eq!(program.expression.len(), 1);
/// assert_eq!(program.variables.len(), 2);
/// ```
pub fn parse(tokens: &[Token]) -> ParsedProgram {
    let expression = extract_expression(tokens);
    let variables = collect_declarations(tokens);
    debug!(
        "Extracted expression `{}` and {} declared variables",
        expression.iter().join(" "),
        variables.len()
    );
    ParsedProgram {
        expression,
        variables,
    }
}

/// Pulls out the tokens between the first `=` and the `;` that follows it.
///
/// Type keywords and further `=` operators inside that range are skipped.
pub fn extract_expression(tokens: &[Token]) -> Vec<Token> {
    let mut expression = vec![];
    let mut in_expression = false;

    for token in tokens {
        if token.is_end_of_input() {
            break;
        }
        if token.is_operator("=") {
            in_expression = true;
            continue;
        }
        if !in_expression {
            continue;
        }
        if token.is_delimiter(";") {
            break;
        }
        if token.is_type_keyword() {
            continue;
        }
        expression.push(token.clone());
    }

    expression
}
