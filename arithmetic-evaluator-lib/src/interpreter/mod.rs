pub mod evaluator;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod statements;
pub mod token;
pub mod validation;

use crate::interpreter::evaluator::{EvaluationError, EvaluationStep, Evaluator};
use crate::interpreter::parser::declarations::VariableTable;
use crate::interpreter::parser::postfix::Postfix;
use crate::interpreter::parser::{infix_to_postfix_with, ConverterConfig};
use crate::interpreter::statements::{evaluate_statements, Statement};
use crate::interpreter::token::Token;
use crate::interpreter::validation::{validate, Diagnostic};
use anyhow::{Context, Result};
use log::debug;
use string_builder::Builder;

/// Everything learned about a program while evaluating it.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Every token of the program, ending with the end-of-input token.
    pub tokens: Vec<Token>,
    /// Right-hand side of the first assignment, in infix order.
    pub expression: Vec<Token>,
    pub postfix: Postfix,
    pub variables: VariableTable,
    pub result: Result<f64, EvaluationError>,
    /// Operand stack after each postfix element of `postfix`, up to the first error.
    pub steps: Vec<EvaluationStep>,
    /// Every assignment with an arithmetic right-hand side, evaluated in order.
    pub statements: Vec<Statement>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs a program through every stage: tokenizing, extracting the expression and
/// declarations, converting to postfix and evaluating with the numeric declarations bound.
///
/// Besides the first assignment, every arithmetic assignment is evaluated on its own,
/// and the source is checked for malformed declarations. Neither affects `result`.
///
/// # Arguments
///
/// * `source`: The C-like source text.
///
/// returns: The output of every stage.
///
/// # Examples
///
/// ```
/// use arithmetic_evaluator::interpreter::analyze;
///
/// let analysis = analyze("int a = 5;\nint sum = a + 1;");
/// assert_eq!(analysis.postfix.to_string(), "5");
/// assert_eq!(analysis.result, Ok(5.0));
/// assert_eq!(analysis.statements[0].result, Ok(6.0));
/// ```
pub fn analyze(source: &str) -> Analysis {
    analyze_with(source, &ConverterConfig::default())
}

/// Same as [`analyze`], converting to postfix according to `config`.
pub fn analyze_with(source: &str, config: &ConverterConfig) -> Analysis {
    let tokens = lexer::tokenize(source);
    let diagnostics = validate(&tokens);
    let program = parser::parse(&tokens);
    let postfix = infix_to_postfix_with(&program.expression, config);
    let (result, steps) = Evaluator::with_bindings(&program.variables).evaluate_traced(&postfix);
    let statements = evaluate_statements(&tokens, &program.variables, config);
    debug!("Analysis finished with {:?}", result);

    Analysis {
        tokens,
        expression: program.expression,
        postfix,
        variables: program.variables,
        result,
        steps,
        statements,
        diagnostics,
    }
}

/// Joins the text of the given tokens with single spaces.
///
/// The end-of-input token is left out.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
///
/// returns: A text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use arithmetic_evaluator::interpreter::lexer::tokenize;
/// use arithmetic_evaluator::interpreter::tokens_to_string;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = tokenize("a+(b*2)");
/// assert_eq!(tokens_to_string(&tokens)?, "a + ( b * 2 )");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: &[Token]) -> Result<String> {
    let mut builder = Builder::new(tokens.len() * 2);

    for (index, token) in tokens
        .iter()
        .filter(|token| !token.is_end_of_input())
        .enumerate()
    {
        if index > 0 {
            builder.append(" ");
        }
        builder.append(token.text.as_str());
    }

    builder.string().context("Failed to build token string")
}
