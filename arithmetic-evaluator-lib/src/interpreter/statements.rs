use crate::interpreter::evaluator::{EvaluationError, Evaluator};
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::parser::declarations::VariableTable;
use crate::interpreter::parser::postfix::Postfix;
use crate::interpreter::parser::{extract_expression, infix_to_postfix_with, ConverterConfig};
use crate::interpreter::token::{Token, TokenKind};
use log::{debug, trace};

/// An assignment whose right-hand side is an arithmetic expression, and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The variable being assigned.
    pub name: String,
    pub line: usize,
    /// Right-hand side, in infix order.
    pub expression: Vec<Token>,
    pub postfix: Postfix,
    pub result: Result<f64, EvaluationError>,
}

/// Evaluates every assignment that applies an arithmetic operator, in source order.
///
/// Numeric declarations are bound first. Every statement that evaluates successfully
/// binds its value to its name, so later statements can use it.
///
/// # Arguments
///
/// * `tokens`: The whole token stream, as produced by the lexer.
/// * `variables`: The declarations of the program.
/// * `config`: How to convert each expression to postfix.
///
/// returns: One entry per arithmetic assignment.
///
/// # Examples
///
/// ```
/// use arithmetic_evaluator::interpreter::lexer::tokenize;
/// use arithmetic_evaluator::interpreter::parser::{collect_declarations, ConverterConfig};
/// use arithmetic_evaluator::interpreter::statements::evaluate_statements;
///
/// let tokens = tokenize("int a = 5;\nint sum = a + 1;\nint twice = sum * 2;");
/// let variables = collect_declarations(&tokens);
///
/// let statements = evaluate_statements(&tokens, &variables, &ConverterConfig::default());
/// assert_eq!(statements.len(), 2);
/// assert_eq!(statements[1].name, "twice");
/// assert_eq!(statements[1].result, Ok(12.0));
/// ```
pub fn evaluate_statements(
    tokens: &[Token],
    variables: &VariableTable,
    config: &ConverterConfig,
) -> Vec<Statement> {
    let mut evaluator = Evaluator::with_bindings(variables);
    let mut statements = vec![];

    for tokens in split_statements(tokens) {
        let (name, line) = match assigned_variable(tokens) {
            Some(assigned) => assigned,
            None => continue,
        };
        let expression = extract_expression(tokens);
        if !expression.iter().any(is_arithmetic_operator) {
            trace!("Skipping assignment to `{}` without arithmetic", name);
            continue;
        }

        let postfix = infix_to_postfix_with(&expression, config);
        let result = evaluator.evaluate(&postfix);
        if let Ok(value) = &result {
            evaluator.set_variable(name.as_str(), *value);
        }
        statements.push(Statement {
            name,
            line,
            expression,
            postfix,
            result,
        });
    }

    debug!("Evaluated {} statements", statements.len());
    statements
}

/// Splits the token stream at every `;` delimiter. The delimiters are left out.
fn split_statements(tokens: &[Token]) -> impl Iterator<Item = &[Token]> {
    tokens
        .split(|token| token.is_delimiter(";") || token.is_end_of_input())
        .filter(|statement| !statement.is_empty())
}

/// Name and line of the identifier right before the first `=`.
fn assigned_variable(tokens: &[Token]) -> Option<(String, usize)> {
    let assignment = tokens.iter().position(|token| token.is_operator("="))?;
    let name = tokens[..assignment].last()?;
    if name.kind != TokenKind::Identifier {
        return None;
    }
    Some((name.text.clone(), name.line))
}

fn is_arithmetic_operator(token: &Token) -> bool {
    token.kind == TokenKind::Operator && token.text.parse::<BinaryOperator>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;
    use crate::interpreter::operator::Associativity;
    use crate::interpreter::parser::collect_declarations;
    use pretty_assertions::assert_eq;

    fn evaluate(source: &str) -> Vec<Statement> {
        let tokens = tokenize(source);
        let variables = collect_declarations(&tokens);
        evaluate_statements(&tokens, &variables, &ConverterConfig::default())
    }

    fn names_and_results(source: &str) -> Vec<(String, Result<f64, EvaluationError>)> {
        evaluate(source)
            .into_iter()
            .map(|statement| (statement.name, statement.result))
            .collect()
    }

    #[test]
    fn every_arithmetic_declaration_is_evaluated() {
        let source = "int a = 5;\nint b = 10;\nint sum = a + b;\nfloat product = a * b;";

        assert_eq!(
            names_and_results(source),
            vec![
                ("sum".to_string(), Ok(15.0)),
                ("product".to_string(), Ok(50.0)),
            ]
        );
    }

    #[test]
    fn statement_records_line_and_postfix() {
        let statements = evaluate("int a = 5;\n\nint r = (a - 1) * 2;");

        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].line, 3);
        assert_eq!(statements[0].postfix.to_string(), "a 1 - 2 *");
        assert_eq!(statements[0].result, Ok(8.0));
    }

    #[test]
    fn later_statements_see_earlier_results() {
        assert_eq!(
            names_and_results("int sum = 2 + 3; x = sum * sum;"),
            vec![("sum".to_string(), Ok(5.0)), ("x".to_string(), Ok(25.0))]
        );
    }

    #[test]
    fn failed_statement_does_not_stop_the_rest() {
        assert_eq!(
            names_and_results("r = 4 / 0; int s = 1 + 1; int t = r + 1;"),
            vec![
                (
                    "r".to_string(),
                    Err(EvaluationError::DivisionByZero { dividend: 4.0 })
                ),
                ("s".to_string(), Ok(2.0)),
                (
                    "t".to_string(),
                    Err(EvaluationError::UnknownToken("r".to_string()))
                ),
            ]
        );
    }

    #[test]
    fn plain_and_string_initializers_are_skipped() {
        let source = "int a = 5;\nstring s = \"Hello\";\nint b = a;\ncout << a << endl;";
        assert_eq!(evaluate(source), vec![]);
    }

    #[test]
    fn string_concatenation_cannot_be_evaluated() {
        assert_eq!(
            names_and_results("string s = \"Hello\";\nstring greet = s + \" World\";"),
            vec![(
                "greet".to_string(),
                Err(EvaluationError::UnknownToken("s".to_string()))
            )]
        );
    }

    #[test]
    fn assignment_without_name_is_skipped() {
        assert_eq!(evaluate("int = 1 + 2; (x) = 3 * 4;"), vec![]);
    }

    #[test]
    fn configuration_applies_to_every_statement() {
        let tokens = tokenize("x = 2 ^ 3 ^ 2; y = 2 ^ 2 ^ 0;");
        let config = ConverterConfig {
            exponent_associativity: Associativity::Right,
        };

        let statements = evaluate_statements(&tokens, &VariableTable::new(), &config);

        let results: Vec<_> = statements.into_iter().map(|s| s.result).collect();
        assert_eq!(results, vec![Ok(512.0), Ok(2.0)]);
    }
}
