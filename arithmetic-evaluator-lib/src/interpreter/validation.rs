use crate::interpreter::token::{Token, TokenKind};
use itertools::Itertools;
use log::debug;
use thiserror::Error;

/// Delimiters the dialect knows. Any other lone character is rejected.
pub static KNOWN_DELIMITERS: [&str; 9] = [";", ",", "(", ")", "{", "}", "[", "]", "'"];

/// A problem found in the source before evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("Error on line {line}: Missing semicolon at the end of the line")]
    MissingSemicolon { line: usize },

    #[error("Error on line {line}: Invalid variable declaration `{name}`")]
    InvalidVariableName { line: usize, name: String },

    #[error("Error on line {line}: Empty variable name")]
    EmptyVariableName { line: usize },

    #[error("Error on line {line}: Invalid character `{character}` at column {column}")]
    InvalidCharacter {
        line: usize,
        column: usize,
        character: String,
    },
}

impl Diagnostic {
    pub fn line(&self) -> usize {
        match self {
            Diagnostic::MissingSemicolon { line }
            | Diagnostic::InvalidVariableName { line, .. }
            | Diagnostic::EmptyVariableName { line }
            | Diagnostic::InvalidCharacter { line, .. } => *line,
        }
    }
}

/// Checks every source line for malformed declarations and unknown characters.
///
/// Lines are checked independently, so a declaration split over several lines is
/// reported as missing its semicolon.
///
/// # Arguments
///
/// * `tokens`: The whole token stream, as produced by the lexer.
///
/// returns: Every problem found, in source order. Empty when the input is well formed.
///
/// # Examples
///
/// ```
/// use arithmetic_evaluator::interpreter::lexer::tokenize;
/// use arithmetic_evaluator::interpreter::validation::{validate, Diagnostic};
///
/// assert!(validate(&tokenize("int a = 5;")).is_empty());
/// assert_eq!(
///     validate(&tokenize("int a = 5")),
///     vec![Diagnostic::MissingSemicolon { line: 1 }]
/// );
/// ```
pub fn validate(tokens: &[Token]) -> Vec<Diagnostic> {
    let mut diagnostics = vec![];

    let lines = tokens
        .iter()
        .filter(|token| !token.is_end_of_input())
        .group_by(|token| token.line);
    for (line, group) in &lines {
        let line_tokens: Vec<&Token> = group.collect();
        check_characters(&line_tokens, &mut diagnostics);
        check_declaration(line, &line_tokens, &mut diagnostics);
    }

    debug!("Validation found {} problems", diagnostics.len());
    diagnostics
}

fn check_characters(line_tokens: &[&Token], diagnostics: &mut Vec<Diagnostic>) {
    for token in line_tokens {
        if token.kind == TokenKind::Delimiter && !KNOWN_DELIMITERS.contains(&token.text.as_str())
        {
            diagnostics.push(Diagnostic::InvalidCharacter {
                line: token.line,
                column: token.column,
                character: token.text.clone(),
            });
        }
    }
}

fn check_declaration(line: usize, line_tokens: &[&Token], diagnostics: &mut Vec<Diagnostic>) {
    let starts_with_type = line_tokens
        .first()
        .map_or(false, |token| token.is_type_keyword());
    let assignment = line_tokens.iter().position(|token| token.is_operator("="));
    let assignment = match (starts_with_type, assignment) {
        (true, Some(position)) => position,
        _ => return,
    };

    if !line_tokens
        .last()
        .map_or(false, |token| token.is_delimiter(";"))
    {
        diagnostics.push(Diagnostic::MissingSemicolon { line });
    }

    match &line_tokens[1..assignment] {
        [] => diagnostics.push(Diagnostic::EmptyVariableName { line }),
        [name] if name.kind == TokenKind::Identifier => {}
        name => diagnostics.push(Diagnostic::InvalidVariableName {
            line,
            name: name.iter().map(|token| token.text.as_str()).join(" "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;
    use parameterized_macro::parameterized;

    fn check(source: &str) -> Vec<Diagnostic> {
        validate(&tokenize(source))
    }

    #[parameterized(source = {
        "int a = 5;",
        "char c = 'A';\nstring s = \"Hi; there\";",
        "x = (2 + 3) * 4;",
        "cout << sum << endl",
        "float f = 2.5; // no semicolon needed in here",
        "",
    })]
    fn well_formed_source_has_no_diagnostics(source: &str) {
        assert_eq!(check(source), vec![]);
    }

    #[test]
    fn declaration_without_semicolon_is_reported() {
        assert_eq!(
            check("int a = 5;\nint b = 10\nint c = 1;"),
            vec![Diagnostic::MissingSemicolon { line: 2 }]
        );
    }

    #[test]
    fn declaration_without_name_is_reported() {
        assert_eq!(
            check("int = 5;"),
            vec![Diagnostic::EmptyVariableName { line: 1 }]
        );
    }

    #[parameterized(
        source = { "int 2x = 5;", "float for = 1.5;", "double my value = 1;" },
        expected_name = { "2 x", "for", "my value" }
    )]
    fn declaration_with_invalid_name_is_reported(source: &str, expected_name: &str) {
        assert_eq!(
            check(source),
            vec![Diagnostic::InvalidVariableName {
                line: 1,
                name: expected_name.to_string(),
            }]
        );
    }

    #[test]
    fn unknown_characters_are_reported_with_position() {
        assert_eq!(
            check("int a = 5;\nint b = a ` 2;"),
            vec![Diagnostic::InvalidCharacter {
                line: 2,
                column: 11,
                character: "`".to_string(),
            }]
        );
    }

    #[test]
    fn characters_inside_strings_and_comments_are_not_checked() {
        assert_eq!(check("string s = \"`\"; /* ` */ // `"), vec![]);
    }

    #[test]
    fn every_problem_of_a_line_is_reported() {
        let diagnostics = check("int = 5 `");

        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::InvalidCharacter {
                    line: 1,
                    column: 9,
                    character: "`".to_string(),
                },
                Diagnostic::MissingSemicolon { line: 1 },
                Diagnostic::EmptyVariableName { line: 1 },
            ]
        );
        assert!(diagnostics.iter().all(|diagnostic| diagnostic.line() == 1));
    }

    #[test]
    fn diagnostic_message_names_the_line() {
        assert_eq!(
            Diagnostic::MissingSemicolon { line: 3 }.to_string(),
            "Error on line 3: Missing semicolon at the end of the line"
        );
    }
}
