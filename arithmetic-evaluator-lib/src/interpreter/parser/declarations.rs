use crate::interpreter::token::{Token, TokenKind};
use log::trace;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fmt::Formatter;

/// Initializer text used when a declaration has no usable initializer.
pub const DEFAULT_LITERAL: &str = "0";

/// The typed meaning of a declared variable's initializer.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableValue {
    Number(f64),
    /// A string literal, or a number literal that does not parse (such as `1.2.3`).
    Text(String),
    /// The name of another variable, as in `int b = a;`.
    Reference(String),
}

impl VariableValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            VariableValue::Number(value) => Some(*value),
            VariableValue::Text(_) | VariableValue::Reference(_) => None,
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        self.as_number().is_some()
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Number(_) => write!(f, "number"),
            VariableValue::Text(_) => write!(f, "string/char"),
            VariableValue::Reference(_) => write!(f, "variable"),
        }
    }
}

/// A declared variable: the initializer as written, and what it means.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub literal: String,
    pub value: VariableValue,
}

impl Variable {
    /// Builds a variable from the token following `=` in a declaration.
    ///
    /// Anything other than a number, string or identifier falls back to the default.
    pub fn from_initializer(token: &Token) -> Variable {
        let literal = token.text.clone();
        let value = match token.kind {
            TokenKind::Number => match literal.parse::<f64>() {
                Ok(number) => VariableValue::Number(number),
                Err(_) => VariableValue::Text(literal.clone()),
            },
            TokenKind::String => VariableValue::Text(literal.clone()),
            TokenKind::Identifier => VariableValue::Reference(literal.clone()),
            _ => return Variable::default(),
        };
        Variable { literal, value }
    }
}

impl Default for Variable {
    fn default() -> Self {
        Variable {
            literal: DEFAULT_LITERAL.to_string(),
            value: VariableValue::Number(0.0),
        }
    }
}

/// Declared variables by name, iterated in name order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariableTable {
    variables: BTreeMap<String, Variable>,
}

impl VariableTable {
    pub fn new() -> VariableTable {
        VariableTable::default()
    }

    /// Records a declaration, replacing any earlier one with the same name.
    /// Empty names are ignored.
    pub fn insert(&mut self, name: impl Into<String>, variable: Variable) {
        let name = name.into();
        if name.is_empty() {
            return;
        }
        self.variables.insert(name, variable);
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Variable)> {
        self.variables.iter()
    }

    /// The numeric variables, ready to be bound for evaluation.
    pub fn numeric_bindings(&self) -> HashMap<String, f64> {
        self.variables
            .iter()
            .filter_map(|(name, variable)| {
                variable
                    .value
                    .as_number()
                    .map(|value| (name.clone(), value))
            })
            .collect()
    }

    /// The variables that cannot take part in arithmetic.
    pub fn non_numeric(&self) -> impl Iterator<Item = (&String, &Variable)> {
        self.variables
            .iter()
            .filter(|(_, variable)| !variable.value.is_arithmetic())
    }
}

/// Collects every `<type> <name> = <initializer>` declaration in the token stream.
///
/// A type keyword followed by an identifier always declares that identifier. When the
/// `= <number | string | identifier>` part is missing or malformed, the variable gets
/// the default initializer `"0"`.
///
/// # Arguments
///
/// * `tokens`: The whole token stream, as produced by the lexer.
///
/// returns: The declared variables.
pub fn collect_declarations(tokens: &[Token]) -> VariableTable {
    let mut table = VariableTable::new();

    for (index, token) in tokens.iter().enumerate() {
        if token.is_end_of_input() {
            break;
        }
        if !token.is_type_keyword() {
            continue;
        }
        let name = match tokens.get(index + 1) {
            Some(next) if next.kind == TokenKind::Identifier => &next.text,
            _ => continue,
        };

        let variable = match (tokens.get(index + 2), tokens.get(index + 3)) {
            (Some(assignment), Some(initializer)) if assignment.is_operator("=") => {
                Variable::from_initializer(initializer)
            }
            _ => Variable::default(),
        };

        trace!("Declared {} = {} ({})", name, variable.literal, variable.value);
        table.insert(name.as_str(), variable);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn literals(table: &VariableTable) -> Vec<(String, String)> {
        table
            .iter()
            .map(|(name, variable)| (name.clone(), variable.literal.clone()))
            .collect()
    }

    #[test]
    fn declarations_are_collected_from_whole_program() {
        let source = "int a = 5;\nfloat f = 2.5;\nstring s = \"Hello\";\nint b = a;\nint sum = a + b;";

        let table = collect_declarations(&tokenize(source));

        assert_eq!(
            literals(&table),
            vec![
                ("a".to_string(), "5".to_string()),
                ("b".to_string(), "a".to_string()),
                ("f".to_string(), "2.5".to_string()),
                ("s".to_string(), "Hello".to_string()),
                ("sum".to_string(), "a".to_string()),
            ]
        )
    }

    #[test]
    fn initializers_are_typed() {
        let table = collect_declarations(&tokenize("double d = 35.735; string s = \"x\"; int b = d;"));

        assert_eq!(table.get("d").unwrap().value, VariableValue::Number(35.735));
        assert_eq!(table.get("s").unwrap().value, VariableValue::Text("x".to_string()));
        assert_eq!(table.get("b").unwrap().value, VariableValue::Reference("d".to_string()));
    }

    #[test]
    fn malformed_number_is_kept_as_text() {
        let table = collect_declarations(&tokenize("float f = 1.2.3;"));
        assert_eq!(table.get("f").unwrap().value, VariableValue::Text("1.2.3".to_string()));
    }

    #[test]
    fn declaration_without_initializer_defaults_to_zero() {
        let table = collect_declarations(&tokenize("int count;"));
        assert_eq!(table.get("count"), Some(&Variable::default()));
        assert_eq!(table.get("count").unwrap().literal, "0");
    }

    #[test]
    fn unsupported_initializer_defaults_to_zero() {
        let table = collect_declarations(&tokenize("char c = 'A';"));
        assert_eq!(table.get("c").unwrap().literal, DEFAULT_LITERAL);
    }

    #[test]
    fn declaration_cut_short_by_end_of_input_defaults_to_zero() {
        let table = collect_declarations(&tokenize("int x ="));
        assert_eq!(table.get("x").unwrap().literal, DEFAULT_LITERAL);
    }

    #[test]
    fn later_declaration_overwrites_earlier_one() {
        let table = collect_declarations(&tokenize("int a = 1; int a = 2;"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a").unwrap().literal, "2");
    }

    #[test]
    fn type_keyword_without_identifier_declares_nothing() {
        let table = collect_declarations(&tokenize("int = 5; return 3;"));
        assert!(table.is_empty());
    }

    #[test]
    fn only_numeric_variables_are_bound() {
        let table = collect_declarations(&tokenize("int a = 5; string s = \"Hi\"; int b = a;"));

        let bindings = table.numeric_bindings();
        let non_numeric: Vec<&str> = table.non_numeric().map(|(name, _)| name.as_str()).collect();

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.get("a"), Some(&5.0));
        assert_eq!(non_numeric, vec!["b", "s"]);
    }

    #[test]
    fn empty_names_are_ignored() {
        let mut table = VariableTable::new();
        table.insert("", Variable::default());
        assert!(table.is_empty());
    }
}
