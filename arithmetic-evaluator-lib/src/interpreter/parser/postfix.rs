use crate::interpreter::operator::BinaryOperator;
use itertools::Itertools;
use std::convert::Infallible;
use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;

/// An element of a postfix sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum PostfixToken {
    /// A number literal or variable name, kept as written.
    Operand(String),
    Operator(BinaryOperator),
}

impl PostfixToken {
    /// Classifies the text of a single postfix element.
    pub fn from_text(text: &str) -> PostfixToken {
        match text.parse::<BinaryOperator>() {
            Ok(operator) => PostfixToken::Operator(operator),
            Err(_) => PostfixToken::Operand(text.to_string()),
        }
    }
}

impl fmt::Display for PostfixToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PostfixToken::Operand(text) => write!(f, "{}", text),
            PostfixToken::Operator(operator) => write!(f, "{}", operator),
        }
    }
}

/// An expression in postfix (reverse Polish) order.
///
/// Renders as its elements separated by single spaces, and parses back from
/// that form without loss since no element contains whitespace.
///
/// # Examples
///
/// ```
/// use arithmetic_evaluator::interpreter::parser::postfix::Postfix;
///
/// let postfix: Postfix = "3 4 2 * +".parse().unwrap();
/// assert_eq!(postfix.len(), 5);
/// assert_eq!(postfix.to_string(), "3 4 2 * +");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Postfix {
    tokens: Vec<PostfixToken>,
}

impl Postfix {
    pub fn new(tokens: Vec<PostfixToken>) -> Postfix {
        Postfix { tokens }
    }

    pub fn tokens(&self) -> &[PostfixToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn texts(&self) -> Vec<String> {
        self.tokens.iter().map(ToString::to_string).collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Postfix {
    fn from_iter<I: IntoIterator<Item = S>>(texts: I) -> Self {
        let tokens = texts
            .into_iter()
            .map(|text| PostfixToken::from_text(text.as_ref()))
            .collect();
        Postfix::new(tokens)
    }
}

impl FromStr for Postfix {
    type Err = Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(text.split_whitespace().collect())
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.iter().join(" "))
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a PostfixToken;
    type IntoIter = std::slice::Iter<'a, PostfixToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
