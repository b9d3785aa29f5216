use std::fmt;
use std::fmt::Formatter;

/// Reserved words of the accepted C-like dialect.
pub static KEYWORDS: [&str; 14] = [
    "int", "float", "double", "char", "string", "bool", "if", "else", "for", "while", "return",
    "cout", "cin", "endl",
];

/// Keywords that name a type and therefore start a declaration.
pub static TYPE_KEYWORDS: [&str; 6] = ["int", "float", "double", "char", "string", "bool"];

/// Characters that begin an operator token.
pub static OPERATOR_SYMBOLS: [char; 19] = [
    '+', '-', '*', '/', '%', '=', '<', '>', '!', '&', '|', '^', '~', '.', ':', '?', '#', '@', '$',
];

/// Operators spelled with two characters. Every other operator is a single character.
pub static DOUBLE_CHARACTER_OPERATORS: [&str; 10] =
    ["++", "--", "==", "!=", "<<", ">>", "<=", ">=", "&&", "||"];

/// The lexical class of a token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    Operator,
    Delimiter,
    String,
    EndOfInput,
}

/// A discrete, classified part of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line the token starts on.
    pub line: usize,
    /// 1-based column the token starts at.
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Token {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    pub fn is_type_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword && is_type_keyword(&self.text)
    }

    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == symbol
    }

    pub fn is_delimiter(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Delimiter && self.text == symbol
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

pub fn is_type_keyword(word: &str) -> bool {
    TYPE_KEYWORDS.contains(&word)
}

pub fn is_operator_symbol(symbol: char) -> bool {
    OPERATOR_SYMBOLS.contains(&symbol)
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::Number => "Number",
            TokenKind::Operator => "Operator",
            TokenKind::Delimiter => "Delimiter",
            TokenKind::String => "String",
            TokenKind::EndOfInput => "EOF",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_keyword_is_a_keyword() {
        assert!(TYPE_KEYWORDS.iter().all(|word| is_keyword(word)))
    }

    #[test]
    fn control_keywords_are_not_type_keywords() {
        let token = Token::new(TokenKind::Keyword, "while", 1, 1);
        assert!(!token.is_type_keyword())
    }

    #[test]
    fn identifier_named_like_a_type_is_not_a_type_keyword() {
        let token = Token::new(TokenKind::Identifier, "int", 1, 1);
        assert!(!token.is_type_keyword())
    }

    #[test]
    fn double_character_operators_start_with_operator_symbols() {
        assert!(DOUBLE_CHARACTER_OPERATORS
            .iter()
            .filter_map(|operator| operator.chars().next())
            .all(is_operator_symbol))
    }
}
