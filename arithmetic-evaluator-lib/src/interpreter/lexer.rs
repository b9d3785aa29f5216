use crate::interpreter::token::{
    is_keyword, is_operator_symbol, Token, TokenKind, DOUBLE_CHARACTER_OPERATORS,
};
use log::{debug, trace};

/// Splits the given source text into a flat sequence of classified tokens.
///
/// Never fails: every character ends up in a token or a comment, and the
/// sequence always ends with exactly one [`TokenKind::EndOfInput`] token.
///
/// # Arguments
///
/// * `source`: The C-like source text to scan.
///
/// returns: The tokens in source order.
///
/// # Examples
///
/// ```
/// use arithmetic_evaluator::interpreter::lexer::tokenize;
/// use arithmetic_evaluator::interpreter::token::TokenKind;
///
/// let tokens = tokenize("int a = 5;");
/// let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::Keyword,
///         TokenKind::Identifier,
///         TokenKind::Operator,
///         TokenKind::Number,
///         TokenKind::Delimiter,
///         TokenKind::EndOfInput,
///     ]
/// );
/// ```
pub fn tokenize(source: &str) -> Vec<Token> {
    let tokens: Vec<Token> = Lexer::new(source).collect();
    debug!(
        "Tokenized {} bytes of source into {} tokens",
        source.len(),
        tokens.len()
    );
    tokens
}

/// A single forward scan over some source text.
///
/// Iterating yields every token, the last one being the end-of-input token.
pub struct Lexer<'a> {
    source: &'a str,
    position: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            position: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut rest = self.source[self.position..].chars();
        rest.next();
        rest.next()
    }

    fn advance(&mut self) -> Option<char> {
        let current = self.peek()?;
        self.position += current.len_utf8();
        if current == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(current)
    }

    /// Consumes characters as long as they match, returning the consumed slice.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.position;
        while let Some(current) = self.peek() {
            if !predicate(current) {
                break;
            }
            self.advance();
        }
        &self.source[start..self.position]
    }

    fn skip_whitespace(&mut self) {
        self.advance_while(char::is_whitespace);
    }

    fn skip_line_comment(&mut self) {
        self.advance_while(|current| current != '\n');
    }

    fn skip_block_comment(&mut self) {
        self.advance(); // '/'
        self.advance(); // '*'
        while let Some(current) = self.advance() {
            if current == '*' && self.peek() == Some('/') {
                self.advance();
                break;
            }
        }
    }

    fn read_number(&mut self, line: usize, column: usize) -> Token {
        let text = self.advance_while(|current| current.is_ascii_digit() || current == '.');
        Token::new(TokenKind::Number, text, line, column)
    }

    fn read_identifier(&mut self, line: usize, column: usize) -> Token {
        let text =
            self.advance_while(|current| current.is_ascii_alphanumeric() || current == '_');
        let kind = if is_keyword(text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, text, line, column)
    }

    fn read_string(&mut self, line: usize, column: usize) -> Token {
        self.advance(); // opening quote
        let mut text = String::new();
        loop {
            match self.advance() {
                None | Some('"') => break,
                Some('\\') => {
                    if let Some(escaped) = self.advance() {
                        text.push(escaped);
                    }
                }
                Some(current) => text.push(current),
            }
        }
        Token::new(TokenKind::String, text, line, column)
    }

    fn read_operator(&mut self, line: usize, column: usize) -> Token {
        let start = self.position;
        self.advance();
        if let (Some(first), Some(second)) = (self.source[start..].chars().next(), self.peek()) {
            let pair: String = [first, second].iter().collect();
            if DOUBLE_CHARACTER_OPERATORS.contains(&pair.as_str()) {
                self.advance();
            }
        }
        Token::new(
            TokenKind::Operator,
            &self.source[start..self.position],
            line,
            column,
        )
    }

    fn read_delimiter(&mut self, line: usize, column: usize) -> Token {
        let start = self.position;
        self.advance();
        Token::new(
            TokenKind::Delimiter,
            &self.source[start..self.position],
            line,
            column,
        )
    }

    fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            let (line, column) = (self.line, self.column);

            let current = match self.peek() {
                None => return Token::new(TokenKind::EndOfInput, "", line, column),
                Some(current) => current,
            };

            match current {
                '0'..='9' => return self.read_number(line, column),
                'a'..='z' | 'A'..='Z' | '_' => return self.read_identifier(line, column),
                '"' => return self.read_string(line, column),
                '/' if self.peek_next() == Some('/') => self.skip_line_comment(),
                '/' if self.peek_next() == Some('*') => self.skip_block_comment(),
                symbol if is_operator_symbol(symbol) => return self.read_operator(line, column),
                _ => return self.read_delimiter(line, column),
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        trace!(
            "{}:{} {} `{}`",
            token.line,
            token.column,
            token.kind,
            token.text
        );
        self.finished = token.is_end_of_input();
        Some(token)
    }
}
