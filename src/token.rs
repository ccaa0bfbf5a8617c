use std::fmt::Display;

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Literals
    Integer,
    Identifier,

    // Single-character tokens
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    Dot,
    Semicolon,

    // Two-character tokens
    Assign,

    // Keywords
    Begin,
    End,

    // End of file
    Eof,
}

impl TokenType {
    pub fn keyword(text: &str) -> Option<TokenType> {
        match text {
            "BEGIN" => Some(TokenType::Begin),
            "END" => Some(TokenType::End),
            _ => None,
        }
    }

    pub fn single_char(c: char) -> Option<TokenType> {
        match c {
            '+' => Some(TokenType::Plus),
            '-' => Some(TokenType::Minus),
            '*' => Some(TokenType::Star),
            '/' => Some(TokenType::Slash),
            '(' => Some(TokenType::LeftParen),
            ')' => Some(TokenType::RightParen),
            '.' => Some(TokenType::Dot),
            ';' => Some(TokenType::Semicolon),
            _ => None,
        }
    }
}

impl Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenType::Integer => "INTEGER",
            TokenType::Identifier => "IDENTIFIER",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Star => "*",
            TokenType::Slash => "/",
            TokenType::LeftParen => "(",
            TokenType::RightParen => ")",
            TokenType::Dot => ".",
            TokenType::Semicolon => ";",
            TokenType::Assign => ":=",
            TokenType::Begin => "BEGIN",
            TokenType::End => "END",
            TokenType::Eof => "EOF",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    Integer(i64),
    Text(String),
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::Integer(n) => Display::fmt(n, f),
            TokenValue::Text(s) => f.pad(s),
        }
    }
}

pub const EOF_MARKER: &str = "<EOF>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: TokenValue,
    pub span: Span,
}

impl Token {
    pub fn line(&self) -> usize {
        self.span.line()
    }

    pub fn column(&self) -> usize {
        self.span.column()
    }

    /// The text of an identifier, keyword or operator token.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(s) => Some(s),
            TokenValue::Integer(_) => None,
        }
    }

    pub fn integer(&self) -> Option<i64> {
        match self.value {
            TokenValue::Integer(n) => Some(n),
            TokenValue::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_exact() {
        assert_eq!(TokenType::keyword("BEGIN"), Some(TokenType::Begin));
        assert_eq!(TokenType::keyword("END"), Some(TokenType::End));
        assert_eq!(TokenType::keyword("begin"), None);
        assert_eq!(TokenType::keyword("BEGINNING"), None);
    }

    #[test]
    fn test_single_char() {
        assert_eq!(TokenType::single_char(';'), Some(TokenType::Semicolon));
        assert_eq!(TokenType::single_char(':'), None);
    }
}
