use crate::{
    span::{Position, Span},
    token::{Token, TokenType, TokenValue, EOF_MARKER},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("Unexpected character '{character}' at {position} (line {line}, column {column})")]
    UnexpectedCharacter {
        character: char,
        position: usize,
        line: usize,
        column: usize,
    },
    #[error("Integer literal {literal} is too large at {line},{column}")]
    IntegerOverflow {
        literal: String,
        line: usize,
        column: usize,
    },
}

/// Pull-based scanner. Each call to [`Lexer::next_token`] consumes exactly the
/// characters of one token; once the input is exhausted every call returns
/// an `Eof` token.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    remaining: &'a str,
    position: Position,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            remaining: source,
            position: Position::start(),
            finished: false,
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let start = self.position;
        let Some(c) = self.current() else {
            return Ok(Token {
                token_type: TokenType::Eof,
                value: TokenValue::Text(EOF_MARKER.to_string()),
                span: Span { start, end: start },
            });
        };

        if c.is_ascii_alphabetic() {
            return Ok(self.identifier(start));
        }

        if c == ':' && self.peek() == Some('=') {
            self.advance();
            self.advance();
            return Ok(self.make(TokenType::Assign, TokenValue::Text(":=".to_string()), start));
        }

        if let Some(token_type) = TokenType::single_char(c) {
            self.advance();
            return Ok(self.make(token_type, TokenValue::Text(c.to_string()), start));
        }

        if c.is_ascii_digit() {
            return self.integer(start);
        }

        Err(LexError::UnexpectedCharacter {
            character: c,
            position: start.offset + 1,
            line: start.line,
            column: start.column,
        })
    }

    fn current(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    fn peek(&self) -> Option<char> {
        self.remaining.chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.remaining = &self.remaining[c.len_utf8()..];
        self.position.advance(c);
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(' ' | '\t' | '\n' | '\r')) {
            self.advance();
        }
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let rest = self.remaining;
        let len: usize = rest
            .chars()
            .take_while(|c| predicate(*c))
            .map(char::len_utf8)
            .sum();
        for _ in rest[..len].chars() {
            self.advance();
        }
        &rest[..len]
    }

    fn identifier(&mut self, start: Position) -> Token {
        let text = self.take_while(|c| c.is_ascii_alphanumeric());
        let token_type = TokenType::keyword(text).unwrap_or(TokenType::Identifier);
        self.make(token_type, TokenValue::Text(text.to_string()), start)
    }

    fn integer(&mut self, start: Position) -> Result<Token, LexError> {
        let digits = self.take_while(|c| c.is_ascii_digit());
        let value = digits.parse().map_err(|_| LexError::IntegerOverflow {
            literal: digits.to_string(),
            line: start.line,
            column: start.column,
        })?;
        Ok(self.make(TokenType::Integer, TokenValue::Integer(value), start))
    }

    fn make(&self, token_type: TokenType, value: TokenValue, start: Position) -> Token {
        Token {
            token_type,
            value,
            span: Span {
                start,
                end: self.position,
            },
        }
    }
}

/// Yields every token up to and including the first `Eof`, or up to the first
/// error.
impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        match &result {
            Ok(token) if token.token_type == TokenType::Eof => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_types(source: &str) -> Vec<TokenType> {
        Lexer::new(source)
            .map(|token| token.unwrap().token_type)
            .collect()
    }

    #[test]
    fn test_tokens() {
        let expected = vec![
            TokenType::Begin,
            TokenType::Identifier,
            TokenType::Assign,
            TokenType::Integer,
            TokenType::Plus,
            TokenType::LeftParen,
            TokenType::Integer,
            TokenType::Star,
            TokenType::Identifier,
            TokenType::RightParen,
            TokenType::Semicolon,
            TokenType::End,
            TokenType::Dot,
            TokenType::Eof,
        ];
        assert_eq!(token_types("BEGIN x := 1 + (2 * y); END."), expected);
    }

    #[test]
    fn test_token_values() {
        let mut lexer = Lexer::new("abc1 := 42 /");
        assert_eq!(lexer.next_token().unwrap().text(), Some("abc1"));
        assert_eq!(lexer.next_token().unwrap().text(), Some(":="));
        assert_eq!(lexer.next_token().unwrap().integer(), Some(42));
        assert_eq!(lexer.next_token().unwrap().text(), Some("/"));
        assert_eq!(lexer.next_token().unwrap().text(), Some(EOF_MARKER));
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let mut lexer = Lexer::new("BEGINNING ENDS begin");
        for expected in ["BEGINNING", "ENDS", "begin"] {
            let token = lexer.next_token().unwrap();
            assert_eq!(token.token_type, TokenType::Identifier);
            assert_eq!(token.text(), Some(expected));
        }
        assert_eq!(lexer.next_token().unwrap().token_type, TokenType::Eof);
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("  \n\t ");
        for _ in 0..3 {
            assert_eq!(lexer.next_token().unwrap().token_type, TokenType::Eof);
        }
    }

    #[test]
    fn test_line_and_column() {
        let mut lexer = Lexer::new("BEGIN\n  x := 10\nEND.");
        let positions: Vec<(usize, usize)> = std::iter::from_fn(|| {
            let token = lexer.next_token().unwrap();
            (token.token_type != TokenType::Eof).then(|| (token.line(), token.column()))
        })
        .collect();
        assert_eq!(
            positions,
            vec![(1, 1), (2, 3), (2, 5), (2, 8), (3, 1), (3, 4)]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let mut lexer = Lexer::new("x := #");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        assert_eq!(
            lexer.next_token(),
            Err(LexError::UnexpectedCharacter {
                character: '#',
                position: 6,
                line: 1,
                column: 6,
            })
        );
    }

    #[test]
    fn test_lone_colon_is_rejected() {
        let mut lexer = Lexer::new(": =");
        assert!(matches!(
            lexer.next_token(),
            Err(LexError::UnexpectedCharacter { character: ':', .. })
        ));
    }

    #[test]
    fn test_integer_overflow() {
        let mut lexer = Lexer::new("99999999999999999999");
        assert!(matches!(
            lexer.next_token(),
            Err(LexError::IntegerOverflow { .. })
        ));
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let results: Vec<_> = Lexer::new("1 @ 2").collect();
        assert_eq!(results.len(), 2);
        assert!(results[1].is_err());
    }
}
