use crate::{
    ast::{Expression, InfixOperator, Statement, UnaryOperator, Var},
    lexer::{LexError, Lexer},
    token::{Token, TokenType},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("Expected \"{expected}\" but found \"{found}\" at {line},{column}")]
    Expected {
        expected: TokenType,
        found: TokenType,
        line: usize,
        column: usize,
    },
    #[error("Unexpected identifier \"{name}\" at {line},{column}, missing ';'?")]
    UnexpectedIdentifier {
        name: String,
        line: usize,
        column: usize,
    },
    #[error("Expected end of input after '.' but found \"{found}\" at {line},{column}")]
    TrailingInput {
        found: TokenType,
        line: usize,
        column: usize,
    },
}

/// Recursive-descent parser with one token of lookahead, pulling tokens from
/// the lexer as it goes.
///
/// ```text
/// program           := compound_statement '.'
/// compound_statement:= BEGIN statement_list END
/// statement_list    := statement (';' statement)*
/// statement         := compound_statement | assignment | empty
/// assignment        := variable ':=' expr
/// expr              := term (('+' | '-') term)*
/// term              := factor (('*' | '/') factor)*
/// factor            := ('+' | '-') factor | INTEGER | '(' expr ')' | variable
/// ```
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, ParseError> {
        let current_token = pull(&mut lexer)?;
        Ok(Self {
            lexer,
            current_token,
        })
    }

    /// Parses the whole program. The input must end right after the final '.'.
    pub fn parse(mut self) -> Result<Statement, ParseError> {
        let program = self.program()?;

        if self.current_token.token_type != TokenType::Eof {
            return Err(ParseError::TrailingInput {
                found: self.current_token.token_type,
                line: self.current_token.line(),
                column: self.current_token.column(),
            });
        }

        Ok(program)
    }

    fn eat(&mut self, token_type: TokenType) -> Result<Token, ParseError> {
        if self.current_token.token_type != token_type {
            return Err(ParseError::Expected {
                expected: token_type,
                found: self.current_token.token_type,
                line: self.current_token.line(),
                column: self.current_token.column(),
            });
        }

        let next = pull(&mut self.lexer)?;
        Ok(std::mem::replace(&mut self.current_token, next))
    }

    fn program(&mut self) -> Result<Statement, ParseError> {
        let node = self.compound_statement()?;
        self.eat(TokenType::Dot)?;
        Ok(node)
    }

    fn compound_statement(&mut self) -> Result<Statement, ParseError> {
        self.eat(TokenType::Begin)?;
        let statements = self.statement_list()?;
        self.eat(TokenType::End)?;
        Ok(Statement::Compound(statements))
    }

    fn statement_list(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = vec![self.statement()?];

        while self.current_token.token_type == TokenType::Semicolon {
            self.eat(TokenType::Semicolon)?;
            statements.push(self.statement()?);
        }

        // An identifier here means two statements with no ';' between them.
        if self.current_token.token_type == TokenType::Identifier {
            return Err(ParseError::UnexpectedIdentifier {
                name: self.current_token.value.to_string(),
                line: self.current_token.line(),
                column: self.current_token.column(),
            });
        }

        Ok(statements)
    }

    fn statement(&mut self) -> Result<Statement, ParseError> {
        match self.current_token.token_type {
            TokenType::Begin => self.compound_statement(),
            TokenType::Identifier => self.assignment(),
            _ => Ok(Statement::NoOp),
        }
    }

    fn assignment(&mut self) -> Result<Statement, ParseError> {
        let target = self.variable()?;
        let token = self.eat(TokenType::Assign)?;
        let value = self.expr()?;
        Ok(Statement::Assign {
            target,
            token,
            value,
        })
    }

    fn variable(&mut self) -> Result<Var, ParseError> {
        let token = self.eat(TokenType::Identifier)?;
        let name = token.value.to_string();
        Ok(Var { token, name })
    }

    fn binary(
        &mut self,
        operand: fn(&mut Self) -> Result<Expression, ParseError>,
        operator: fn(TokenType) -> Option<InfixOperator>,
    ) -> Result<Expression, ParseError> {
        let mut node = operand(self)?;

        while let Some(op) = operator(self.current_token.token_type) {
            let token = self.eat(self.current_token.token_type)?;
            let right = operand(self)?;
            node = Expression::BinaryOp {
                left: Box::new(node),
                op,
                token,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn expr(&mut self) -> Result<Expression, ParseError> {
        self.binary(Self::term, |token_type| match token_type {
            TokenType::Plus => Some(InfixOperator::Plus),
            TokenType::Minus => Some(InfixOperator::Minus),
            _ => None,
        })
    }

    fn term(&mut self) -> Result<Expression, ParseError> {
        self.binary(Self::factor, |token_type| match token_type {
            TokenType::Star => Some(InfixOperator::Multiply),
            TokenType::Slash => Some(InfixOperator::Divide),
            _ => None,
        })
    }

    fn factor(&mut self) -> Result<Expression, ParseError> {
        let op = match self.current_token.token_type {
            TokenType::Plus => UnaryOperator::Plus,
            TokenType::Minus => UnaryOperator::Negate,
            TokenType::Integer => {
                let token = self.eat(TokenType::Integer)?;
                let value = token.integer().unwrap_or_default();
                return Ok(Expression::Numeric { token, value });
            }
            TokenType::LeftParen => {
                self.eat(TokenType::LeftParen)?;
                let node = self.expr()?;
                self.eat(TokenType::RightParen)?;
                return Ok(node);
            }
            _ => return Ok(Expression::Var(self.variable()?)),
        };

        let token = self.eat(self.current_token.token_type)?;
        let operand = self.factor()?;
        Ok(Expression::UnaryOp {
            op,
            token,
            operand: Box::new(operand),
        })
    }
}

fn pull(lexer: &mut Lexer<'_>) -> Result<Token, ParseError> {
    let token = lexer.next_token()?;
    #[cfg(feature = "dump-tokens")]
    eprintln!(
        "{:4}:{:<3} {:<10} {}",
        token.line(),
        token.column(),
        token.token_type,
        token.value
    );
    Ok(token)
}
