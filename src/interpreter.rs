mod scope;

use std::fmt::Debug;

use crate::{
    ast::{Expression, InfixOperator, Statement, UnaryOperator},
    parser::{ParseError, Parser},
    token::Token,
};

pub use self::scope::GlobalScope;

#[derive(Debug, thiserror::Error)]
pub enum InterpretError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    #[error("Program has already been interpreted")]
    AlreadyInterpreted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    #[error("Undefined variable \"{name}\" at {line},{column}")]
    UndefinedVariable {
        name: String,
        line: usize,
        column: usize,
    },
    #[error("Division by zero at {line},{column}")]
    DivisionByZero { line: usize, column: usize },
    #[error("Integer overflow evaluating {operation} at {line},{column}")]
    Overflow {
        operation: String,
        line: usize,
        column: usize,
    },
}

/// Walks a parsed program and records every assignment in its global scope.
///
/// The program is parsed lazily by [`Interpreter::interpret`], exactly once.
pub struct Interpreter<'a> {
    parser: Option<Parser<'a>>,
    scope: GlobalScope,
}

impl Debug for Interpreter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("scope", &self.scope)
            .finish()
    }
}

impl<'a> Interpreter<'a> {
    pub fn new(parser: Parser<'a>) -> Self {
        Self::with_scope(parser, GlobalScope::new())
    }

    /// Runs the program on top of an existing scope instead of an empty one.
    pub fn with_scope(parser: Parser<'a>, scope: GlobalScope) -> Self {
        Self {
            parser: Some(parser),
            scope,
        }
    }

    pub fn interpret(&mut self) -> Result<(), InterpretError> {
        let parser = self
            .parser
            .take()
            .ok_or(InterpretError::AlreadyInterpreted)?;
        let program = parser.parse()?;
        self.execute(&program)?;
        Ok(())
    }

    pub fn global_scope(&self) -> &GlobalScope {
        &self.scope
    }

    pub fn into_global_scope(self) -> GlobalScope {
        self.scope
    }

    pub fn execute(&mut self, statement: &Statement) -> Result<(), ExecutionError> {
        match statement {
            Statement::Compound(statements) => {
                for statement in statements {
                    self.execute(statement)?;
                }
            }
            Statement::Assign { target, value, .. } => {
                let value = self.evaluate(value)?;
                #[cfg(feature = "trace")]
                eprintln!("{} := {}", target.name, value);
                self.scope.assign(&target.name, value);
            }
            Statement::NoOp => {}
        }

        Ok(())
    }

    pub fn evaluate(&self, expression: &Expression) -> Result<i64, ExecutionError> {
        match expression {
            Expression::Numeric { value, .. } => Ok(*value),
            Expression::Var(var) => {
                self.scope
                    .get(&var.name)
                    .ok_or_else(|| ExecutionError::UndefinedVariable {
                        name: var.name.clone(),
                        line: var.token.line(),
                        column: var.token.column(),
                    })
            }
            Expression::UnaryOp { op, token, operand } => {
                let operand = self.evaluate(operand)?;
                match op {
                    UnaryOperator::Plus => Ok(operand),
                    UnaryOperator::Negate => operand
                        .checked_neg()
                        .ok_or_else(|| overflow(token, format!("-({operand})"))),
                }
            }
            Expression::BinaryOp {
                left,
                op,
                token,
                right,
            } => {
                let a = self.evaluate(left)?;
                let b = self.evaluate(right)?;
                let result = match op {
                    InfixOperator::Plus => a.checked_add(b),
                    InfixOperator::Minus => a.checked_sub(b),
                    InfixOperator::Multiply => a.checked_mul(b),
                    InfixOperator::Divide => {
                        if b == 0 {
                            return Err(ExecutionError::DivisionByZero {
                                line: token.line(),
                                column: token.column(),
                            });
                        }
                        a.checked_div(b)
                    }
                };
                result.ok_or_else(|| overflow(token, format!("{a} {op} {b}")))
            }
        }
    }
}

fn overflow(token: &Token, operation: String) -> ExecutionError {
    ExecutionError::Overflow {
        operation,
        line: token.line(),
        column: token.column(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn run(source: &str) -> Result<GlobalScope, InterpretError> {
        let mut interpreter = Interpreter::new(Parser::new(Lexer::new(source))?);
        interpreter.interpret()?;
        Ok(interpreter.into_global_scope())
    }

    fn value_of(source: &str, name: &str) -> Option<i64> {
        run(source).unwrap().get(name)
    }

    #[test]
    fn test_literal_assignment() {
        for literal in [0, 1, 42, 9223372036854775807] {
            let source = format!("BEGIN x := {literal} END.");
            assert_eq!(value_of(&source, "x"), Some(literal));
        }
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(value_of("BEGIN x := 2 + 3 * 4 END.", "x"), Some(14));
        assert_eq!(value_of("BEGIN x := (2 + 3) * 4 END.", "x"), Some(20));
        assert_eq!(value_of("BEGIN x := 10 - 4 - 3 END.", "x"), Some(3));
        assert_eq!(value_of("BEGIN x := 100 / 10 / 5 END.", "x"), Some(2));
    }

    #[test]
    fn test_unary() {
        assert_eq!(value_of("BEGIN x := --5 END.", "x"), Some(5));
        assert_eq!(value_of("BEGIN x := +-5 END.", "x"), Some(-5));
        assert_eq!(value_of("BEGIN x := 2 - -3 END.", "x"), Some(5));
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        assert_eq!(value_of("BEGIN x := 7 / 2 END.", "x"), Some(3));
        assert_eq!(value_of("BEGIN x := -7 / 2 END.", "x"), Some(-3));
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            run("BEGIN x := 0; y := 1 / x END."),
            Err(InterpretError::Execution(ExecutionError::DivisionByZero {
                line: 1,
                column: 22,
            }))
        ));
    }

    #[test]
    fn test_overflow() {
        assert!(matches!(
            run("BEGIN x := 9223372036854775807 + 1 END."),
            Err(InterpretError::Execution(ExecutionError::Overflow { .. }))
        ));
        assert!(matches!(
            run("BEGIN x := -9223372036854775807 - 1; y := -x END."),
            Err(InterpretError::Execution(ExecutionError::Overflow { .. }))
        ));
    }

    #[test]
    fn test_zero_valued_variable_is_defined() {
        assert_eq!(value_of("BEGIN x := 0; y := x + 1 END.", "y"), Some(1));
    }

    #[test]
    fn test_undefined_variable() {
        let error = run("BEGIN x := 1;\n y := z END.").unwrap_err();
        assert!(matches!(
            error,
            InterpretError::Execution(ExecutionError::UndefinedVariable { ref name, line: 2, column: 7 })
                if name == "z"
        ));
    }

    #[test]
    fn test_interpret_runs_once() {
        let mut interpreter =
            Interpreter::new(Parser::new(Lexer::new("BEGIN x := 1 END.")).unwrap());
        interpreter.interpret().unwrap();
        assert!(matches!(
            interpreter.interpret(),
            Err(InterpretError::AlreadyInterpreted)
        ));
        assert_eq!(interpreter.global_scope().get("x"), Some(1));
    }

    #[test]
    fn test_with_scope() {
        let scope: GlobalScope = [("a", 20)].into_iter().collect();
        let mut interpreter = Interpreter::with_scope(
            Parser::new(Lexer::new("BEGIN b := a * 2 END.")).unwrap(),
            scope,
        );
        interpreter.interpret().unwrap();
        assert_eq!(interpreter.global_scope().get("a"), Some(20));
        assert_eq!(interpreter.global_scope().get("b"), Some(40));
    }
}
