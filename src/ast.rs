use std::fmt::Display;

use crate::token::Token;

/// Statement nodes. A parsed program is always a `Compound` at the root.
/// Every node owns its children; the tree is built once by the parser and
/// only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Compound(Vec<Statement>),
    Assign {
        target: Var,
        token: Token,
        value: Expression,
    },
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    BinaryOp {
        left: Box<Expression>,
        op: InfixOperator,
        token: Token,
        right: Box<Expression>,
    },
    UnaryOp {
        op: UnaryOperator,
        token: Token,
        operand: Box<Expression>,
    },
    Numeric {
        token: Token,
        value: i64,
    },
    Var(Var),
}

/// A variable reference, used both as an assignment target and as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    pub token: Token,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Negate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl Statement {
    fn fmt_indented(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        match self {
            Statement::Compound(statements) => {
                writeln!(f, "BEGIN")?;
                for (i, statement) in statements.iter().enumerate() {
                    write!(f, "{:width$}", "", width = (depth + 1) * 2)?;
                    statement.fmt_indented(f, depth + 1)?;
                    if i != statements.len() - 1 {
                        write!(f, ";")?;
                    }
                    writeln!(f)?;
                }
                write!(f, "{:width$}END", "", width = depth * 2)
            }
            Statement::Assign { target, value, .. } => write!(f, "{} := {}", target.name, value),
            Statement::NoOp => Ok(()),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_indented(f, 0)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::BinaryOp {
                left, op, right, ..
            } => write!(f, "({} {} {})", op, left, right),
            Expression::UnaryOp { op, operand, .. } => write!(f, "({} {})", op, operand),
            Expression::Numeric { value, .. } => write!(f, "{}", value),
            Expression::Var(var) => write!(f, "{}", var.name),
        }
    }
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InfixOperator::Plus => write!(f, "+"),
            InfixOperator::Minus => write!(f, "-"),
            InfixOperator::Multiply => write!(f, "*"),
            InfixOperator::Divide => write!(f, "/"),
        }
    }
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Plus => write!(f, "+"),
            UnaryOperator::Negate => write!(f, "-"),
        }
    }
}
