//! Requests - What a parsed formula asks the solver to do
//!
//! The solver itself lives outside this crate. A request carries the
//! rendered text it consumes, plus the identifiers a declaration depends on.

use crate::error::{SessionError, SessionResult};
use formula::{render_equation, render_expression, Equation, Expression, Kind, Mode, Node, Parsed};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The unknown solved for in [`Mode::Solve`]
pub const SOLVE_UNKNOWN: &str = "X";

/// A named constant or single-parameter function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Constant {
        name: String,
        body: String,
        dependencies: BTreeSet<String>,
    },
    Function {
        name: String,
        parameter: String,
        body: String,
        dependencies: BTreeSet<String>,
    },
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Constant { name, .. } | Declaration::Function { name, .. } => name,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Declaration::Constant { body, .. } | Declaration::Function { body, .. } => body,
        }
    }

    /// Identifiers of the body other than the parameter and the name itself
    pub fn dependencies(&self) -> &BTreeSet<String> {
        match self {
            Declaration::Constant { dependencies, .. }
            | Declaration::Function { dependencies, .. } => dependencies,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Declaration::Function { .. })
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::Constant { name, body, .. } => write!(f, "{}={}", name, body),
            Declaration::Function {
                name,
                parameter,
                body,
                ..
            } => write!(f, "{}({})={}", name, parameter, body),
        }
    }
}

/// Work handed to the solver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum Request {
    /// Compute the value of an expression
    Evaluate { expression: String },
    /// Run an assignment-like statement
    Execute { statement: String },
    /// Record a constant or function
    Declare { declaration: Declaration },
    /// Find the roots of `residual` in `unknown`
    Solve { unknown: String, residual: String },
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Evaluate { expression } => write!(f, "eval {}", expression),
            Request::Execute { statement } => write!(f, "exec {}", statement),
            Request::Declare { declaration } => write!(f, "declare {}", declaration),
            Request::Solve { unknown, residual } => {
                write!(f, "solve {}=0 for {}", residual, unknown)
            }
        }
    }
}

/// Translate a parsed formula into a solver request for its mode
pub fn build_request(parsed: &Parsed, mode: Mode) -> SessionResult<Request> {
    match (mode, parsed) {
        (Mode::Eval, Parsed::Expression(expression)) => evaluate(expression),
        (Mode::Eval, Parsed::Equation(equation)) if equation.right.is_empty() => {
            evaluate(&equation.left)
        }
        (Mode::Eval, Parsed::Equation(equation)) => Ok(Request::Execute {
            statement: render_equation(equation),
        }),
        (Mode::Declare, Parsed::Equation(equation)) => Ok(Request::Declare {
            declaration: declaration(equation)?,
        }),
        (Mode::Solve, Parsed::Equation(equation)) => Ok(solve(equation)),
        (_, Parsed::Expression(_)) => Err(formula::FormulaError::MalformedEquation(format!(
            "{:?} mode needs an equation",
            mode
        ))
        .into()),
    }
}

fn evaluate(expression: &Expression) -> SessionResult<Request> {
    if expression.is_empty() {
        return Err(SessionError::EmptyFormula);
    }
    Ok(Request::Evaluate {
        expression: render_expression(expression),
    })
}

fn solve(equation: &Equation) -> Request {
    let left = render_expression(&equation.left);
    let residual = if equation.right.is_empty() {
        left
    } else {
        format!("{}-({})", left, render_expression(&equation.right))
    };
    Request::Solve {
        unknown: SOLVE_UNKNOWN.to_string(),
        residual,
    }
}

fn declaration(equation: &Equation) -> SessionResult<Declaration> {
    let invalid = || SessionError::InvalidDeclaration(render_expression(&equation.left));
    if equation.right.is_empty() {
        return Err(invalid());
    }

    // A name split into single letters is joined back.
    let nodes = equation.left.base();
    let name_len = nodes.iter().take_while(|node| letters(node).is_some()).count();
    if name_len == 0 {
        return Err(invalid());
    }
    let name: String = nodes[..name_len].iter().filter_map(letters).collect();

    let parameter = match &nodes[name_len..] {
        [] => None,
        [open, parameter, close] if open.is_symbol('(') && close.is_symbol(')') => {
            match letters(parameter) {
                Some(parameter) if parameter.chars().count() == 1 => Some(parameter),
                _ => return Err(invalid()),
            }
        }
        _ => return Err(invalid()),
    };

    let body = render_expression(&equation.right);
    let mut dependencies = equation.right.identifiers();
    dependencies.remove(&name);
    Ok(match parameter {
        Some(parameter) => {
            dependencies.remove(&parameter);
            Declaration::Function {
                name,
                parameter,
                body,
                dependencies,
            }
        }
        None => Declaration::Constant {
            name,
            body,
            dependencies,
        },
    })
}

/// Text of a letter group without an exponent
fn letters(node: &Node) -> Option<String> {
    match node {
        Node::Group(group) if group.kind() == Kind::Letter && group.power().is_none() => {
            Some(group.text())
        }
        _ => None,
    }
}
