//! Linear rendering - Serialize an expression tree to evaluable text
//!
//! Output uses `*` for implicit multiplication, `**(...)` for exponents and
//! `(num)/(den)` for fractions.

use crate::model::{Equation, Expression, Fraction, Group, Node, Parsed};
use crate::symbol::Kind;
use std::fmt;

/// Render a parsed formula. An equation renders as `left=right`.
pub fn render(parsed: &Parsed) -> String {
    match parsed {
        Parsed::Expression(expression) => render_expression(expression),
        Parsed::Equation(equation) => render_equation(equation),
    }
}

pub fn render_equation(equation: &Equation) -> String {
    format!(
        "{}={}",
        render_expression(&equation.left),
        render_expression(&equation.right)
    )
}

pub fn render_expression(expression: &Expression) -> String {
    let mut out = String::new();
    write_expression(expression, &mut out);
    out
}

fn write_expression(expression: &Expression, out: &mut String) {
    let mut previous: Option<&Node> = None;
    for node in expression.base() {
        if previous.is_some_and(|left| needs_multiply(left, node)) {
            out.push('*');
        }
        write_node(node, out);
        previous = Some(node);
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Group(group) => write_group(group, out),
        Node::Fraction(fraction) => write_fraction(fraction, out),
    }
}

fn write_group(group: &Group, out: &mut String) {
    out.push_str(&group.text());
    if let Some(power) = group.power() {
        write_power(power, out);
    }
}

fn write_fraction(fraction: &Fraction, out: &mut String) {
    let powered = fraction.power().is_some();
    if powered {
        out.push('(');
    }
    out.push('(');
    write_expression(fraction.numerator(), out);
    out.push_str(")/(");
    write_expression(fraction.denominator(), out);
    out.push(')');
    if let Some(power) = fraction.power() {
        out.push(')');
        write_power(power, out);
    }
}

fn write_power(power: &Expression, out: &mut String) {
    out.push_str("**(");
    write_expression(power, out);
    out.push(')');
}

/// Whether an implicit multiplication separates `left` and `right`
fn needs_multiply(left: &Node, right: &Node) -> bool {
    match (left.kind(), right.kind()) {
        (Kind::Digit, Kind::Letter) | (Kind::Letter, Kind::Digit) | (Kind::Letter, Kind::Letter) => {
            true
        }
        (Kind::Digit | Kind::Letter | Kind::Fraction, Kind::Fraction)
        | (Kind::Fraction, Kind::Digit | Kind::Letter) => true,
        (Kind::Parenthesis, Kind::Parenthesis) => left.is_symbol(')') && right.is_symbol('('),
        // An exponent ends the left token, e.g. a digit run split by it
        (_, Kind::Digit | Kind::Letter | Kind::Fraction) => left.power().is_some(),
        (_, Kind::Parenthesis) => left.power().is_some() && right.is_symbol('('),
        _ => false,
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_expression(self))
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_equation(self))
    }
}

impl fmt::Display for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
