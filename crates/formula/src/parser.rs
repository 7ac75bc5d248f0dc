//! Formula parser - Entry point from labeled boxes to an expression tree
//!
//! Pipeline: disambiguation, equation split, then for every region the
//! fraction builder, the grouper and identifier splitting. Each call is a
//! pure function of its input boxes and identifier snapshot.

use crate::config::ParserConfig;
use crate::disambiguate::disambiguate;
use crate::equation::split_equation;
use crate::error::{FormulaError, FormulaResult};
use crate::fraction::build_fractions;
use crate::group::group_items;
use crate::identifiers::split_nodes;
use crate::model::{Equation, Expression, Item, Parsed};
use crate::symbol::{LabeledBox, EQUALS};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the formula is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Evaluate an expression; a trailing "=" is allowed
    #[default]
    Eval,
    /// Declare a constant or a function
    Declare,
    /// Solve an equation for its unknown
    Solve,
}

impl Mode {
    /// Whether formulas in this mode must be equations
    pub fn requires_equation(self) -> bool {
        matches!(self, Mode::Declare | Mode::Solve)
    }
}

/// Shared state of one recursive region parse
#[derive(Debug, Clone, Copy)]
pub struct RegionContext<'a> {
    pub config: &'a ParserConfig,
    /// Known identifier names, longest first
    pub identifiers: &'a [String],
    /// How many exponents enclose the region
    pub exponent_depth: usize,
}

impl<'a> RegionContext<'a> {
    pub fn new(config: &'a ParserConfig, identifiers: &'a [String]) -> Self {
        Self {
            config,
            identifiers,
            exponent_depth: 0,
        }
    }

    /// Context for the region of an exponent
    pub fn nested_exponent(&self) -> Self {
        Self {
            exponent_depth: self.exponent_depth + 1,
            ..*self
        }
    }
}

/// Parse one region: fractions, then groups, then identifier splitting.
///
/// An empty region yields an empty expression.
pub fn parse_region(items: Vec<Item>, ctx: &RegionContext<'_>) -> FormulaResult<Expression> {
    if items.is_empty() {
        return Ok(Expression::empty());
    }
    let items = build_fractions(items, ctx)?;
    let nodes = group_items(items, ctx)?;
    Ok(Expression::new(split_nodes(nodes, ctx.identifiers)))
}

/// Parser turning recognized boxes into expressions
#[derive(Debug, Clone, Default)]
pub struct FormulaParser {
    config: ParserConfig,
}

impl FormulaParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse the boxes of one formula.
    ///
    /// In [`Mode::Eval`] a formula containing "=" becomes an equation and
    /// anything else an expression; the other modes require an equation.
    pub fn parse<S: AsRef<str>>(
        &self,
        boxes: Vec<LabeledBox>,
        mode: Mode,
        known_identifiers: &[S],
    ) -> FormulaResult<Parsed> {
        let identifiers = longest_first(known_identifiers);
        let ctx = RegionContext::new(&self.config, &identifiers);
        let boxes = disambiguate(boxes, &self.config);

        debug!(
            target: "formula::parse",
            boxes = boxes.len(),
            mode = ?mode,
            "parsing formula"
        );

        let has_equals = boxes.iter().any(|symbol| symbol.is(EQUALS));
        if !has_equals && !mode.requires_equation() {
            return parse_region(into_items(boxes), &ctx).map(Parsed::Expression);
        }

        if boxes.is_empty() {
            return Err(FormulaError::MalformedEquation(
                "empty formula".to_string(),
            ));
        }
        let (left, right) = split_equation(boxes)?;
        let left = parse_region(into_items(left), &ctx)?;
        let right = parse_region(into_items(right), &ctx)?;
        Ok(Parsed::Equation(Equation::new(left, right)))
    }

    /// Parse boxes that form a single expression, without equation handling
    pub fn parse_expression<S: AsRef<str>>(
        &self,
        boxes: Vec<LabeledBox>,
        known_identifiers: &[S],
    ) -> FormulaResult<Expression> {
        let identifiers = longest_first(known_identifiers);
        let ctx = RegionContext::new(&self.config, &identifiers);
        parse_region(into_items(disambiguate(boxes, &self.config)), &ctx)
    }
}

/// Parse with the default configuration
pub fn parse<S: AsRef<str>>(
    boxes: Vec<LabeledBox>,
    mode: Mode,
    known_identifiers: &[S],
) -> FormulaResult<Parsed> {
    FormulaParser::new().parse(boxes, mode, known_identifiers)
}

fn longest_first<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut names: Vec<String> = names.iter().map(|name| name.as_ref().to_string()).collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()));
    names
}

fn into_items(boxes: Vec<LabeledBox>) -> Vec<Item> {
    boxes.into_iter().map(Item::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::model::Node;

    fn row(text: &str) -> Vec<LabeledBox> {
        text.chars()
            .enumerate()
            .map(|(i, c)| LabeledBox::new(c, Rect::new(15.0 * i as f32, 50.0, 8.0, 12.0)).unwrap())
            .collect()
    }

    const NONE: &[&str] = &[];

    #[test]
    fn test_longest_first_is_stable() {
        let names = longest_first(&["X", "COS", "AB", "SIN", "C"]);
        assert_eq!(names, vec!["COS", "SIN", "AB", "X", "C"]);
    }

    #[test]
    fn test_eval_expression() {
        let parsed = parse(row("2+3"), Mode::Eval, NONE).unwrap();
        assert!(matches!(&parsed, Parsed::Expression(e) if e.len() == 3));
    }

    #[test]
    fn test_eval_with_trailing_equals() {
        let parsed = parse(row("2+3="), Mode::Eval, NONE).unwrap();
        let Parsed::Equation(eq) = parsed else {
            panic!("Expected equation");
        };
        assert_eq!(eq.left.len(), 3);
        assert!(eq.right.is_empty());
    }

    #[test]
    fn test_declare_requires_equals() {
        assert!(matches!(
            parse(row("X+1"), Mode::Declare, NONE),
            Err(FormulaError::MalformedEquation(_))
        ));
        assert!(matches!(
            parse(Vec::new(), Mode::Solve, NONE),
            Err(FormulaError::MalformedEquation(_))
        ));
    }

    #[test]
    fn test_empty_eval_is_empty_expression() {
        let parsed = parse(Vec::new(), Mode::Eval, NONE).unwrap();
        assert_eq!(parsed, Parsed::Expression(Expression::empty()));
    }

    #[test]
    fn test_identifiers_sorted_by_parser() {
        let parsed = parse(row("COSX"), Mode::Eval, &["X", "COS", "CO"]).unwrap();
        let Parsed::Expression(expr) = parsed else {
            panic!("Expected expression");
        };
        let texts: Vec<String> = expr
            .base()
            .iter()
            .map(|node| match node {
                Node::Group(group) => group.text(),
                Node::Fraction(_) => String::new(),
            })
            .collect();
        assert_eq!(texts, vec!["COS", "X"]);
    }

    #[test]
    fn test_nested_context() {
        let config = ParserConfig::default();
        let ctx = RegionContext::new(&config, &[]);
        assert_eq!(ctx.nested_exponent().exponent_depth, 1);
        assert_eq!(ctx.exponent_depth, 0);
    }
}
