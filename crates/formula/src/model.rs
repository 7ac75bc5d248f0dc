//! Expression Tree - Structured form of a parsed formula
//!
//! The tree is built bottom-up: groups and fractions first, then the
//! expression holding them. Every container exclusively owns its children.

use crate::geometry::Rect;
use crate::symbol::{Kind, LabeledBox};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// Group
// =============================================================================

/// A run of adjacent symbols treated as one token, with an optional exponent.
///
/// Digit and letter groups grow while scanning; operators and parentheses
/// always stay single-member groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    members: Vec<LabeledBox>,
    kind: Kind,
    rect: Rect,
    power: Option<Box<Expression>>,
}

impl Group {
    /// Start a group from its first symbol
    pub fn new(first: LabeledBox) -> Self {
        Self {
            kind: first.kind(),
            rect: *first.rect(),
            members: vec![first],
            power: None,
        }
    }

    /// Build a group from symbols already known to share one kind.
    /// Returns `None` for an empty list.
    pub(crate) fn from_members(members: Vec<LabeledBox>) -> Option<Self> {
        let first = members.first()?;
        let kind = first.kind();
        let rect = Rect::bounding(members.iter().map(LabeledBox::rect))?;
        Some(Self {
            members,
            kind,
            rect,
            power: None,
        })
    }

    /// Whether `symbol` can be appended to this group
    pub fn accepts(&self, symbol: &LabeledBox) -> bool {
        self.power.is_none() && self.kind.merges() && symbol.kind() == self.kind
    }

    /// Append a symbol and grow the bounding box
    pub fn append(&mut self, symbol: LabeledBox) {
        self.rect.merge(symbol.rect());
        self.members.push(symbol);
    }

    pub fn members(&self) -> &[LabeledBox] {
        &self.members
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Concatenated labels
    pub fn text(&self) -> String {
        self.members.iter().map(LabeledBox::label).collect()
    }

    /// Whether this group is exactly the single symbol `label`
    pub fn is_symbol(&self, label: char) -> bool {
        matches!(self.members.as_slice(), [only] if only.is(label))
    }

    pub fn power(&self) -> Option<&Expression> {
        self.power.as_deref()
    }

    pub fn set_power(&mut self, power: Expression) {
        self.power = Some(Box::new(power));
    }

    pub(crate) fn into_parts(self) -> (Vec<LabeledBox>, Option<Box<Expression>>) {
        (self.members, self.power)
    }
}

// =============================================================================
// Fraction
// =============================================================================

/// A numerator expression over a denominator expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fraction {
    numerator: Expression,
    denominator: Expression,
    rect: Rect,
    power: Option<Box<Expression>>,
}

impl Fraction {
    pub fn new(numerator: Expression, denominator: Expression) -> Self {
        let rect = match (numerator.rect(), denominator.rect()) {
            (Some(num), Some(den)) => num.union(&den),
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => Rect::default(),
        };
        Self {
            numerator,
            denominator,
            rect,
            power: None,
        }
    }

    pub fn numerator(&self) -> &Expression {
        &self.numerator
    }

    pub fn denominator(&self) -> &Expression {
        &self.denominator
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn power(&self) -> Option<&Expression> {
        self.power.as_deref()
    }

    pub fn set_power(&mut self, power: Expression) {
        self.power = Some(Box::new(power));
    }
}

// =============================================================================
// Node
// =============================================================================

/// One entry of an expression's base line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Group(Group),
    Fraction(Box<Fraction>),
}

impl Node {
    pub fn kind(&self) -> Kind {
        match self {
            Node::Group(group) => group.kind(),
            Node::Fraction(_) => Kind::Fraction,
        }
    }

    pub fn rect(&self) -> &Rect {
        match self {
            Node::Group(group) => group.rect(),
            Node::Fraction(fraction) => fraction.rect(),
        }
    }

    pub fn power(&self) -> Option<&Expression> {
        match self {
            Node::Group(group) => group.power(),
            Node::Fraction(fraction) => fraction.power(),
        }
    }

    pub fn set_power(&mut self, power: Expression) {
        match self {
            Node::Group(group) => group.set_power(power),
            Node::Fraction(fraction) => fraction.set_power(power),
        }
    }

    /// Whether this node is the single symbol `label`
    pub fn is_symbol(&self, label: char) -> bool {
        matches!(self, Node::Group(group) if group.is_symbol(label))
    }
}

impl From<Item> for Node {
    fn from(item: Item) -> Self {
        match item {
            Item::Symbol(symbol) => Node::Group(Group::new(symbol)),
            Item::Fraction(fraction) => Node::Fraction(Box::new(fraction)),
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// Working element of a region before grouping: a raw symbol or a built fraction
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Symbol(LabeledBox),
    Fraction(Fraction),
}

impl Item {
    pub fn rect(&self) -> &Rect {
        match self {
            Item::Symbol(symbol) => symbol.rect(),
            Item::Fraction(fraction) => fraction.rect(),
        }
    }

    /// The symbol if this item carries `label`
    pub fn symbol_with(&self, label: char) -> Option<&LabeledBox> {
        match self {
            Item::Symbol(symbol) if symbol.is(label) => Some(symbol),
            _ => None,
        }
    }
}

impl From<LabeledBox> for Item {
    fn from(symbol: LabeledBox) -> Self {
        Item::Symbol(symbol)
    }
}

// =============================================================================
// Expression & Equation
// =============================================================================

/// Nodes of one algebraic region, ordered left to right
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Expression {
    base: Vec<Node>,
}

impl Expression {
    pub fn new(base: Vec<Node>) -> Self {
        Self { base }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn base(&self) -> &[Node] {
        &self.base
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Bounding box of every node, `None` for an empty expression
    pub fn rect(&self) -> Option<Rect> {
        Rect::bounding(self.base.iter().map(Node::rect))
    }

    /// Names referenced by letter groups, including inside fractions and exponents
    pub fn identifiers(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_identifiers(&mut names);
        names
    }

    fn collect_identifiers(&self, names: &mut BTreeSet<String>) {
        for node in &self.base {
            match node {
                Node::Group(group) if group.kind() == Kind::Letter => {
                    names.insert(group.text());
                }
                Node::Group(_) => {}
                Node::Fraction(fraction) => {
                    fraction.numerator.collect_identifiers(names);
                    fraction.denominator.collect_identifiers(names);
                }
            }
            if let Some(power) = node.power() {
                power.collect_identifiers(names);
            }
        }
    }
}

/// Two expressions on either side of a single "="
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equation {
    pub left: Expression,
    pub right: Expression,
}

impl Equation {
    pub fn new(left: Expression, right: Expression) -> Self {
        Self { left, right }
    }
}

/// Result of parsing one formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Parsed {
    Expression(Expression),
    Equation(Equation),
}
