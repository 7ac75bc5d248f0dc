//! Symbols - Recognized characters and their syntactic kind
//!
//! A [`LabeledBox`] is what the recognizer hands over for every merged ink
//! symbol: a one-character label and the box it was drawn in.

use crate::error::{FormulaError, FormulaResult};
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Equality sign splitting an equation
pub const EQUALS: char = '=';
/// Division bar or slash
pub const DIVIDE: char = '/';
/// Minus sign, also the raw label of an unclassified horizontal stroke
pub const MINUS: char = '-';

/// Syntactic category of a symbol or tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Digit,
    Letter,
    MathOperator,
    Parenthesis,
    Fraction,
}

impl Kind {
    /// Classify a recognized label. Fractions are never produced from a label.
    pub fn classify(label: char) -> FormulaResult<Kind> {
        match label {
            '0'..='9' => Ok(Kind::Digit),
            'A'..='Z' => Ok(Kind::Letter),
            '+' | '-' | '/' | '*' | '=' => Ok(Kind::MathOperator),
            '(' | ')' => Ok(Kind::Parenthesis),
            other => Err(FormulaError::UnknownSymbol(other)),
        }
    }

    /// Whether consecutive symbols of this kind merge into one group
    pub fn merges(self) -> bool {
        matches!(self, Kind::Digit | Kind::Letter)
    }
}

/// A recognized character: label, kind and bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLabeledBox", into = "RawLabeledBox")]
pub struct LabeledBox {
    rect: Rect,
    label: char,
    kind: Kind,
}

impl LabeledBox {
    /// Create a box, classifying its label
    pub fn new(label: char, rect: Rect) -> FormulaResult<Self> {
        let kind = Kind::classify(label)?;
        Ok(Self { rect, label, kind })
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn label(&self) -> char {
        self.label
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Whether this box carries the given label
    pub fn is(&self, label: char) -> bool {
        self.label == label
    }

    /// Rewrite the label with one whose kind is already known
    pub(crate) fn rewrite(&mut self, label: char, kind: Kind) {
        self.label = label;
        self.kind = kind;
    }

    /// Grow this box to cover another one
    pub(crate) fn absorb_rect(&mut self, other: &Rect) {
        self.rect.merge(other);
    }
}

/// Wire shape of a [`LabeledBox`]; the kind is always recomputed on load
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawLabeledBox {
    label: char,
    rect: Rect,
}

impl TryFrom<RawLabeledBox> for LabeledBox {
    type Error = FormulaError;

    fn try_from(raw: RawLabeledBox) -> FormulaResult<Self> {
        LabeledBox::new(raw.label, raw.rect)
    }
}

impl From<LabeledBox> for RawLabeledBox {
    fn from(symbol: LabeledBox) -> Self {
        Self {
            label: symbol.label,
            rect: symbol.rect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Kind::classify('7').unwrap(), Kind::Digit);
        assert_eq!(Kind::classify('Q').unwrap(), Kind::Letter);
        assert_eq!(Kind::classify('*').unwrap(), Kind::MathOperator);
        assert_eq!(Kind::classify('=').unwrap(), Kind::MathOperator);
        assert_eq!(Kind::classify(')').unwrap(), Kind::Parenthesis);
    }

    #[test]
    fn test_classify_unknown() {
        assert!(matches!(
            Kind::classify('x'),
            Err(FormulaError::UnknownSymbol('x'))
        ));
        assert!(matches!(
            LabeledBox::new('%', Rect::default()),
            Err(FormulaError::UnknownSymbol('%'))
        ));
    }

    #[test]
    fn test_merges() {
        assert!(Kind::Digit.merges());
        assert!(Kind::Letter.merges());
        assert!(!Kind::MathOperator.merges());
        assert!(!Kind::Parenthesis.merges());
        assert!(!Kind::Fraction.merges());
    }

    #[test]
    fn test_json_load_validates_label() {
        let json = r#"{"label":"A","rect":{"center":{"x":1.0,"y":2.0},"width":3.0,"height":4.0}}"#;
        let symbol: LabeledBox = serde_json::from_str(json).unwrap();
        assert_eq!(symbol.label(), 'A');
        assert_eq!(symbol.kind(), Kind::Letter);
        assert_eq!(symbol.rect().width(), 3.0);

        let bad = r#"{"label":"a","rect":{"center":{"x":1.0,"y":2.0},"width":3.0,"height":4.0}}"#;
        assert!(serde_json::from_str::<LabeledBox>(bad).is_err());
    }

    #[test]
    fn test_json_roundtrip_keeps_kind() {
        let symbol = LabeledBox::new('(', Rect::new(0.0, 0.0, 2.0, 8.0)).unwrap();
        let json = serde_json::to_string(&symbol).unwrap();
        assert!(!json.contains("kind"));
        let back: LabeledBox = serde_json::from_str(&json).unwrap();
        assert_eq!(back, symbol);
    }

    #[test]
    fn test_json_load_clamps_negative_width() {
        let json = r#"{"label":"1","rect":{"center":{"x":0.0,"y":0.0},"width":-5.0,"height":4.0}}"#;
        let symbol: LabeledBox = serde_json::from_str(json).unwrap();
        assert_eq!(symbol.rect().width(), 0.0);
        assert!(symbol.rect().left() <= symbol.rect().right());
    }
}
