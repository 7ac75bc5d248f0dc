//! Drawing - Symbols of one formula as they are being drawn
//!
//! Symbols arrive one at a time from the recognizer. Each new symbol is
//! checked against the previous one right away, so the displayed labels
//! are already corrected while the user writes.

use crate::error::{SessionError, SessionResult};
use crate::registry::IdentifierRegistry;
use formula::disambiguate::absorb;
use formula::{FormulaParser, LabeledBox, Mode, Parsed, ParserConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One formula: its mode and its recognized symbols in drawing order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Formula {
    mode: Mode,
    boxes: Vec<LabeledBox>,
}

impl Formula {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            boxes: Vec::new(),
        }
    }

    /// A formula from already recorded symbols, without further correction
    pub fn from_boxes(mode: Mode, boxes: Vec<LabeledBox>) -> Self {
        Self { mode, boxes }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn boxes(&self) -> &[LabeledBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Append a newly recognized symbol, correcting it against the previous one.
    ///
    /// A second "-" matching the previous one is absorbed into an "=".
    pub fn push(&mut self, symbol: LabeledBox, config: &ParserConfig) {
        let next = match self.boxes.last_mut() {
            Some(previous) => absorb(previous, symbol, config),
            None => Some(symbol),
        };
        match next {
            Some(next) => self.boxes.push(next),
            None => debug!(target: "session::formula", "symbol absorbed into previous one"),
        }
    }

    /// The last symbol took more ink and was recognized again
    pub fn replace_last(&mut self, symbol: LabeledBox) -> SessionResult<()> {
        let last = self.boxes.last_mut().ok_or(SessionError::EmptyFormula)?;
        *last = symbol;
        Ok(())
    }

    /// Overwrite every label from a typed correction, one character per symbol.
    ///
    /// Either all labels change or none do.
    pub fn relabel(&mut self, text: &str) -> SessionResult<()> {
        let found = text.chars().count();
        if found != self.boxes.len() {
            return Err(SessionError::LabelCountMismatch {
                expected: self.boxes.len(),
                found,
            });
        }
        let relabeled = self
            .boxes
            .iter()
            .zip(text.chars())
            .map(|(symbol, label)| LabeledBox::new(label, *symbol.rect()))
            .collect::<Result<Vec<_>, _>>()?;
        self.boxes = relabeled;
        Ok(())
    }

    /// Labels in drawing order
    pub fn prediction(&self) -> String {
        self.boxes.iter().map(LabeledBox::label).collect()
    }

    /// Parse with the names currently known to the registry
    pub fn parse(
        &self,
        registry: &IdentifierRegistry,
        parser: &FormulaParser,
    ) -> SessionResult<Parsed> {
        Ok(parser.parse(self.boxes.clone(), self.mode, &registry.names())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formula::{FormulaError, Rect};

    fn glyph(label: char, x: f32, y: f32, width: f32, height: f32) -> LabeledBox {
        LabeledBox::new(label, Rect::new(x, y, width, height)).unwrap()
    }

    #[test]
    fn test_push_merges_equals() {
        let config = ParserConfig::default();
        let mut formula = Formula::new(Mode::Declare);
        formula.push(glyph('X', 0.0, 50.0, 8.0, 12.0), &config);
        formula.push(glyph('-', 20.0, 46.0, 14.0, 2.0), &config);
        formula.push(glyph('-', 20.0, 54.0, 14.0, 2.0), &config);
        formula.push(glyph('3', 40.0, 50.0, 8.0, 12.0), &config);

        assert_eq!(formula.prediction(), "X=3");
        assert_eq!(formula.len(), 3);
    }

    #[test]
    fn test_push_corrects_zero_after_letter() {
        let config = ParserConfig::default();
        let mut formula = Formula::new(Mode::Eval);
        formula.push(glyph('C', 0.0, 50.0, 8.0, 12.0), &config);
        formula.push(glyph('0', 10.0, 50.0, 8.0, 12.0), &config);
        formula.push(glyph('5', 20.0, 50.0, 8.0, 12.0), &config);
        assert_eq!(formula.prediction(), "COS");
    }

    #[test]
    fn test_replace_last() {
        let mut formula = Formula::new(Mode::Eval);
        assert!(matches!(
            formula.replace_last(glyph('1', 0.0, 0.0, 2.0, 10.0)),
            Err(SessionError::EmptyFormula)
        ));

        formula.push(glyph('1', 0.0, 0.0, 2.0, 10.0), &ParserConfig::default());
        formula.replace_last(glyph('7', 0.0, 0.0, 6.0, 10.0)).unwrap();
        assert_eq!(formula.prediction(), "7");
    }

    #[test]
    fn test_relabel() {
        let mut formula = Formula::from_boxes(
            Mode::Eval,
            vec![glyph('1', 0.0, 0.0, 8.0, 12.0), glyph('I', 10.0, 0.0, 8.0, 12.0)],
        );
        formula.relabel("17").unwrap();
        assert_eq!(formula.prediction(), "17");
        assert_eq!(formula.boxes()[1].rect().x(), 10.0);
    }

    #[test]
    fn test_relabel_wrong_length() {
        let mut formula = Formula::from_boxes(Mode::Eval, vec![glyph('1', 0.0, 0.0, 8.0, 12.0)]);
        assert!(matches!(
            formula.relabel("12"),
            Err(SessionError::LabelCountMismatch {
                expected: 1,
                found: 2
            })
        ));
        assert_eq!(formula.prediction(), "1");
    }

    #[test]
    fn test_relabel_is_atomic() {
        let mut formula = Formula::from_boxes(
            Mode::Eval,
            vec![glyph('1', 0.0, 0.0, 8.0, 12.0), glyph('2', 10.0, 0.0, 8.0, 12.0)],
        );
        assert!(matches!(
            formula.relabel("7?"),
            Err(SessionError::Formula(FormulaError::UnknownSymbol('?')))
        ));
        assert_eq!(formula.prediction(), "12");
    }

    #[test]
    fn test_parse_uses_registry_names() {
        let config = ParserConfig::default();
        let mut formula = Formula::new(Mode::Eval);
        for (i, label) in "SINX".chars().enumerate() {
            formula.push(glyph(label, 15.0 * i as f32, 50.0, 8.0, 12.0), &config);
        }
        let parsed = formula
            .parse(&IdentifierRegistry::new(), &FormulaParser::new())
            .unwrap();
        assert_eq!(parsed.to_string(), "SIN*X");
    }
}
