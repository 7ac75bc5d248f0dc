//! Equation splitting - Cut a formula around its single "="

use crate::error::{FormulaError, FormulaResult};
use crate::symbol::{LabeledBox, EQUALS};

/// Boxes on the left and right of the "=", which is removed.
///
/// Boxes are assigned by horizontal position relative to the "=" center,
/// not by drawing order. The right side may be empty, the left may not.
pub fn split_equation(
    boxes: Vec<LabeledBox>,
) -> FormulaResult<(Vec<LabeledBox>, Vec<LabeledBox>)> {
    let count = boxes.iter().filter(|symbol| symbol.is(EQUALS)).count();
    if count != 1 {
        return Err(FormulaError::MalformedEquation(format!(
            "expected exactly one '=', found {count}"
        )));
    }

    let (equals, rest): (Vec<LabeledBox>, Vec<LabeledBox>) =
        boxes.into_iter().partition(|symbol| symbol.is(EQUALS));
    let pivot = equals
        .first()
        .map(|symbol| symbol.rect().x())
        .ok_or_else(|| FormulaError::MalformedEquation("missing '='".to_string()))?;

    let (left, right): (Vec<LabeledBox>, Vec<LabeledBox>) =
        rest.into_iter().partition(|symbol| symbol.rect().x() < pivot);
    if left.is_empty() {
        return Err(FormulaError::MalformedEquation(
            "nothing on the left of '='".to_string(),
        ));
    }
    Ok((left, right))
}
