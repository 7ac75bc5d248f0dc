//! Disambiguation - Spatial correction of visually ambiguous labels
//!
//! The recognizer only sees one symbol at a time, so a horizontal stroke is
//! always "-" and a round letter may come back as a digit. These passes fix
//! labels from their surroundings. They never fail: a wrong guess yields a
//! wrong but well-formed tree.

use crate::config::ParserConfig;
use crate::geometry::Rect;
use crate::symbol::{Kind, LabeledBox, DIVIDE, EQUALS, MINUS};
use tracing::{debug, trace};

/// Run both correction passes over a formula's boxes, in sequence order.
///
/// Boxes may be merged ("-" "-" into "="), never added. The passes repeat
/// until no label changes, so the result is a fixed point: running this
/// again on its own output changes nothing.
pub fn disambiguate(boxes: Vec<LabeledBox>, config: &ParserConfig) -> Vec<LabeledBox> {
    let mut boxes = boxes;
    let mut round = 0usize;
    loop {
        // Every change merges a box or moves a label off "-", "0" or "5",
        // so there are never more rounds than boxes plus one.
        let before: Vec<char> = boxes.iter().map(LabeledBox::label).collect();
        boxes = correction_round(boxes, config);
        round += 1;
        if boxes.iter().map(LabeledBox::label).eq(before.iter().copied()) {
            trace!(target: "formula::disambiguate", rounds = round, "labels settled");
            return boxes;
        }
    }
}

/// One global bar pass followed by one sequential pass
fn correction_round(boxes: Vec<LabeledBox>, config: &ParserConfig) -> Vec<LabeledBox> {
    let boxes = classify_fraction_bars(boxes);

    let mut output: Vec<LabeledBox> = Vec::with_capacity(boxes.len());
    for symbol in boxes {
        let next = match output.last_mut() {
            Some(previous) => absorb(previous, symbol, config),
            None => Some(symbol),
        };
        if let Some(next) = next {
            output.push(next);
        }
    }
    output
}

/// Turn every "-" whose nearest box above is a digit or letter into "/".
///
/// Candidates must lie above the stroke and within its horizontal span.
/// Labels are read as they were before the pass.
pub fn classify_fraction_bars(boxes: Vec<LabeledBox>) -> Vec<LabeledBox> {
    let bars: Vec<bool> = boxes
        .iter()
        .map(|symbol| {
            symbol.is(MINUS)
                && nearest_above(&boxes, symbol)
                    .is_some_and(|above| matches!(above.kind(), Kind::Digit | Kind::Letter))
        })
        .collect();

    boxes
        .into_iter()
        .zip(bars)
        .map(|(mut symbol, is_bar)| {
            if is_bar {
                debug!(
                    target: "formula::disambiguate",
                    x = symbol.rect().x(),
                    y = symbol.rect().y(),
                    "'-' under a digit or letter relabeled '/'"
                );
                symbol.rewrite(DIVIDE, Kind::MathOperator);
            }
            symbol
        })
        .collect()
}

fn nearest_above<'a>(boxes: &'a [LabeledBox], bar: &LabeledBox) -> Option<&'a LabeledBox> {
    let span = bar.rect();
    boxes
        .iter()
        .filter(|candidate| {
            !std::ptr::eq(*candidate, bar)
                && candidate.rect().y() < span.y()
                && span.spans_horizontally(candidate.rect())
        })
        .min_by(|a, b| gap(span, a.rect()).total_cmp(&gap(span, b.rect())))
}

fn gap(bar: &Rect, above: &Rect) -> f32 {
    bar.top() - above.bottom()
}

/// Apply the adjacent-pair rules to `next`, given the box before it.
///
/// Returns `None` when `next` was merged into `previous`, otherwise the
/// (possibly relabeled) box to append.
pub fn absorb(
    previous: &mut LabeledBox,
    mut next: LabeledBox,
    config: &ParserConfig,
) -> Option<LabeledBox> {
    if previous.is(MINUS) && next.is(MINUS) && similar_widths(previous, &next, config) {
        debug!(
            target: "formula::disambiguate",
            x = previous.rect().x(),
            y = previous.rect().y(),
            "'-' '-' merged into '='"
        );
        previous.absorb_rect(next.rect());
        previous.rewrite(EQUALS, Kind::MathOperator);
        return None;
    }

    if next.is(MINUS)
        && next.rect().y() - previous.rect().y()
            > previous.rect().height() * config.fraction_drop_ratio
    {
        debug!(
            target: "formula::disambiguate",
            x = next.rect().x(),
            y = next.rect().y(),
            "'-' below the previous symbol relabeled '/'"
        );
        next.rewrite(DIVIDE, Kind::MathOperator);
    }

    if previous.kind() == Kind::Letter {
        let replacement = match next.label() {
            '0' => Some('O'),
            '5' => Some('S'),
            _ => None,
        };
        if let Some(letter) = replacement {
            debug!(
                target: "formula::disambiguate",
                from = %next.label(),
                to = %letter,
                "digit after a letter relabeled"
            );
            next.rewrite(letter, Kind::Letter);
        }
    }

    Some(next)
}

fn similar_widths(a: &LabeledBox, b: &LabeledBox, config: &ParserConfig) -> bool {
    let (wa, wb) = (a.rect().width(), b.rect().width());
    let widest = wa.max(wb);
    widest <= 0.0 || (wa - wb).abs() / widest < config.equals_width_tolerance
}
