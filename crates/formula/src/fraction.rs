//! Fraction building - Recursive partition of a region around division bars
//!
//! The widest bar is resolved first: it spans every narrower bar nested in
//! its numerator or denominator, which are then handled by the recursive
//! parse of each side.

use crate::error::FormulaResult;
use crate::model::{Fraction, Item};
use crate::parser::{parse_region, RegionContext};
use crate::symbol::{LabeledBox, DIVIDE};
use tracing::{debug, trace};

/// Replace every fraction structure in `items` with a single fraction item.
///
/// Items that are not part of a fraction pass through unchanged and in order.
pub fn build_fractions(items: Vec<Item>, ctx: &RegionContext<'_>) -> FormulaResult<Vec<Item>> {
    let mut items = items;
    let mut inline_divides = Vec::new();

    loop {
        let (divide, rest) = take_widest_divide(items);
        let Some(divide) = divide else {
            items = rest;
            break;
        };
        let bar = *divide.rect();
        let mut above = Vec::new();
        let mut below = Vec::new();
        let mut untouched = Vec::with_capacity(rest.len());

        for item in rest {
            let rect = item.rect();
            if !rect.overlaps_horizontally(&bar) {
                untouched.push(item);
            } else if rect.y() <= bar.y() {
                above.push(item);
            } else {
                below.push(item);
            }
        }

        match (above.is_empty(), below.is_empty()) {
            (false, false) => {
                trace!(
                    target: "formula::fraction",
                    width = bar.width(),
                    numerator = above.len(),
                    denominator = below.len(),
                    "building fraction"
                );
                let numerator = parse_region(above, ctx)?;
                let denominator = parse_region(below, ctx)?;
                untouched.push(Item::Fraction(Fraction::new(numerator, denominator)));
            }
            (true, true) => {
                // Nothing stacked on it: an inline division sign
                inline_divides.push(divide);
            }
            _ => {
                debug!(
                    target: "formula::fraction",
                    x = bar.x(),
                    y = bar.y(),
                    "division bar with one empty side dropped"
                );
                untouched.extend(above);
                untouched.extend(below);
            }
        }

        items = untouched;
    }

    items.extend(inline_divides.into_iter().map(Item::Symbol));
    Ok(items)
}

/// Split off the widest "/" symbol; the first one wins on equal widths.
fn take_widest_divide(items: Vec<Item>) -> (Option<LabeledBox>, Vec<Item>) {
    let widest = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| item.symbol_with(DIVIDE).map(|s| (index, s.rect().width())))
        .fold(None, |best: Option<(usize, f32)>, (index, width)| match best {
            Some((_, best_width)) if best_width >= width => best,
            _ => Some((index, width)),
        });

    let Some((widest, _)) = widest else {
        return (None, items);
    };

    let mut divide = None;
    let mut rest = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Item::Symbol(symbol) if index == widest => divide = Some(symbol),
            other => rest.push(other),
        }
    }
    (divide, rest)
}
