//! Geometry - Axis-aligned boxes in screen coordinates
//!
//! Boxes are stored by center and size. The y axis grows downward, so `top`
//! is the smaller y value and "above" means a smaller y.

use crate::error::{FormulaError, FormulaResult};
use serde::{Deserialize, Serialize};

/// A position in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle defined by its center and size.
///
/// Width and height are never negative, including after deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawRect", into = "RawRect")]
pub struct Rect {
    center: Point,
    width: f32,
    height: f32,
}

impl Rect {
    /// Create a rectangle from its center and size. Negative sizes are clamped to zero.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            center: Point::new(x, y),
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Create a rectangle from two opposite corners, in any order
    pub fn from_bounds(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let (left, right) = (x1.min(x2), x1.max(x2));
        let (top, bottom) = (y1.min(y2), y1.max(y2));
        Self::new(
            0.5 * (left + right),
            0.5 * (top + bottom),
            right - left,
            bottom - top,
        )
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn x(&self) -> f32 {
        self.center.x
    }

    pub fn y(&self) -> f32 {
        self.center.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn left(&self) -> f32 {
        self.center.x - 0.5 * self.width
    }

    pub fn right(&self) -> f32 {
        self.center.x + 0.5 * self.width
    }

    pub fn top(&self) -> f32 {
        self.center.y - 0.5 * self.height
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + 0.5 * self.height
    }

    /// Grow this rectangle so it also covers `other`
    pub fn merge(&mut self, other: &Rect) {
        *self = self.union(other);
    }

    /// Smallest rectangle covering both rectangles
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_bounds(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Bounding rectangle of a sequence of rectangles, `None` when empty
    pub fn bounding<'a, I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        rects
            .into_iter()
            .fold(None, |acc: Option<Rect>, rect| match acc {
                Some(acc) => Some(acc.union(rect)),
                None => Some(*rect),
            })
    }

    /// True iff the projections overlap on both axes
    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_horizontally(other)
            && (self.center.y - other.center.y).abs() * 2.0 < self.height + other.height
    }

    /// True iff the projections on the x axis overlap
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        (self.center.x - other.center.x).abs() * 2.0 < self.width + other.width
    }

    /// True iff the x projection of `other` lies within the x projection of `self`
    pub fn spans_horizontally(&self, other: &Rect) -> bool {
        other.left() >= self.left() && other.right() <= self.right()
    }
}

/// Wire shape of a [`Rect`]; sizes are clamped and coordinates checked on load
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawRect {
    center: Point,
    width: f32,
    height: f32,
}

impl TryFrom<RawRect> for Rect {
    type Error = FormulaError;

    fn try_from(raw: RawRect) -> FormulaResult<Self> {
        let values = [raw.center.x, raw.center.y, raw.width, raw.height];
        if !values.iter().all(|value| value.is_finite()) {
            return Err(FormulaError::InvalidGeometry(format!(
                "non-finite rectangle {:?}",
                values
            )));
        }
        Ok(Rect::new(raw.center.x, raw.center.y, raw.width, raw.height))
    }
}

impl From<Rect> for RawRect {
    fn from(rect: Rect) -> Self {
        Self {
            center: rect.center,
            width: rect.width,
            height: rect.height,
        }
    }
}
