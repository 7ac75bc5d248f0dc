//! Formula Crate - Structure recovery for handwritten math
//!
//! Recognized characters arrive as labeled boxes with no grouping markers.
//! This crate rebuilds the two-dimensional structure they encode:
//! - Label correction from spatial context (`=`, division bars, O/0, S/5)
//! - Fractions, resolved widest bar first and nested recursively
//! - Digit and letter runs, with exponents detected from vertical position
//! - Letter runs segmented against known identifier names
//! - Equations split around their single `=`
//! - Linear rendering with implicit multiplication

pub mod config;
pub mod disambiguate;
pub mod equation;
pub mod error;
pub mod fraction;
pub mod geometry;
pub mod group;
pub mod identifiers;
pub mod model;
pub mod parser;
pub mod render;
pub mod symbol;

pub use config::ParserConfig;
pub use disambiguate::disambiguate;
pub use error::*;
pub use geometry::{Point, Rect};
pub use model::{Equation, Expression, Fraction, Group, Item, Node, Parsed};
pub use parser::{parse, FormulaParser, Mode};
pub use render::{render, render_equation, render_expression};
pub use symbol::{Kind, LabeledBox, DIVIDE, EQUALS, MINUS};
