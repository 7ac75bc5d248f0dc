//! Parser configuration
//!
//! Heuristic constants used while correcting labels and building the tree.

use crate::error::FormulaResult;
use serde::{Deserialize, Serialize};

/// Tunable constants of the parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Relative width difference below which two consecutive "-" become "="
    pub equals_width_tolerance: f32,
    /// How far below the previous box, in units of its height, a "-" must sit to become "/"
    pub fraction_drop_ratio: f32,
    /// Deepest exponent nesting accepted
    pub max_exponent_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            equals_width_tolerance: 0.4,
            fraction_drop_ratio: 0.5,
            max_exponent_depth: 1,
        }
    }
}

impl ParserConfig {
    /// Load a configuration from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> FormulaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
