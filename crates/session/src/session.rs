//! Session - Formulas sharing one set of declared names

use crate::drawing::Formula;
use crate::error::{SessionError, SessionResult};
use crate::registry::{IdentifierRegistry, Propagation};
use crate::request::{build_request, Request};
use formula::{FormulaParser, ParserConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Result of submitting one formula
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub request: Request,
    /// Set when the formula declared a name
    pub propagation: Option<Propagation>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    registry: IdentifierRegistry,
    parser: FormulaParser,
    formulas: Vec<Formula>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            parser: FormulaParser::with_config(config),
            ..Self::default()
        }
    }

    pub fn registry(&self) -> &IdentifierRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut IdentifierRegistry {
        &mut self.registry
    }

    pub fn parser(&self) -> &FormulaParser {
        &self.parser
    }

    pub fn formulas(&self) -> &[Formula] {
        &self.formulas
    }

    /// Add a formula and return its index
    pub fn add_formula(&mut self, formula: Formula) -> usize {
        self.formulas.push(formula);
        self.formulas.len() - 1
    }

    pub fn formula_mut(&mut self, index: usize) -> Option<&mut Formula> {
        self.formulas.get_mut(index)
    }

    /// Parse the formula at `index` and apply its request.
    ///
    /// Declarations are recorded in the registry before returning.
    pub fn submit(&mut self, index: usize) -> SessionResult<Outcome> {
        let formula = self
            .formulas
            .get(index)
            .ok_or(SessionError::UnknownFormula(index))?;
        let parsed = formula.parse(&self.registry, &self.parser)?;
        let request = build_request(&parsed, formula.mode())?;

        let propagation = match &request {
            Request::Declare { declaration } => {
                Some(self.registry.declare(declaration.clone())?)
            }
            _ => None,
        };
        info!(target: "session::formula", index, request = %request, "submitted");
        Ok(Outcome {
            request,
            propagation,
        })
    }

    /// Submit every formula in order; a failure does not stop the rest
    pub fn submit_all(&mut self) -> Vec<SessionResult<Outcome>> {
        (0..self.formulas.len())
            .map(|index| {
                let outcome = self.submit(index);
                if let Err(err) = &outcome {
                    warn!(target: "session::formula", index, error = %err, "formula rejected");
                }
                outcome
            })
            .collect()
    }
}
