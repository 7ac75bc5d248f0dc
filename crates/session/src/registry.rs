//! Identifier registry - Declared names and change propagation
//!
//! Declarations record which names their body reads. Redeclaring a name
//! invalidates everything that depends on it, transitively, and notifies
//! the watchers subscribed along the way.

use crate::error::{SessionError, SessionResult};
use crate::request::Declaration;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::fmt;
use tracing::{debug, trace};

/// Functions the solver always knows
pub const BUILTIN_FUNCTIONS: [&str; 4] = ["COS", "SIN", "EXP", "LOG"];

/// Identifier of a subscriber to declaration changes
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WatcherId(pub u64);

impl fmt::Display for WatcherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Watcher({})", self.0)
    }
}

impl From<u64> for WatcherId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Effect of one declaration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Propagation {
    /// The declared name followed by its transitive dependents, breadth first
    pub invalidated: Vec<String>,
    /// Watchers to notify, each once, in the order they were reached
    pub notified: Vec<WatcherId>,
}

/// Names known to a session
#[derive(Debug, Clone, Default)]
pub struct IdentifierRegistry {
    declarations: BTreeMap<String, Declaration>,
    /// dependency -> names whose body reads it
    dependents: BTreeMap<String, BTreeSet<String>>,
    watchers: BTreeMap<String, BTreeSet<WatcherId>>,
    any_change: BTreeSet<WatcherId>,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration, replacing any previous one with the same name.
    pub fn declare(&mut self, declaration: Declaration) -> SessionResult<Propagation> {
        let name = declaration.name().to_string();
        if is_builtin(&name) {
            return Err(SessionError::InvalidDeclaration(format!(
                "{} is a built-in function",
                name
            )));
        }

        if let Some(previous) = self.declarations.remove(&name) {
            for dependency in previous.dependencies() {
                if let Some(dependents) = self.dependents.get_mut(dependency) {
                    dependents.remove(&name);
                }
            }
            self.dependents.retain(|_, dependents| !dependents.is_empty());
        }
        for dependency in declaration.dependencies() {
            self.dependents
                .entry(dependency.clone())
                .or_default()
                .insert(name.clone());
        }

        debug!(
            target: "session::registry",
            name = %name,
            function = declaration.is_function(),
            dependencies = declaration.dependencies().len(),
            "declared"
        );
        self.declarations.insert(name.clone(), declaration);
        Ok(self.propagate(name))
    }

    fn propagate(&self, name: String) -> Propagation {
        let mut propagation = Propagation::default();
        let mut notified = HashSet::new();
        let mut visited = HashSet::from([name.clone()]);
        let mut queue = VecDeque::from([name]);

        while let Some(current) = queue.pop_front() {
            trace!(target: "session::registry", name = %current, "invalidated");
            if let Some(watchers) = self.watchers.get(&current) {
                for watcher in watchers {
                    if notified.insert(*watcher) {
                        propagation.notified.push(*watcher);
                    }
                }
            }
            if let Some(dependents) = self.dependents.get(&current) {
                for dependent in dependents {
                    if visited.insert(dependent.clone()) {
                        queue.push_back(dependent.clone());
                    }
                }
            }
            propagation.invalidated.push(current);
        }

        for watcher in &self.any_change {
            if notified.insert(*watcher) {
                propagation.notified.push(*watcher);
            }
        }
        propagation
    }

    /// Subscribe to changes of `name`, declared or not
    pub fn watch(&mut self, name: impl Into<String>, watcher: WatcherId) {
        self.watchers.entry(name.into()).or_default().insert(watcher);
    }

    /// Subscribe to every declaration
    pub fn watch_all(&mut self, watcher: WatcherId) {
        self.any_change.insert(watcher);
    }

    pub fn unwatch(&mut self, watcher: WatcherId) {
        for watchers in self.watchers.values_mut() {
            watchers.remove(&watcher);
        }
        self.watchers.retain(|_, watchers| !watchers.is_empty());
        self.any_change.remove(&watcher);
    }

    /// Built-in and declared names, longest first
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTIN_FUNCTIONS
            .iter()
            .map(|name| name.to_string())
            .chain(self.declarations.keys().cloned())
            .collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names
    }

    pub fn is_function(&self, name: &str) -> bool {
        is_builtin(name)
            || self
                .declarations
                .get(name)
                .is_some_and(Declaration::is_function)
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

fn is_builtin(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}
