use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{LoxError, Result};
use crate::value::Value;

/// One frame of the lexical scope chain.
///
/// Frames are independently owned allocations behind `Rc<RefCell<_>>`;
/// closures alias parents, they never copy them.  The `*_at` accessors hop
/// exactly the distance the resolver computed, so a lookup never scans more
/// frames than the static analysis promised.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Bind `name` in this frame, shadowing or redefining without complaint.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Read `name`, walking up the parent chain.
    pub fn get(&self, name: &str, line: usize) -> Result<Value> {
        if let Some(value) = self.values.get(name) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name, line)
        } else {
            Err(LoxError::runtime(
                line,
                format!("Undefined variable: {}.", name),
            ))
        }
    }

    /// Write `name` in the nearest frame that already binds it.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> Result<()> {
        if self.values.contains_key(name) {
            self.values.insert(name.to_string(), value);

            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value, line)
        } else {
            Err(LoxError::runtime(
                line,
                format!("Cannot assign undeclared variable: '{}'.", name),
            ))
        }
    }

    /// Read `name` from the frame exactly `distance` hops up the chain.
    ///
    /// The resolver guarantees the binding exists there; a miss means the
    /// static pass and the runtime chain disagree, which is surfaced as a
    /// runtime error rather than a panic.
    pub fn get_at(&self, distance: usize, name: &str, line: usize) -> Result<Value> {
        if distance == 0 {
            return self.values.get(name).cloned().ok_or_else(|| {
                LoxError::runtime(
                    line,
                    format!("Variable '{}' missing from its resolved scope.", name),
                )
            });
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow().get_at(distance - 1, name, line),

            None => Err(LoxError::runtime(
                line,
                format!("No enclosing scope at distance {} for '{}'.", distance, name),
            )),
        }
    }

    /// Symmetric write: assign `name` in the frame exactly `distance` hops up.
    pub fn assign_at(
        &mut self,
        distance: usize,
        name: &str,
        value: Value,
        line: usize,
    ) -> Result<()> {
        if distance == 0 {
            if !self.values.contains_key(name) {
                return Err(LoxError::runtime(
                    line,
                    format!("Variable '{}' missing from its resolved scope.", name),
                ));
            }

            self.values.insert(name.to_string(), value);

            return Ok(());
        }

        match &self.enclosing {
            Some(enclosing) => enclosing
                .borrow_mut()
                .assign_at(distance - 1, name, value, line),

            None => Err(LoxError::runtime(
                line,
                format!("No enclosing scope at distance {} for '{}'.", distance, name),
            )),
        }
    }
}
