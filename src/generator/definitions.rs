use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::GeneratorError;
use crate::model::TypeId;

/// Outcome of a definition request.
#[derive(Debug)]
pub(crate) enum DefinitionOutcome {
    /// A completed definition exists; emit a `$ref` to it.
    Existing(String),
    /// The same type is being built further up the stack; emit a `$ref` to
    /// its assigned name without walking it again.
    Combining(String),
    /// A fresh slot was assigned; the caller builds the node and hands it to
    /// [`DefinitionRegistry::complete`].
    Created(String),
}

/// Tracks which types own a `definitions` entry within one generation call.
///
/// Each concrete type is assigned exactly one reference name for the
/// lifetime of the call; repeated encounters resolve to the same reference
/// and never re-walk the type. A single optional in-flight slot records the
/// definition currently under construction, so self-referential walks can
/// short-circuit into a `$ref` instead of recursing forever.
pub(crate) struct DefinitionRegistry {
    /// Type → (entry name, `#/definitions/<name>`).
    assigned: HashMap<TypeId, (String, String)>,
    definitions: Map<String, Value>,
    in_flight: Option<TypeId>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        DefinitionRegistry {
            assigned: HashMap::new(),
            definitions: Map::new(),
            in_flight: None,
        }
    }

    /// Request the definition slot for `ty`, assigning a fresh entry name on
    /// first encounter. Name collisions between distinct types are resolved
    /// with `_1`, `_2`, … suffixes.
    pub fn get_or_create(&mut self, ty: &TypeId, use_type_id: bool) -> DefinitionOutcome {
        if let Some((_, long_ref)) = self.assigned.get(ty) {
            if self.in_flight.as_ref() == Some(ty) {
                return DefinitionOutcome::Combining(long_ref.clone());
            }
            return DefinitionOutcome::Existing(long_ref.clone());
        }

        let mut name = if use_type_id {
            ty.as_str().to_string()
        } else {
            ty.simple().to_string()
        };
        let mut retry = 0;
        while self.assigned.values().any(|(taken, _)| taken == &name) {
            retry += 1;
            name = format!("{}_{}", ty.simple(), retry);
        }

        let long_ref = format!("#/definitions/{name}");
        self.assigned.insert(ty.clone(), (name, long_ref.clone()));
        self.in_flight = Some(ty.clone());
        DefinitionOutcome::Created(long_ref)
    }

    /// Attach a finished definition node and clear the in-flight slot.
    ///
    /// The identity must match the slot when one is recorded; a mismatch is
    /// a generator defect and never reachable through the public entry point.
    pub fn complete(
        &mut self,
        ty: &TypeId,
        node: Map<String, Value>,
    ) -> Result<(), GeneratorError> {
        if let Some(in_flight) = &self.in_flight {
            if in_flight != ty {
                return Err(GeneratorError::InternalConsistency {
                    expected: in_flight.clone(),
                    actual: ty.clone(),
                });
            }
        }
        self.in_flight = None;

        let name = self
            .assigned
            .get(ty)
            .map(|(name, _)| name.clone())
            .expect("definition slot assigned before completion");
        self.definitions.insert(name, Value::Object(node));
        Ok(())
    }

    /// The `definitions` node, or `None` when no references were assigned.
    pub fn into_definitions(self) -> Option<Value> {
        if self.assigned.is_empty() {
            None
        } else {
            Some(Value::Object(self.definitions))
        }
    }
}
