use thiserror::Error;

use crate::model::TypeId;

/// Errors that abort a schema-generation call.
///
/// Every variant is fatal to the current `generate` invocation: the walk
/// unwinds and no partial document is returned.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The model declares a discriminator mechanism other than an external,
    /// string-named type property.
    #[error("unsupported polymorphism configuration on {type_id}: {detail}")]
    UnsupportedPolymorphism { type_id: TypeId, detail: String },

    /// A definition build completed against the wrong in-flight identity.
    /// Indicates a generator defect, not bad model input.
    #[error("wrong class - working on {expected} - got {actual}")]
    InternalConsistency { expected: TypeId, actual: TypeId },

    /// A declared subtype has no resolvable discriminator tag.
    #[error("no subtype tag registered for {subtype} under {parent}")]
    MissingSubtypeTag { parent: TypeId, subtype: TypeId },

    /// A type expression references a name the model does not declare.
    #[error("unknown type: {0}")]
    UnknownType(String),
}
