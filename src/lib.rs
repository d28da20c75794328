//! # model2jsonschema
//!
//! Derive [JSON Schema](https://json-schema.org/) draft-04 documents from a
//! statically-typed object model.
//!
//! ## Features
//!
//! - Walks an arbitrary, possibly cyclic type graph exactly once per type
//! - De-duplicates repeated types into `definitions` + `$ref`
//! - Encodes tagged subtype sets as `oneOf` with injected discriminators
//! - Merges field-level, validation and type-level metadata per property
//! - CLI tool `model2jsonschema` for model-description files
//!
//! ## Example (Programmatic Usage)
//!
//! ```no_run
//! use serde_json::json;
//! use model2jsonschema::catalog::TypeCatalog;
//! use model2jsonschema::model::TypeId;
//! use model2jsonschema::SchemaGenerator;
//!
//! let catalog: TypeCatalog = serde_json::from_value(json!({
//!     "types": [
//!         {
//!             "name": "Person",
//!             "kind": "object",
//!             "properties": [
//!                 { "name": "name", "type": "String" },
//!                 { "name": "age", "type": "Option<i64>" }
//!             ]
//!         }
//!     ]
//! })).unwrap();
//!
//! let generator = SchemaGenerator::new(&catalog);
//! let schema = generator.generate(&TypeId::new("Person")).unwrap();
//!
//! println!("{}", serde_json::to_string_pretty(&schema).unwrap());
//! ```
//!
//! ## Example (CLI)
//!
//! ```bash
//! model2jsonschema model.json out.schema.json --root Person
//! ```
//!
//! ## Crate Layout
//!
//! - [`model`] — Type and property descriptors + the collaborator traits
//! - [`catalog`] — Declarative in-memory model implementation
//! - [`generator`] — Type-graph walker and schema document assembly
//! - [`common`] — Identifier-to-title helpers

pub mod catalog;
pub mod common;
pub mod error;
pub mod generator;
pub mod model;

pub use error::GeneratorError;
pub use generator::{GeneratorConfig, SchemaGenerator};
