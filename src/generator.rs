pub mod config;
pub(crate) mod definitions;
pub(crate) mod metadata;
pub(crate) mod properties;
pub(crate) mod visitor;

pub use config::GeneratorConfig;

use std::fs;

use serde_json::{json, Map, Value};

use crate::catalog::TypeCatalog;
use crate::common::names::title_from_identifier;
use crate::error::GeneratorError;
use crate::model::{MetadataResolver, TypeId, TypeModel};
use visitor::TypeVisitor;

/// Fixed draft-04 meta-schema URL written to every document.
pub const JSON_SCHEMA_DRAFT_4_URL: &str = "http://json-schema.org/draft-04/schema#";

/// Generates JSON Schema draft-04 documents from a host object model.
///
/// One `generate` call walks the type graph reachable from the root exactly
/// once per distinct type and returns one complete document. Nothing is
/// shared between calls except the configuration and the model itself: the
/// definition registry is allocated fresh per call, so a generator behind a
/// shared reference is safe to use from multiple threads.
pub struct SchemaGenerator<'m, M> {
    model: &'m M,
    config: GeneratorConfig,
}

impl<'m, M: TypeModel + MetadataResolver> SchemaGenerator<'m, M> {
    pub fn new(model: &'m M) -> Self {
        SchemaGenerator {
            model,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(model: &'m M, config: GeneratorConfig) -> Self {
        SchemaGenerator { model, config }
    }

    /// Generate a schema document for `root`.
    pub fn generate(&self, root: &TypeId) -> Result<Value, GeneratorError> {
        self.generate_with(root, None, None)
    }

    /// Generate a schema document with explicit title and description.
    ///
    /// Without a title, one is derived from the root type's simple name. A
    /// type-level description encountered during the walk overrides the
    /// description given here.
    pub fn generate_with(
        &self,
        root: &TypeId,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Value, GeneratorError> {
        let mut node = Map::new();
        node.insert("$schema".into(), json!(JSON_SCHEMA_DRAFT_4_URL));
        node.insert(
            "title".into(),
            json!(title
                .map(str::to_string)
                .unwrap_or_else(|| title_from_identifier(root.simple()))),
        );
        if let Some(description) = description {
            node.insert("description".into(), json!(description));
        }

        let mut visitor = TypeVisitor::new(self.model, &self.config);
        visitor.visit(root, &mut node, None, 0)?;

        if let Some(definitions) = visitor.definitions.into_definitions() {
            node.insert("definitions".into(), definitions);
        }
        Ok(Value::Object(node))
    }
}

/// Convert a model-description file into a JSON Schema file.
///
/// This reads a model description (from disk or HTTP), generates the schema
/// for the requested root type, and writes the document pretty-printed.
///
/// # Arguments
/// * `model_path` - Path or URL of the input model description.
/// * `schema_path` - Path where the schema document will be written.
/// * `root` - Root type override; falls back to the model's own `root`.
/// * `title` - Optional title override for the document.
/// * `description` - Optional description for the document.
/// * `config` - Generation options.
///
/// # Returns
/// Returns `Ok(())` on success, or an error string if conversion failed.
pub fn convert_model_to_schema(
    model_path: &str,
    schema_path: &str,
    root: Option<&str>,
    title: Option<&str>,
    description: Option<&str>,
    config: GeneratorConfig,
) -> Result<(), String> {
    let content = if model_path.starts_with("http") {
        reqwest::blocking::get(model_path)
            .map_err(|e| format!("HTTP fetch failed: {e}"))?
            .text()
            .map_err(|e| format!("Invalid response body: {e}"))?
    } else {
        fs::read_to_string(model_path).map_err(|e| format!("Failed to read model file: {e}"))?
    };

    let catalog: TypeCatalog =
        serde_json::from_str(&content).map_err(|e| format!("Invalid model description: {e}"))?;

    let root = root
        .map(str::to_string)
        .or_else(|| catalog.root.clone())
        .ok_or("No root type given and the model declares none")?;

    let generator = SchemaGenerator::with_config(&catalog, config);
    let schema = generator
        .generate_with(&TypeId::new(root), title, description)
        .map_err(|e| format!("Schema generation failed: {e}"))?;

    fs::write(schema_path, serde_json::to_string_pretty(&schema).unwrap())
        .map_err(|e| format!("Failed to write {schema_path}: {e}"))?;

    Ok(())
}
