//! Recursive type-to-schema walker.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::GeneratorError;
use crate::generator::config::GeneratorConfig;
use crate::generator::definitions::{DefinitionOutcome, DefinitionRegistry};
use crate::generator::metadata::{resolve_description, resolve_format};
use crate::generator::properties::emit_property;
use crate::model::{
    MetadataResolver, Subject, TypeDescriptor, TypeId, TypeModel, TypeShape,
};

/// Context for the property whose type is currently being visited; drives
/// the validation and default lookups on primitive nodes.
#[derive(Clone, Copy)]
pub(crate) struct PropertyContext<'a> {
    pub owner: &'a TypeId,
    pub name: &'a str,
}

impl<'a> PropertyContext<'a> {
    pub(crate) fn subject(&self) -> Subject<'a> {
        Subject::Property {
            owner: self.owner,
            name: self.name,
        }
    }
}

/// Recursive walker over the model's type graph.
///
/// One instance lives for the duration of a single generation call and owns
/// that call's [`DefinitionRegistry`].
pub(crate) struct TypeVisitor<'a, M> {
    pub model: &'a M,
    pub config: &'a GeneratorConfig,
    pub definitions: DefinitionRegistry,
}

impl<'a, M: TypeModel + MetadataResolver> TypeVisitor<'a, M> {
    pub fn new(model: &'a M, config: &'a GeneratorConfig) -> Self {
        TypeVisitor {
            model,
            config,
            definitions: DefinitionRegistry::new(),
        }
    }

    /// Fill `node` with the schema fragment for `ty`.
    pub fn visit(
        &mut self,
        ty: &TypeId,
        node: &mut Map<String, Value>,
        property: Option<PropertyContext<'_>>,
        level: usize,
    ) -> Result<(), GeneratorError> {
        let descriptor = self.model.describe_type(ty)?;
        debug!(level, ty = %descriptor.id, shape = ?descriptor.shape, "visit");

        if descriptor.optional_wrapper {
            // The null channel is handled at the property site; the walk
            // continues into the contained type.
            if let Some(element) = descriptor.element.clone() {
                return self.visit(&element, node, property, level);
            }
            return Ok(());
        }

        match descriptor.shape {
            TypeShape::String => self.string_node(&descriptor, node, property),
            TypeShape::Integer => self.integer_node(&descriptor, node, property),
            TypeShape::Number => self.number_node(&descriptor, node, property),
            TypeShape::Boolean => self.boolean_node(&descriptor, node, property),
            TypeShape::Null => {
                node.insert("type".into(), json!("null"));
            }
            TypeShape::Any => {}
            TypeShape::Array => return self.visit_array(&descriptor, node, level),
            TypeShape::Map => {
                // Draft-04 has no map construct; approximate as an open
                // object. The value type is not walked.
                node.insert("type".into(), json!("object"));
                node.insert("additionalProperties".into(), json!(true));
            }
            TypeShape::Object => return self.visit_object(&descriptor, node, level),
        }
        Ok(())
    }

    fn string_node(
        &self,
        descriptor: &TypeDescriptor,
        node: &mut Map<String, Value>,
        property: Option<PropertyContext<'_>>,
    ) {
        node.insert("type".into(), json!("string"));

        if let Some(property) = property {
            let subject = property.subject();
            if let Some(pattern) = self.model.pattern(subject) {
                node.insert("pattern".into(), json!(pattern));
            }
            if let Some(default) = self.model.default_value(subject) {
                node.insert("default".into(), json!(default));
            }
            if let Some(min) = self.model.min_length(subject) {
                node.insert("minLength".into(), json!(min));
            }
            if let Some(max) = self.model.max_length(subject) {
                node.insert("maxLength".into(), json!(max));
            }
            if self.config.use_min_length_for_not_null
                && !node.contains_key("minLength")
                && !node.contains_key("maxLength")
                && self.model.not_null(subject)
            {
                node.insert("minLength".into(), json!(1));
            }
        }

        enum_values(descriptor, node);
    }

    fn integer_node(
        &self,
        descriptor: &TypeDescriptor,
        node: &mut Map<String, Value>,
        property: Option<PropertyContext<'_>>,
    ) {
        node.insert("type".into(), json!("integer"));
        self.numeric_bounds(node, property);
        if let Some(property) = property {
            if let Some(default) = self.model.default_value(property.subject()) {
                if let Ok(value) = default.parse::<i64>() {
                    node.insert("default".into(), json!(value));
                }
            }
        }
        enum_values(descriptor, node);
    }

    fn number_node(
        &self,
        descriptor: &TypeDescriptor,
        node: &mut Map<String, Value>,
        property: Option<PropertyContext<'_>>,
    ) {
        node.insert("type".into(), json!("number"));
        self.numeric_bounds(node, property);
        if let Some(property) = property {
            if let Some(default) = self.model.default_value(property.subject()) {
                if let Ok(value) = default.parse::<f64>() {
                    node.insert("default".into(), json!(value));
                }
            }
        }
        enum_values(descriptor, node);
    }

    fn boolean_node(
        &self,
        descriptor: &TypeDescriptor,
        node: &mut Map<String, Value>,
        property: Option<PropertyContext<'_>>,
    ) {
        node.insert("type".into(), json!("boolean"));
        if let Some(property) = property {
            if let Some(default) = self.model.default_value(property.subject()) {
                node.insert("default".into(), json!(default.eq_ignore_ascii_case("true")));
            }
        }
        enum_values(descriptor, node);
    }

    /// `minimum`/`maximum` are always written as literal numbers.
    fn numeric_bounds(
        &self,
        node: &mut Map<String, Value>,
        property: Option<PropertyContext<'_>>,
    ) {
        if let Some(property) = property {
            let subject = property.subject();
            if let Some(min) = self.model.minimum(subject) {
                node.insert("minimum".into(), json!(min));
            }
            if let Some(max) = self.model.maximum(subject) {
                node.insert("maximum".into(), json!(max));
            }
        }
    }

    fn visit_array(
        &mut self,
        descriptor: &TypeDescriptor,
        node: &mut Map<String, Value>,
        level: usize,
    ) -> Result<(), GeneratorError> {
        node.insert("type".into(), json!("array"));
        if let Some(format) = &self.config.default_array_format {
            node.insert("format".into(), json!(format));
        }

        let mut items = Map::new();
        if let Some(element) = &descriptor.element {
            // Item nodes carry no property context: per-property validation
            // does not apply to elements.
            self.visit(element, &mut items, None, level + 1)?;
        }
        node.insert("items".into(), Value::Object(items));
        Ok(())
    }

    fn visit_object(
        &mut self,
        descriptor: &TypeDescriptor,
        node: &mut Map<String, Value>,
        level: usize,
    ) -> Result<(), GeneratorError> {
        let subtypes: Vec<&TypeId> = descriptor
            .subtypes
            .iter()
            .filter(|subtype| **subtype != descriptor.id)
            .collect();

        if !subtypes.is_empty() {
            // Polymorphic base: a oneOf over subtype definitions; the node
            // gets no type/properties of its own.
            let mut one_of = Vec::new();
            for subtype in subtypes {
                debug!(subtype = %subtype, "polymorphism");
                let reference = match self
                    .definitions
                    .get_or_create(subtype, self.config.use_type_id_for_definition_name)
                {
                    DefinitionOutcome::Existing(reference)
                    | DefinitionOutcome::Combining(reference) => reference,
                    DefinitionOutcome::Created(reference) => {
                        let mut definition = Map::new();
                        self.build_object_schema(subtype, &mut definition, level + 1)?;
                        self.definitions.complete(subtype, definition)?;
                        reference
                    }
                };
                one_of.push(json!({ "$ref": reference }));
            }
            node.insert("oneOf".into(), Value::Array(one_of));
            return Ok(());
        }

        if level == 0 {
            // The root is always built in place, never behind a $ref.
            return self.build_object_schema(&descriptor.id, node, level);
        }

        match self
            .definitions
            .get_or_create(&descriptor.id, self.config.use_type_id_for_definition_name)
        {
            DefinitionOutcome::Existing(reference) | DefinitionOutcome::Combining(reference) => {
                node.insert("$ref".into(), json!(reference));
            }
            DefinitionOutcome::Created(reference) => {
                let mut definition = Map::new();
                self.build_object_schema(&descriptor.id, &mut definition, level)?;
                self.definitions.complete(&descriptor.id, definition)?;
                node.insert("$ref".into(), json!(reference));
            }
        }
        Ok(())
    }

    /// Fill `node` with a plain object schema for `ty`: type-level metadata,
    /// the synthetic discriminator property when `ty` is a discriminated
    /// subtype, then the declared properties.
    pub(crate) fn build_object_schema(
        &mut self,
        ty: &TypeId,
        node: &mut Map<String, Value>,
        level: usize,
    ) -> Result<(), GeneratorError> {
        node.insert("type".into(), json!("object"));
        node.insert("additionalProperties".into(), json!(false));

        let subject = Subject::Type(ty);
        if let Some(format) = resolve_format(self.model, self.config, subject, ty) {
            node.insert("format".into(), json!(format));
        }
        if let Some(description) = resolve_description(self.model, subject) {
            node.insert("description".into(), json!(description));
        }
        if let Some(title) = self.model.title(subject) {
            node.insert("title".into(), json!(title));
        }

        node.insert("properties".into(), Value::Object(Map::new()));

        if let Some(info) = self.model.polymorphism_info(ty)? {
            let tag = self.model.resolve_subtype_tag(&info.parent, ty).ok_or_else(|| {
                GeneratorError::MissingSubtypeTag {
                    parent: info.parent.clone(),
                    subtype: ty.clone(),
                }
            })?;

            // Subtype schemas are titled by their wire tag.
            node.insert("title".into(), Value::String(tag.clone()));

            let mut tag_node = json!({
                "type": "string",
                "enum": [tag.clone()],
                "default": tag,
            });
            if self.config.hide_polymorphism_type_property {
                tag_node["options"] = json!({ "hidden": true });
            }
            properties_node(node).insert(info.type_property.clone(), tag_node);
            push_required(node, &info.type_property);
        }

        let properties = self.model.describe_properties(ty)?;
        let mut next_order = 1i64;
        for property in &properties {
            emit_property(self, ty, property, node, &mut next_order, level)?;
        }
        Ok(())
    }
}

/// Write the enum value set, if the type declares one.
fn enum_values(descriptor: &TypeDescriptor, node: &mut Map<String, Value>) {
    if !descriptor.enum_values.is_empty() {
        node.insert("enum".into(), json!(descriptor.enum_values));
    }
}

/// The `properties` child of an object node.
pub(crate) fn properties_node(node: &mut Map<String, Value>) -> &mut Map<String, Value> {
    node.get_mut("properties")
        .and_then(Value::as_object_mut)
        .expect("object node has a properties node")
}

/// Append to the `required` array, creating it on first use. Names are kept
/// in first-added order and never duplicated.
pub(crate) fn push_required(node: &mut Map<String, Value>, name: &str) {
    let required = node
        .entry("required")
        .or_insert_with(|| json!([]))
        .as_array_mut()
        .expect("required is an array");
    if !required.iter().any(|entry| entry.as_str() == Some(name)) {
        required.push(json!(name));
    }
}
