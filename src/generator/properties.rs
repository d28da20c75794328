//! Per-property emission: node creation, required-ness, metadata merge.

use serde_json::{json, Map, Value};
use tracing::warn;

use crate::common::names::title_from_identifier;
use crate::error::GeneratorError;
use crate::generator::metadata::{resolve_description, resolve_format};
use crate::generator::visitor::{properties_node, push_required, PropertyContext, TypeVisitor};
use crate::model::{MetadataResolver, PropertyDescriptor, TypeId, TypeModel};

/// Emit one declared property into its containing object node.
///
/// First writer wins: a property whose name is already taken — normally by
/// an injected discriminator — is skipped without error.
pub(crate) fn emit_property<M: TypeModel + MetadataResolver>(
    visitor: &mut TypeVisitor<'_, M>,
    owner: &TypeId,
    property: &PropertyDescriptor,
    object_node: &mut Map<String, Value>,
    next_order: &mut i64,
    level: usize,
) -> Result<(), GeneratorError> {
    let model = visitor.model;
    let config = visitor.config;

    if properties_node(object_node).contains_key(&property.name) {
        if config.warn_on_skipped_property {
            warn!(
                owner = %owner,
                property = %property.name,
                "ignoring property: name already in use, probably as a polymorphism type property"
            );
        }
        return Ok(());
    }

    let descriptor = model.describe_type(&property.ty)?;
    let context = PropertyContext {
        owner,
        name: &property.name,
    };
    let subject = context.subject();

    let order = config.use_property_ordering.then(|| {
        let stamp = *next_order;
        *next_order += 1;
        stamp
    });

    let wrap_option = config.use_one_of_for_option && descriptor.optional_wrapper;

    // Value node: where type, format and validation land. The outer property
    // node carries title and description; the two coincide unless the
    // optional-wrapper union is in play.
    let mut value = Map::new();
    if !wrap_option {
        if let Some(stamp) = order {
            value.insert("propertyOrder".into(), json!(stamp));
        }
    }
    visitor.visit(&property.ty, &mut value, Some(context), level + 1)?;

    // Required: a non-nullable primitive always has a value; otherwise the
    // explicit marker or a not-null constraint decides.
    let required = (descriptor.shape.is_primitive()
        && !descriptor.optional_wrapper
        && !descriptor.nullable)
        || property.required
        || model.not_null(subject);
    if required {
        push_required(object_node, &property.name);
    }

    if let Some(format) = resolve_format(model, config, subject, &property.ty) {
        value.insert("format".into(), json!(format));
    }

    let description = resolve_description(model, subject);
    let title = model.title(subject).or_else(|| {
        config
            .auto_generate_title_for_properties
            .then(|| title_from_identifier(&property.name))
    });

    let node = if wrap_option {
        let mut outer = Map::new();
        if let Some(stamp) = order {
            outer.insert("propertyOrder".into(), json!(stamp));
        }
        if let Some(description) = description {
            outer.insert("description".into(), json!(description));
        }
        if let Some(title) = title {
            outer.insert("title".into(), json!(title));
        }
        outer.insert(
            "oneOf".into(),
            Value::Array(vec![
                json!({ "type": "null", "title": "Not included" }),
                Value::Object(value),
            ]),
        );
        outer
    } else {
        if let Some(description) = description {
            value.insert("description".into(), json!(description));
        }
        if let Some(title) = title {
            value.insert("title".into(), json!(title));
        }
        value
    };

    properties_node(object_node).insert(property.name.clone(), Value::Object(node));
    Ok(())
}
