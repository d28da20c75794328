use crate::generator::config::GeneratorConfig;
use crate::model::{MetadataResolver, Subject, TypeId};

/// Format for a schema node: an explicit annotation wins, then the
/// configured type-name → format table, keyed by the subject's type id.
pub(crate) fn resolve_format<M: MetadataResolver>(
    model: &M,
    config: &GeneratorConfig,
    subject: Subject<'_>,
    ty: &TypeId,
) -> Option<String> {
    model
        .format(subject)
        .or_else(|| config.custom_type_format_mapping.get(ty.as_str()).cloned())
}

/// Description for a schema node: the explicit schema description is checked
/// before the generic property description; first found wins.
pub(crate) fn resolve_description<M: MetadataResolver>(
    model: &M,
    subject: Subject<'_>,
) -> Option<String> {
    model
        .schema_description(subject)
        .or_else(|| model.property_description(subject))
}
