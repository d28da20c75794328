use std::collections::HashMap;

/// Generation options, fixed at generator construction.
///
/// `Default` produces plain draft-04 output. [`GeneratorConfig::html5`] is
/// tuned for schema-driven HTML5 form editors such as
/// [json-editor](https://github.com/jdorn/json-editor).
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Derive a `title` from the property name when none is supplied.
    pub auto_generate_title_for_properties: bool,
    /// `format` written on every array node (e.g. `"table"`).
    pub default_array_format: Option<String>,
    /// Render optional-wrapped properties as `oneOf` of null and the value.
    pub use_one_of_for_option: bool,
    /// Stamp `propertyOrder` in declaration order.
    pub use_property_ordering: bool,
    /// Mark injected discriminator properties with `options.hidden`.
    pub hide_polymorphism_type_property: bool,
    /// Log when a declared property collides with an injected one.
    pub warn_on_skipped_property: bool,
    /// Write `minLength: 1` for not-null strings without explicit bounds.
    pub use_min_length_for_not_null: bool,
    /// Name definitions by full type id instead of simple name.
    pub use_type_id_for_definition_name: bool,
    /// Type id → `format` value, consulted when no explicit format is set.
    pub custom_type_format_mapping: HashMap<String, String>,
}

impl GeneratorConfig {
    /// Preset for schemas that drive HTML5 form editors.
    pub fn html5() -> Self {
        GeneratorConfig {
            auto_generate_title_for_properties: true,
            default_array_format: Some("table".to_string()),
            use_one_of_for_option: true,
            use_property_ordering: true,
            hide_polymorphism_type_property: true,
            warn_on_skipped_property: false,
            use_min_length_for_not_null: true,
            use_type_id_for_definition_name: false,
            custom_type_format_mapping: HashMap::from([
                ("chrono::NaiveDateTime".to_string(), "datetime-local".to_string()),
                ("chrono::DateTime".to_string(), "datetime".to_string()),
                ("chrono::NaiveDate".to_string(), "date".to_string()),
            ]),
        }
    }
}
