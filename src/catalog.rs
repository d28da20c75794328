//! Declarative in-memory type catalog.
//!
//! A [`TypeCatalog`] describes an object model as data: named types with
//! their properties, subtype registrations and metadata. It implements the
//! [`TypeModel`] and [`MetadataResolver`] collaborator traits, and it
//! deserializes straight from a model-description JSON document, which is
//! what the CLI loads.
//!
//! Property types are written as Rust-style type expressions:
//!
//! - `Option<T>` — optional wrapper around `T`
//! - `Vec<T>` — array of `T`
//! - `HashMap<K, V>` / `BTreeMap<K, V>` / `Map<K, V>` — map with `V` values
//! - built-in scalars: `String`/`str`, the integer primitives, `f32`/`f64`,
//!   `bool`, `()` for null, `Value`/`any` for untyped content
//! - any other name must be declared in the catalog

use serde::Deserialize;

use crate::error::GeneratorError;
use crate::model::{
    Discriminator, DiscriminatorStyle, MetadataResolver, PolymorphismDescriptor,
    PropertyDescriptor, Subject, TypeDescriptor, TypeId, TypeModel, TypeShape,
};

/// Kind keyword for a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    String,
    Integer,
    Number,
    Boolean,
    Null,
    Any,
    Array,
    Map,
    Object,
}

impl From<TypeKind> for TypeShape {
    fn from(kind: TypeKind) -> Self {
        match kind {
            TypeKind::String => TypeShape::String,
            TypeKind::Integer => TypeShape::Integer,
            TypeKind::Number => TypeShape::Number,
            TypeKind::Boolean => TypeShape::Boolean,
            TypeKind::Null => TypeShape::Null,
            TypeKind::Any => TypeShape::Any,
            TypeKind::Array => TypeShape::Array,
            TypeKind::Map => TypeShape::Map,
            TypeKind::Object => TypeShape::Object,
        }
    }
}

/// Metadata block attachable to a declared type or property.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetadataBlock {
    pub format: Option<String>,
    /// Explicit schema description; wins over `property_description`.
    pub description: Option<String>,
    pub property_description: Option<String>,
    pub title: Option<String>,
    /// Raw default literal, coerced per node type during generation.
    pub default: Option<String>,
    pub pattern: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
    pub not_null: bool,
}

/// One declared property.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub metadata: MetadataBlock,
}

/// One registered subtype of a polymorphic base.
#[derive(Debug, Clone, Deserialize)]
pub struct SubtypeDef {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Body of a declared type.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDef {
    pub kind: TypeKind,
    /// Element type for arrays, value type for maps.
    #[serde(default)]
    pub element: Option<String>,
    /// Scalar with a null channel even when not optional-wrapped.
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, rename = "enum")]
    pub enum_values: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
    #[serde(default)]
    pub subtypes: Vec<SubtypeDef>,
    #[serde(default)]
    pub discriminator: Option<Discriminator>,
    #[serde(default)]
    pub metadata: MetadataBlock,
}

/// A declared type with its name.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(flatten)]
    pub def: TypeDef,
}

/// A declarative object model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeCatalog {
    /// Default root type for CLI conversion.
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl TypeCatalog {
    fn find(&self, name: &str) -> Option<&TypeDef> {
        self.types
            .iter()
            .find(|decl| decl.name == name)
            .map(|decl| &decl.def)
    }

    fn find_property(&self, owner: &str, name: &str) -> Option<&PropertyDef> {
        self.find(owner)?
            .properties
            .iter()
            .find(|property| property.name == name)
    }

    fn metadata_for(&self, subject: Subject<'_>) -> Option<&MetadataBlock> {
        match subject {
            Subject::Type(ty) => self.find(ty.as_str()).map(|def| &def.metadata),
            Subject::Property { owner, name } => self
                .find_property(owner.as_str(), name)
                .map(|property| &property.metadata),
        }
    }

    fn builtin(expr: &str) -> Option<TypeShape> {
        match expr {
            "String" | "str" | "string" => Some(TypeShape::String),
            "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" => {
                Some(TypeShape::Integer)
            }
            "f32" | "f64" => Some(TypeShape::Number),
            "bool" => Some(TypeShape::Boolean),
            "()" => Some(TypeShape::Null),
            "Value" | "any" => Some(TypeShape::Any),
            _ => None,
        }
    }
}

/// Split a type expression like `HashMap<String, Vec<i64>>` into its head
/// and comma-separated generic arguments, respecting nesting.
fn split_generic(expr: &str) -> Option<(&str, Vec<String>)> {
    let open = expr.find('<')?;
    if !expr.ends_with('>') {
        return None;
    }
    let head = expr[..open].trim();
    let inner = &expr[open + 1..expr.len() - 1];

    let mut args = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for ch in inner.chars() {
        if ch == ',' && depth == 0 {
            args.push(current.trim().to_string());
            current.clear();
        } else {
            if ch == '<' {
                depth += 1;
            } else if ch == '>' {
                depth -= 1;
            }
            current.push(ch);
        }
    }
    if !current.trim().is_empty() {
        args.push(current.trim().to_string());
    }
    Some((head, args))
}

impl TypeModel for TypeCatalog {
    fn describe_type(&self, ty: &TypeId) -> Result<TypeDescriptor, GeneratorError> {
        let expr = ty.as_str();

        if let Some((head, args)) = split_generic(expr) {
            match head {
                "Option" if args.len() == 1 => {
                    let mut descriptor = TypeDescriptor::scalar(ty.clone(), TypeShape::Any);
                    descriptor.optional_wrapper = true;
                    descriptor.element = Some(TypeId::new(args[0].as_str()));
                    return Ok(descriptor);
                }
                "Vec" if args.len() == 1 => {
                    let mut descriptor = TypeDescriptor::scalar(ty.clone(), TypeShape::Array);
                    descriptor.element = Some(TypeId::new(args[0].as_str()));
                    return Ok(descriptor);
                }
                "HashMap" | "BTreeMap" | "Map" if args.len() == 2 => {
                    let mut descriptor = TypeDescriptor::scalar(ty.clone(), TypeShape::Map);
                    descriptor.element = Some(TypeId::new(args[1].as_str()));
                    return Ok(descriptor);
                }
                _ => return Err(GeneratorError::UnknownType(expr.to_string())),
            }
        }

        if let Some(def) = self.find(expr) {
            return Ok(TypeDescriptor {
                id: ty.clone(),
                shape: def.kind.into(),
                element: def.element.as_deref().map(TypeId::new),
                subtypes: def
                    .subtypes
                    .iter()
                    .map(|subtype| TypeId::new(subtype.ty.as_str()))
                    .collect(),
                nullable: def.nullable,
                optional_wrapper: false,
                enum_values: def.enum_values.clone(),
            });
        }

        if let Some(shape) = Self::builtin(expr) {
            return Ok(TypeDescriptor::scalar(ty.clone(), shape));
        }

        Err(GeneratorError::UnknownType(expr.to_string()))
    }

    fn describe_properties(
        &self,
        ty: &TypeId,
    ) -> Result<Vec<PropertyDescriptor>, GeneratorError> {
        let Some(def) = self.find(ty.as_str()) else {
            return Ok(Vec::new());
        };
        Ok(def
            .properties
            .iter()
            .map(|property| PropertyDescriptor {
                name: property.name.clone(),
                ty: TypeId::new(property.ty.as_str()),
                required: property.required,
            })
            .collect())
    }

    fn polymorphism_info(
        &self,
        ty: &TypeId,
    ) -> Result<Option<PolymorphismDescriptor>, GeneratorError> {
        for decl in &self.types {
            if !decl
                .def
                .subtypes
                .iter()
                .any(|subtype| subtype.ty == ty.as_str())
            {
                continue;
            }
            let Some(discriminator) = &decl.def.discriminator else {
                continue;
            };
            return match discriminator.style {
                DiscriminatorStyle::Property => Ok(Some(PolymorphismDescriptor {
                    parent: TypeId::new(decl.name.as_str()),
                    type_property: discriminator.property.clone(),
                })),
                other => Err(GeneratorError::UnsupportedPolymorphism {
                    type_id: TypeId::new(decl.name.as_str()),
                    detail: format!(
                        "subtypes must be discriminated by a named string property, not {other}"
                    ),
                }),
            };
        }
        Ok(None)
    }

    fn resolve_subtype_tag(&self, parent: &TypeId, concrete: &TypeId) -> Option<String> {
        self.find(parent.as_str())?
            .subtypes
            .iter()
            .find(|subtype| subtype.ty == concrete.as_str())?
            .tag
            .clone()
    }
}

impl MetadataResolver for TypeCatalog {
    fn format(&self, subject: Subject<'_>) -> Option<String> {
        self.metadata_for(subject)?.format.clone()
    }

    fn schema_description(&self, subject: Subject<'_>) -> Option<String> {
        self.metadata_for(subject)?.description.clone()
    }

    fn property_description(&self, subject: Subject<'_>) -> Option<String> {
        self.metadata_for(subject)?.property_description.clone()
    }

    fn title(&self, subject: Subject<'_>) -> Option<String> {
        self.metadata_for(subject)?.title.clone()
    }

    fn default_value(&self, subject: Subject<'_>) -> Option<String> {
        self.metadata_for(subject)?.default.clone()
    }

    fn pattern(&self, subject: Subject<'_>) -> Option<String> {
        self.metadata_for(subject)?.pattern.clone()
    }

    fn min_length(&self, subject: Subject<'_>) -> Option<u64> {
        self.metadata_for(subject)?.min_length
    }

    fn max_length(&self, subject: Subject<'_>) -> Option<u64> {
        self.metadata_for(subject)?.max_length
    }

    fn minimum(&self, subject: Subject<'_>) -> Option<i64> {
        self.metadata_for(subject)?.minimum
    }

    fn maximum(&self, subject: Subject<'_>) -> Option<i64> {
        self.metadata_for(subject)?.maximum
    }

    fn not_null(&self, subject: Subject<'_>) -> bool {
        self.metadata_for(subject).map(|m| m.not_null).unwrap_or(false)
    }
}
