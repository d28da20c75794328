//! Descriptors for the host object model.
//!
//! The generator never inspects concrete Rust types. It consumes two
//! capabilities — [`TypeModel`] for structure and [`MetadataResolver`] for
//! schema hints — which any host model can implement. [`crate::catalog`]
//! provides the declarative in-memory implementation used by the CLI and the
//! tests.

use std::fmt;

use serde::Deserialize;

use crate::error::GeneratorError;

/// Identity of a model type: a qualified name with `::`-separated segments.
///
/// For container and wrapper types the identity is the full type expression,
/// e.g. `Vec<geometry::Point>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeId(String);

impl TypeId {
    pub fn new(name: impl Into<String>) -> Self {
        TypeId(name.into())
    }

    /// Last path segment, used for definition names and derived titles.
    pub fn simple(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeId {
    fn from(name: &str) -> Self {
        TypeId(name.to_string())
    }
}

/// Structural shape of a type, the visitor's dispatch axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
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

impl TypeShape {
    /// Shapes whose unboxed representation has no null channel.
    pub(crate) fn is_primitive(self) -> bool {
        matches!(
            self,
            TypeShape::Integer | TypeShape::Number | TypeShape::Boolean
        )
    }
}

/// One resolved model type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    pub id: TypeId,
    pub shape: TypeShape,
    /// Element type for arrays, value type for maps, contained type for
    /// optional wrappers.
    pub element: Option<TypeId>,
    /// Declared concrete subtypes; non-empty marks a polymorphic base.
    pub subtypes: Vec<TypeId>,
    /// Scalar with a null channel even when not optional-wrapped.
    pub nullable: bool,
    /// `Option<T>`-style wrapper around `element`.
    pub optional_wrapper: bool,
    /// Closed value set written as an `enum` array on primitive nodes.
    pub enum_values: Vec<String>,
}

impl TypeDescriptor {
    /// Descriptor for a plain scalar with no element, subtypes or values.
    pub fn scalar(id: TypeId, shape: TypeShape) -> Self {
        TypeDescriptor {
            id,
            shape,
            element: None,
            subtypes: Vec::new(),
            nullable: false,
            optional_wrapper: false,
            enum_values: Vec::new(),
        }
    }
}

/// One declared property of an object type.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub name: String,
    pub ty: TypeId,
    /// Explicit required marker, independent of nullability.
    pub required: bool,
}

/// How a polymorphic base identifies its subtypes on the wire.
///
/// Only [`DiscriminatorStyle::Property`] is supported by the generator; the
/// wrapper styles exist so a model can declare them and get a proper error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscriminatorStyle {
    Property,
    WrapperObject,
    WrapperArray,
}

impl Default for DiscriminatorStyle {
    fn default() -> Self {
        DiscriminatorStyle::Property
    }
}

impl fmt::Display for DiscriminatorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiscriminatorStyle::Property => "property",
            DiscriminatorStyle::WrapperObject => "wrapper-object",
            DiscriminatorStyle::WrapperArray => "wrapper-array",
        })
    }
}

/// Discriminator declaration on a polymorphic base type.
#[derive(Debug, Clone, Deserialize)]
pub struct Discriminator {
    /// Name of the injected type property.
    pub property: String,
    #[serde(default)]
    pub style: DiscriminatorStyle,
}

/// A type's role as a discriminated subtype of some polymorphic base.
#[derive(Debug, Clone)]
pub struct PolymorphismDescriptor {
    pub parent: TypeId,
    /// Discriminator property name injected into the subtype schema.
    pub type_property: String,
}

/// Subject of a metadata lookup.
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    Type(&'a TypeId),
    Property { owner: &'a TypeId, name: &'a str },
}

/// Introspection capability over the host model's type graph.
pub trait TypeModel {
    fn describe_type(&self, ty: &TypeId) -> Result<TypeDescriptor, GeneratorError>;

    /// Declared properties in declaration order.
    fn describe_properties(&self, ty: &TypeId)
        -> Result<Vec<PropertyDescriptor>, GeneratorError>;

    /// `Some` when `ty` is a discriminated subtype of a polymorphic base.
    ///
    /// Fails with [`GeneratorError::UnsupportedPolymorphism`] when the base
    /// declares anything other than property-style discrimination.
    fn polymorphism_info(
        &self,
        ty: &TypeId,
    ) -> Result<Option<PolymorphismDescriptor>, GeneratorError>;

    /// Discriminator tag registered for a concrete subtype.
    fn resolve_subtype_tag(&self, parent: &TypeId, concrete: &TypeId) -> Option<String>;
}

/// Optional schema hints contributed by the host model's annotation store.
///
/// Every method defaults to "no hint"; implementations override what they
/// can answer. All lookups are pure and safe for concurrent read-only use.
pub trait MetadataResolver {
    fn format(&self, _subject: Subject<'_>) -> Option<String> {
        None
    }

    /// Explicit schema description, checked before the generic one.
    fn schema_description(&self, _subject: Subject<'_>) -> Option<String> {
        None
    }

    fn property_description(&self, _subject: Subject<'_>) -> Option<String> {
        None
    }

    fn title(&self, _subject: Subject<'_>) -> Option<String> {
        None
    }

    /// Raw default literal; coerced to the node's declared type by the
    /// visitor.
    fn default_value(&self, _subject: Subject<'_>) -> Option<String> {
        None
    }

    fn pattern(&self, _subject: Subject<'_>) -> Option<String> {
        None
    }

    fn min_length(&self, _subject: Subject<'_>) -> Option<u64> {
        None
    }

    fn max_length(&self, _subject: Subject<'_>) -> Option<u64> {
        None
    }

    fn minimum(&self, _subject: Subject<'_>) -> Option<i64> {
        None
    }

    fn maximum(&self, _subject: Subject<'_>) -> Option<i64> {
        None
    }

    fn not_null(&self, _subject: Subject<'_>) -> bool {
        false
    }
}
