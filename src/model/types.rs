use serde::Serialize;
use std::fmt;

/// Arena index of a [`TypeDefinition`] inside a [`TypeGraph`](crate::graph::TypeGraph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Primitive,
    /// Classes, interfaces and records all project onto a structural interface
    Interface,
    Enum,
    Collection,
    Map,
    GenericPlaceholder,
    Unknown,
}

impl TypeKind {
    /// Whether use sites of this kind carry generic arguments
    pub fn has_type_params(self) -> bool {
        matches!(
            self,
            TypeKind::Interface | TypeKind::Collection | TypeKind::Map | TypeKind::GenericPlaceholder
        )
    }

    /// Kinds that are emitted as their own artifact and therefore imported
    pub fn is_importable(self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Enum)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeKind::Primitive => "PRIMITIVE",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Enum => "ENUM",
            TypeKind::Collection => "COLLECTION",
            TypeKind::Map => "MAP",
            TypeKind::GenericPlaceholder => "GENERIC_PLACEHOLDER",
            TypeKind::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

/// Enclosing scope of a type or controller
///
/// The chain ends at a package element. Nested types have one
/// non-package link per enclosing type, innermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeContainer {
    pub package_element: bool,
    pub full_name: String,
    pub short_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Box<TypeContainer>>,
}

impl TypeContainer {
    /// Package container with the given qualified name
    pub fn package(name: &str) -> Self {
        TypeContainer {
            package_element: true,
            full_name: name.to_string(),
            short_name: name.rsplit('.').next().unwrap_or(name).to_string(),
            container: None,
        }
    }

    /// Qualified name of the package at the root of the chain
    pub fn package_name(&self) -> &str {
        let mut current = self;
        while !current.package_element {
            match current.container.as_deref() {
                Some(next) => current = next,
                None => break,
            }
        }
        if current.package_element {
            &current.full_name
        } else {
            ""
        }
    }

    /// Short names of the enclosing types, outermost first
    pub fn enclosing_types(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = Some(self);
        while let Some(c) = current {
            if c.package_element {
                break;
            }
            names.push(c.short_name.as_str());
            current = c.container.as_deref();
        }
        names.reverse();
        names
    }
}

/// Use-site reference: a definition plus bound generic arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeInstance {
    pub definition: TypeId,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TypeInstance>,
}

impl TypeInstance {
    pub fn new(definition: TypeId) -> Self {
        TypeInstance {
            definition,
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments(definition: TypeId, arguments: Vec<TypeInstance>) -> Self {
        TypeInstance {
            definition,
            arguments,
        }
    }

    /// Depth-first visit over this instance and all nested arguments
    pub fn visit<F: FnMut(&TypeInstance)>(&self, f: &mut F) {
        f(self);
        for arg in &self.arguments {
            arg.visit(f);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeInstance,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnumConstant {
    pub name: String,
}

/// Structure-level description of one named type
///
/// Generic parameters are themselves definitions of kind
/// [`TypeKind::GenericPlaceholder`] referenced by id; their bounds live in
/// `super_types`. All cross references go through [`TypeId`] so that
/// recursive shapes like `Node<T extends Node<T>>` need no special casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDefinition {
    pub id: TypeId,
    pub full_name: String,
    pub short_name: String,
    /// Name used in generated code, possibly overridden by metadata
    pub ts_name: String,
    pub kind: TypeKind,
    pub super_types: Vec<TypeInstance>,
    pub properties: Vec<PropertyDefinition>,
    pub enum_constants: Vec<EnumConstant>,
    pub generic_params: Vec<TypeId>,
    pub container: Option<TypeContainer>,
    pub predefined: bool,
    pub initialized: bool,
}

impl TypeDefinition {
    /// Empty, uninitialized definition; the graph assigns the real id on registration
    pub fn new(full_name: impl Into<String>, short_name: impl Into<String>, kind: TypeKind) -> Self {
        let short_name = short_name.into();
        TypeDefinition {
            id: TypeId(u32::MAX),
            full_name: full_name.into(),
            ts_name: short_name.clone(),
            short_name,
            kind,
            super_types: Vec::new(),
            properties: Vec::new(),
            enum_constants: Vec::new(),
            generic_params: Vec::new(),
            container: None,
            predefined: false,
            initialized: false,
        }
    }

    /// Built-in definition, never emitted
    pub fn predefined(
        full_name: impl Into<String>,
        short_name: impl Into<String>,
        ts_name: impl Into<String>,
        kind: TypeKind,
    ) -> Self {
        let mut def = TypeDefinition::new(full_name, short_name, kind);
        def.ts_name = ts_name.into();
        def.predefined = true;
        def.initialized = true;
        def
    }

    pub fn with_ts_name(mut self, ts_name: impl Into<String>) -> Self {
        self.ts_name = ts_name.into();
        self
    }

    pub fn with_container(mut self, container: Option<TypeContainer>) -> Self {
        self.container = container;
        self
    }

    /// Package the definition lives in, empty for predefined types
    pub fn package_name(&self) -> &str {
        self.container
            .as_ref()
            .map(TypeContainer::package_name)
            .unwrap_or("")
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|p| p.name == name)
    }
}
