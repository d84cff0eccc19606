use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source-level type reference as written at a use site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    Primitive {
        name: String,
    },
    Declared {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<TypeRef>,
    },
    TypeVar {
        name: String,
        owner: GenericOwner,
    },
    Wildcard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        extends: Option<Box<TypeRef>>,
        #[serde(default, rename = "super", skip_serializing_if = "Option::is_none")]
        super_bound: Option<Box<TypeRef>>,
    },
    Array {
        component: Box<TypeRef>,
    },
}

impl TypeRef {
    pub fn primitive(name: &str) -> Self {
        TypeRef::Primitive {
            name: name.to_string(),
        }
    }

    pub fn declared(name: &str) -> Self {
        TypeRef::Declared {
            name: name.to_string(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: &str, args: Vec<TypeRef>) -> Self {
        TypeRef::Declared {
            name: name.to_string(),
            args,
        }
    }

    pub fn type_var(name: &str, owner: &str) -> Self {
        TypeRef::TypeVar {
            name: name.to_string(),
            owner: GenericOwner::Type(owner.to_string()),
        }
    }

    pub fn method_var(name: &str, declaring_type: &str, method: &str) -> Self {
        Self::overload_var(name, declaring_type, method, 0)
    }

    /// Type variable of the `overload`-th method named `method`
    pub fn overload_var(name: &str, declaring_type: &str, method: &str, overload: usize) -> Self {
        TypeRef::TypeVar {
            name: name.to_string(),
            owner: GenericOwner::Method {
                declaring_type: declaring_type.to_string(),
                method: method.to_string(),
                overload,
            },
        }
    }

    pub fn array(component: TypeRef) -> Self {
        TypeRef::Array {
            component: Box::new(component),
        }
    }

    /// Qualified name of a declared or primitive reference
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Primitive { name } | TypeRef::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive { .. })
    }

    /// Replace the type variables declared by `owner` with their bindings
    ///
    /// Variables without a binding, and variables of other owners, are kept.
    pub fn substitute(&self, owner: &str, bindings: &[(String, TypeRef)]) -> TypeRef {
        match self {
            TypeRef::TypeVar {
                name,
                owner: GenericOwner::Type(declared_by),
            } if declared_by == owner => bindings
                .iter()
                .find(|(var, _)| var == name)
                .map(|(_, bound)| bound.clone())
                .unwrap_or_else(|| self.clone()),
            TypeRef::Declared { name, args } => TypeRef::Declared {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(owner, bindings)).collect(),
            },
            TypeRef::Wildcard {
                extends,
                super_bound,
            } => TypeRef::Wildcard {
                extends: extends
                    .as_ref()
                    .map(|b| Box::new(b.substitute(owner, bindings))),
                super_bound: super_bound
                    .as_ref()
                    .map(|b| Box::new(b.substitute(owner, bindings))),
            },
            TypeRef::Array { component } => TypeRef::Array {
                component: Box::new(component.substitute(owner, bindings)),
            },
            TypeRef::Primitive { .. } | TypeRef::TypeVar { .. } => self.clone(),
        }
    }
}

/// Generic declaration a type variable belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericOwner {
    Type(String),
    /// `overload` counts the methods sharing that name in declaration order
    Method {
        declaring_type: String,
        method: String,
        #[serde(default, skip_serializing_if = "is_first")]
        overload: usize,
    },
}

fn is_first(overload: &usize) -> bool {
    *overload == 0
}

impl std::fmt::Display for GenericOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenericOwner::Type(name) => write!(f, "{}", name),
            GenericOwner::Method {
                declaring_type,
                method,
                overload: 0,
            } => write!(f, "{}#{}", declaring_type, method),
            GenericOwner::Method {
                declaring_type,
                method,
                overload,
            } => write!(f, "{}#{}[{}]", declaring_type, method, overload),
        }
    }
}

/// Annotation attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<AnnotationValue>),
}

impl AnnotationValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::Str(s) => Some(s),
            AnnotationValue::List(items) => items.first().and_then(AnnotationValue::as_str),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnnotationValue::Bool(b) => Some(*b),
            AnnotationValue::Str(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// All string values, treating a scalar as a one-element list
    pub fn strings(&self) -> Vec<String> {
        match self {
            AnnotationValue::Str(s) => vec![s.clone()],
            AnnotationValue::List(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// `true` for an empty list or empty string
    pub fn is_empty(&self) -> bool {
        match self {
            AnnotationValue::Str(s) => s.is_empty(),
            AnnotationValue::List(items) => items.is_empty(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, AnnotationValue>,
}

impl Annotation {
    pub fn new(name: &str) -> Self {
        Annotation {
            name: name.to_string(),
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: AnnotationValue) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub fn value(&self, key: &str) -> Option<&AnnotationValue> {
        self.values.get(key)
    }
}

/// `alias_for` declaration on an annotation attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasFor {
    /// Target annotation; `None` means an alias inside the same annotation
    #[serde(default)]
    pub annotation: Option<String>,
    /// Target attribute; `None` means the attribute of the same name
    #[serde(default)]
    pub attribute: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationAttribute {
    pub name: String,
    #[serde(default)]
    pub alias_for: Option<AliasFor>,
}

/// Declaration of an annotation type: its meta-annotations and attribute aliases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationType {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub attributes: Vec<AnnotationAttribute>,
}

/// Anything that carries annotations
pub trait Annotated {
    fn annotations(&self) -> &[Annotation];

    fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations().iter().find(|a| a.name == name)
    }

    fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredKind {
    Class,
    Interface,
    Record,
    Enum,
    Annotation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl FieldSymbol {
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSymbol {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub parameters: Vec<ParameterSymbol>,
    /// `None` for `void`
    #[serde(default)]
    pub return_type: Option<TypeRef>,
}

impl MethodSymbol {
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    /// Whether a subtype method with this shape hides `other`
    pub fn overrides(&self, other: &MethodSymbol) -> bool {
        self.name == other.name && self.parameters.len() == other.parameters.len()
    }

    /// Copy with the parameter and return types of `owner` variables substituted
    pub fn substituted(&self, owner: &str, bindings: &[(String, TypeRef)]) -> MethodSymbol {
        let mut method = self.clone();
        if bindings.is_empty() {
            return method;
        }
        for parameter in &mut method.parameters {
            parameter.ty = parameter.ty.substitute(owner, bindings);
        }
        method.return_type = method
            .return_type
            .map(|r| r.substitute(owner, bindings));
        method
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordComponent {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// One declared type of the symbol export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclaredType {
    pub name: String,
    #[serde(default)]
    pub simple_name: Option<String>,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub enclosing_type: Option<String>,
    pub kind: DeclaredKind,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub superclass: Option<TypeRef>,
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    #[serde(default)]
    pub fields: Vec<FieldSymbol>,
    #[serde(default)]
    pub methods: Vec<MethodSymbol>,
    #[serde(default)]
    pub record_components: Vec<RecordComponent>,
    #[serde(default)]
    pub enum_constants: Vec<String>,
}

impl DeclaredType {
    /// Simple name, derived from the qualified name when not given
    pub fn simple_name(&self) -> &str {
        if let Some(simple) = self.simple_name.as_deref() {
            return simple;
        }
        self.name
            .rsplit(['.', '$'])
            .next()
            .unwrap_or(&self.name)
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSymbol> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodSymbol> {
        self.method_overload(name, 0)
    }

    /// The `overload`-th method called `name`, in declaration order
    pub fn method_overload(&self, name: &str, overload: usize) -> Option<&MethodSymbol> {
        self.methods.iter().filter(|m| m.name == name).nth(overload)
    }

    pub fn type_parameter(&self, name: &str) -> Option<&TypeParameter> {
        self.type_parameters.iter().find(|p| p.name == name)
    }
}

impl Annotated for DeclaredType {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotated for FieldSymbol {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotated for MethodSymbol {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotated for ParameterSymbol {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotated for RecordComponent {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotated for AnnotationType {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
