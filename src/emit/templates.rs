use askama::Template;

use crate::naming::ImportEntry;

/// One property line of an interface
#[derive(Debug, Clone)]
pub struct PropertyLine {
    pub name: String,
    /// `?` for optional properties, empty otherwise
    pub marker: &'static str,
    pub ty: String,
}

/// Template data for an interface artifact
#[derive(Template)]
#[template(path = "interface.ts.txt", escape = "none")]
pub struct InterfaceTemplate {
    pub imports: Vec<ImportEntry>,
    pub name: String,
    /// Rendered `<T extends A & B, U>` list, empty without generics
    pub type_params: String,
    /// Rendered ` extends A, B` clause, empty without supertypes
    pub extends: String,
    pub properties: Vec<PropertyLine>,
    pub indent: String,
}

/// Template data for an enum artifact
#[derive(Template)]
#[template(path = "enum.ts.txt", escape = "none")]
pub struct EnumTemplate {
    pub name: String,
    pub constants: Vec<String>,
    pub indent: String,
}

/// One service method
#[derive(Debug, Clone)]
pub struct MethodView {
    pub name: String,
    /// Rendered `a: A, b: B` parameter list
    pub signature: String,
    pub return_type: String,
    /// Rendered `HttpRequestMapping` literal
    pub mapping: String,
    /// Rendered `MethodParamMapping` literals
    pub params: Vec<String>,
}

/// Template data for an endpoint's injectable service
#[derive(Template)]
#[template(path = "service.ts.txt", escape = "none")]
pub struct ServiceTemplate {
    /// Extra import lines from the configuration
    pub includes: Vec<String>,
    pub imports: Vec<ImportEntry>,
    pub http_class: String,
    pub http_import: String,
    pub std_api_import: String,
    pub name: String,
    /// Rendered default mapping literal or `null`
    pub default_mapping: String,
    pub methods: Vec<MethodView>,
    pub indent: String,
}

/// Template data for an Angular module grouping services
#[derive(Template)]
#[template(path = "module.ts.txt", escape = "none")]
pub struct ModuleTemplate {
    pub http_class: String,
    pub http_import: String,
    pub services: Vec<ImportEntry>,
    pub class_name: String,
    pub indent: String,
}

/// Shared declarations every service imports
#[derive(Template)]
#[template(path = "std-api.ts.txt", escape = "none")]
pub struct StdApiTemplate {
    pub indent: String,
}

/// Default request manager implementation
#[derive(Template)]
#[template(path = "request-manager.ts.txt", escape = "none")]
pub struct RequestManagerTemplate {
    pub class_name: String,
    pub std_api_import: String,
    pub indent: String,
}
