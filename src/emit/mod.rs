//! # TypeScript Emitter
//!
//! Renders the type graph and the endpoint registry into TypeScript
//! artifacts and hands them to a [`StorageStrategy`].
//!
//! ## Artifacts
//!
//! | Input                         | Output                                  |
//! |-------------------------------|-----------------------------------------|
//! | interface definition          | `export interface` with its properties  |
//! | enum definition               | `export enum` with string values        |
//! | endpoint                      | `@Injectable()` service class           |
//! | endpoints of one module name  | `NgModule` providing the services       |
//! | (always)                      | shared service-api declarations         |
//! | (always)                      | default request manager                 |
//!
//! Placement and import paths come from the [`NamingStrategy`]. Templates
//! live in `templates/` and are compiled in by askama.

mod instance;
mod storage;
mod templates;

pub use instance::{lower_camel, InstanceRenderer};
pub use storage::{storage_for, FileStorage, MemoryStorage, StorageStrategy};

use anyhow::Context;
use askama::Template;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::GenConfig;
use crate::diagnostics::Diagnostics;
use crate::graph::TypeGraph;
use crate::model::{
    BindingLocation, Endpoint, EndpointMethod, MappingDefinition, MethodParameter, TypeDefinition,
    TypeInstance, TypeKind,
};
use crate::naming::{imports_for_endpoint, imports_for_type, ImportEntry, NamingStrategy};

use templates::{
    EnumTemplate, InterfaceTemplate, MethodView, ModuleTemplate, PropertyLine, RequestManagerTemplate,
    ServiceTemplate, StdApiTemplate,
};

/// Paths written by one emission pass, in write order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub written: Vec<String>,
}

/// Renders the model of a round into TypeScript
pub struct TypeScriptEmitter<'a> {
    graph: &'a TypeGraph,
    config: &'a GenConfig,
    diagnostics: &'a Diagnostics,
    naming: NamingStrategy,
}

impl<'a> TypeScriptEmitter<'a> {
    pub fn new(graph: &'a TypeGraph, config: &'a GenConfig, diagnostics: &'a Diagnostics) -> Self {
        TypeScriptEmitter {
            graph,
            config,
            diagnostics,
            naming: NamingStrategy::new(config),
        }
    }

    pub fn naming(&self) -> &NamingStrategy {
        &self.naming
    }

    fn instances(&self) -> InstanceRenderer<'_> {
        InstanceRenderer::new(self.graph, self.diagnostics)
    }

    fn indent(&self) -> String {
        self.config.indent()
    }

    /// Emit every artifact of the model
    ///
    /// Runtime files first, then types in registration order, then
    /// services ordered by controller, then modules ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render or storage rejects a write.
    pub fn emit_all(
        &self,
        endpoints: &[Endpoint],
        storage: &dyn StorageStrategy,
    ) -> anyhow::Result<EmitReport> {
        let mut report = EmitReport::default();
        let mut write = |path: String, content: String| -> anyhow::Result<()> {
            storage.write(&path, &content)?;
            debug!(path = %path, bytes = content.len(), "Wrote artifact");
            report.written.push(path);
            Ok(())
        };

        write(
            self.naming.root_path(&self.config.std_api_file_name),
            self.render_std_api()?,
        )?;
        if self.config.http_service_include.is_none() {
            write(
                self.naming.root_path(&self.config.request_manager_file_name),
                self.render_request_manager()?,
            )?;
        }

        for definition in self.graph.emittable() {
            if let Some(content) = self.render_type(&definition)? {
                write(self.naming.type_path(&definition), content)?;
            }
        }

        for endpoint in endpoints {
            write(self.naming.endpoint_path(endpoint), self.render_endpoint(endpoint)?)?;
        }

        for (module_name, members) in self.group_modules(endpoints) {
            write(
                self.naming.module_path(&module_name),
                self.render_module(&module_name, &members)?,
            )?;
        }

        info!(artifacts = report.written.len(), "Emitted TypeScript");
        Ok(report)
    }

    /// Artifact of a named type; `None` for kinds that are not emitted
    pub fn render_type(&self, definition: &TypeDefinition) -> anyhow::Result<Option<String>> {
        let rendered = match definition.kind {
            TypeKind::Interface => Some(self.render_interface(definition)?),
            TypeKind::Enum => Some(self.render_enum(definition)?),
            _ => None,
        };
        Ok(rendered)
    }

    pub fn render_interface(&self, definition: &TypeDefinition) -> anyhow::Result<String> {
        let instances = self.instances();
        let properties = definition
            .properties
            .iter()
            .map(|p| PropertyLine {
                name: p.name.clone(),
                marker: if self.config.optional_nullable_properties && p.nullable {
                    "?"
                } else {
                    ""
                },
                ty: instances.render(&p.ty),
            })
            .collect();

        let super_types = self.render_list(&definition.super_types, ", ");
        let template = InterfaceTemplate {
            imports: imports_for_type(self.graph, &self.naming, definition),
            name: definition.ts_name.clone(),
            type_params: self.render_type_params(definition),
            extends: if super_types.is_empty() {
                String::new()
            } else {
                format!(" extends {}", super_types)
            },
            properties,
            indent: self.indent(),
        };
        template
            .render()
            .with_context(|| format!("Failed to render interface {}", definition.full_name))
    }

    /// `<T extends A & B, U>`, empty without generic parameters
    fn render_type_params(&self, definition: &TypeDefinition) -> String {
        if definition.generic_params.is_empty() {
            return String::new();
        }
        let params: Vec<String> = definition
            .generic_params
            .iter()
            .filter_map(|id| self.graph.definition(*id))
            .map(|param| {
                let bounds = self.render_list(&param.super_types, " & ");
                if bounds.is_empty() {
                    param.ts_name
                } else {
                    format!("{} extends {}", param.ts_name, bounds)
                }
            })
            .collect();
        format!("<{}>", params.join(", "))
    }

    /// Rendered instances joined by `separator`, `any` left out
    fn render_list(&self, instances: &[TypeInstance], separator: &str) -> String {
        let any = self.graph.any();
        let instances_renderer = self.instances();
        instances
            .iter()
            .filter(|i| i.definition != any)
            .map(|i| instances_renderer.render(i))
            .collect::<Vec<_>>()
            .join(separator)
    }

    pub fn render_enum(&self, definition: &TypeDefinition) -> anyhow::Result<String> {
        EnumTemplate {
            name: definition.ts_name.clone(),
            constants: definition
                .enum_constants
                .iter()
                .map(|c| c.name.clone())
                .collect(),
            indent: self.indent(),
        }
        .render()
        .with_context(|| format!("Failed to render enum {}", definition.full_name))
    }

    /// Injectable service of one endpoint
    pub fn render_endpoint(&self, endpoint: &Endpoint) -> anyhow::Result<String> {
        let template = ServiceTemplate {
            includes: self
                .config
                .service_includes
                .iter()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect(),
            imports: imports_for_endpoint(self.graph, &self.naming, endpoint),
            http_class: self.config.http_service_class.clone(),
            http_import: match &self.config.http_service_include {
                Some(include) => include.clone(),
                None => self
                    .naming
                    .endpoint_root_import(endpoint, strip_ts(&self.config.request_manager_file_name)),
            },
            std_api_import: self
                .naming
                .endpoint_root_import(endpoint, strip_ts(&self.config.std_api_file_name)),
            name: endpoint.name.clone(),
            default_mapping: endpoint
                .default_mapping
                .as_ref()
                .map(mapping_literal)
                .unwrap_or_else(|| "null".to_string()),
            methods: endpoint.methods.iter().map(|m| self.method_view(m)).collect(),
            indent: self.indent(),
        };
        template
            .render()
            .with_context(|| format!("Failed to render endpoint {}", endpoint.controller_type))
    }

    fn method_view(&self, method: &EndpointMethod) -> MethodView {
        let instances = self.instances();
        let signature: Vec<String> = method
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, instances.render(&p.ty)))
            .collect();
        MethodView {
            name: method.name.clone(),
            signature: signature.join(", "),
            return_type: method
                .return_type
                .as_ref()
                .map(|r| instances.render(r))
                .unwrap_or_else(|| "void".to_string()),
            mapping: mapping_literal(&method.mapping),
            params: method.params.iter().map(param_literal).collect(),
        }
    }

    /// Endpoints grouped by module name, services sorted by name
    fn group_modules<'e>(&self, endpoints: &'e [Endpoint]) -> BTreeMap<String, Vec<&'e Endpoint>> {
        let mut modules: BTreeMap<String, Vec<&Endpoint>> = BTreeMap::new();
        for endpoint in endpoints {
            let name = endpoint
                .module_name
                .clone()
                .unwrap_or_else(|| self.config.default_module_name.clone());
            modules.entry(name).or_default().push(endpoint);
        }
        for members in modules.values_mut() {
            members.sort_by(|a, b| a.name.cmp(&b.name));
        }
        modules
    }

    pub fn render_module(&self, module_name: &str, endpoints: &[&Endpoint]) -> anyhow::Result<String> {
        ModuleTemplate {
            http_class: self.config.http_service_class.clone(),
            http_import: match &self.config.http_service_include {
                Some(include) => include.clone(),
                None => format!("./{}", strip_ts(&self.config.request_manager_file_name)),
            },
            services: endpoints
                .iter()
                .map(|e| ImportEntry {
                    name: e.name.clone(),
                    path: self.naming.module_endpoint_import(e),
                })
                .collect(),
            class_name: module_class_name(module_name),
            indent: self.indent(),
        }
        .render()
        .with_context(|| format!("Failed to render module {}", module_name))
    }

    pub fn render_std_api(&self) -> anyhow::Result<String> {
        Ok(StdApiTemplate {
            indent: self.indent(),
        }
        .render()?)
    }

    pub fn render_request_manager(&self) -> anyhow::Result<String> {
        Ok(RequestManagerTemplate {
            class_name: self.config.http_service_class.clone(),
            std_api_import: format!("./{}", strip_ts(&self.config.std_api_file_name)),
            indent: self.indent(),
        }
        .render()?)
    }
}

fn strip_ts(file_name: &str) -> &str {
    file_name.strip_suffix(".ts").unwrap_or(file_name)
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// `{urlTemplate: '/api/', method: RequestMethod.GET}`; a mapping without
/// a path renders an empty template
fn mapping_literal(mapping: &MappingDefinition) -> String {
    let method = mapping
        .verb
        .as_ref()
        .map(|v| format!("RequestMethod.{}", v.as_str()))
        .unwrap_or_else(|| "null".to_string());
    format!(
        "{{urlTemplate: {}, method: {}}}",
        quote(mapping.url_template.as_deref().unwrap_or("")),
        method
    )
}

/// `MethodParamMapping` literal of one parameter, the argument is its value
fn param_literal(param: &MethodParameter) -> String {
    let binding = &param.binding;
    let mut fields = vec![
        format!("paramName: {}", quote(&param.name)),
        format!("isRequired: {}", binding.required),
    ];
    match binding.location {
        BindingLocation::Path => fields.push(format!("pathVariableName: {}", quote(&binding.name))),
        BindingLocation::Query => {
            fields.push(format!("requestParameterName: {}", quote(&binding.name)))
        }
        BindingLocation::Body => {}
    }
    fields.push(format!(
        "isRequestBody: {}",
        binding.location == BindingLocation::Body
    ));
    fields.push(format!("value: {}", param.name));
    format!("{{{}}}", fields.join(", "))
}

/// `service-api` -> `ServiceApi`
pub fn module_class_name(module_name: &str) -> String {
    module_name
        .split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
