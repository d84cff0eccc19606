use crate::diagnostics::Diagnostics;
use crate::graph::TypeGraph;
use crate::model::{TypeInstance, TypeKind};

/// Renders type instances as TypeScript type expressions
pub struct InstanceRenderer<'a> {
    graph: &'a TypeGraph,
    diagnostics: &'a Diagnostics,
}

impl<'a> InstanceRenderer<'a> {
    pub fn new(graph: &'a TypeGraph, diagnostics: &'a Diagnostics) -> Self {
        InstanceRenderer { graph, diagnostics }
    }

    /// TypeScript expression for a use site
    ///
    /// Collections become `T[]`, maps become index signatures, everything
    /// else is the generated name followed by its rendered arguments.
    pub fn render(&self, instance: &TypeInstance) -> String {
        match self.graph.kind(instance.definition) {
            Some(TypeKind::Collection) => format!("{}[]", self.argument(instance, 0)),
            Some(TypeKind::Map) => self.render_map(instance),
            _ => {
                let name = self.name(instance);
                if instance.arguments.is_empty() {
                    return name;
                }
                let args: Vec<String> = instance.arguments.iter().map(|a| self.render(a)).collect();
                format!("{}<{}>", name, args.join(", "))
            }
        }
    }

    /// Rendered argument at `index`, `any` when absent
    fn argument(&self, instance: &TypeInstance, index: usize) -> String {
        match instance.arguments.get(index) {
            Some(arg) => self.render(arg),
            None => self.any_name(),
        }
    }

    fn render_map(&self, instance: &TypeInstance) -> String {
        let Some(key) = instance.arguments.first() else {
            return "{ }".to_string();
        };
        let value = self.argument(instance, 1);

        if self.graph.kind(key.definition) == Some(TypeKind::Enum) {
            return format!("{{ [{}: string]: {} }}", lower_camel(&self.name(key)), value);
        }

        let key_type = self.render(key);
        if key_type != "number" && key_type != "string" {
            self.diagnostics.warning(
                "emit:map",
                format!(
                    "Unable to use '{}' as map index, only string and number keys are indexable",
                    key_type
                ),
            );
            return "{}".to_string();
        }
        format!("{{ [index: {}]: {} }}", key_type, value)
    }

    fn name(&self, instance: &TypeInstance) -> String {
        self.graph
            .ts_name(instance.definition)
            .unwrap_or_else(|| self.any_name())
    }

    fn any_name(&self) -> String {
        self.graph
            .ts_name(self.graph.any())
            .unwrap_or_else(|| crate::graph::ANY.to_string())
    }
}

/// `ItemStatus` -> `itemStatus`
pub fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
