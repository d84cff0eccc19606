use crate::config::GenConfig;
use crate::model::{Endpoint, TypeContainer, TypeDefinition};

fn end_with(value: &str, suffix: &str) -> String {
    if value.ends_with(suffix) {
        value.to_string()
    } else {
        format!("{}{}", value, suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PathOverride {
    /// Package prefix, always ending with `.`
    prefix: String,
    /// Replacement folder, always ending with `/`
    folder: String,
}

/// Placement of generated artifacts and relative paths between them
///
/// A type lands in `output_folder` + its package as a path. A path
/// override replaces the matched package prefix with a folder; the
/// longest matching prefix wins. File names are the enclosing type chain
/// joined with `$`, then the short name, then the generated suffix.
#[derive(Debug, Clone)]
pub struct NamingStrategy {
    output_folder: String,
    generated_suffix: String,
    overrides: Vec<PathOverride>,
}

impl NamingStrategy {
    pub fn new(config: &GenConfig) -> Self {
        let mut overrides: Vec<PathOverride> = config
            .path_overrides
            .iter()
            .map(|(prefix, folder)| PathOverride {
                prefix: end_with(prefix, "."),
                folder: end_with(folder, "/"),
            })
            .collect();
        overrides.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        NamingStrategy {
            output_folder: end_with(&config.output_folder, "/"),
            generated_suffix: config.generated_suffix.clone(),
            overrides,
        }
    }

    pub fn output_folder(&self) -> &str {
        &self.output_folder
    }

    /// Folder of everything generated for `package`, ending with `/`
    pub fn target_folder(&self, package: &str) -> String {
        let dotted = end_with(package, ".");
        let mut target = package.replace('.', "/");
        if let Some(o) = self.overrides.iter().find(|o| dotted.starts_with(&o.prefix)) {
            let rest = target
                .get(o.prefix.len().saturating_sub(1)..)
                .unwrap_or("")
                .trim_start_matches('/');
            target = format!("{}{}", o.folder, rest);
        }
        let joined = format!("{}{}", self.output_folder, end_with(&target, "/"));
        collapse_slashes(&joined)
    }

    /// File name without extension: `Outer$Inner` prefix, name and suffix
    pub fn simple_file_name(&self, container: Option<&TypeContainer>, name: &str) -> String {
        let prefix: String = container
            .map(|c| {
                c.enclosing_types()
                    .iter()
                    .map(|n| format!("{}$", n))
                    .collect()
            })
            .unwrap_or_default();
        format!("{}{}{}", prefix, name, self.generated_suffix)
    }

    fn type_folder(&self, definition: &TypeDefinition) -> String {
        self.target_folder(definition.package_name())
    }

    fn endpoint_folder(&self, endpoint: &Endpoint) -> String {
        self.target_folder(endpoint.package_name())
    }

    pub fn type_file_name(&self, definition: &TypeDefinition) -> String {
        self.simple_file_name(definition.container.as_ref(), &definition.short_name)
    }

    /// Output path of a type's artifact
    pub fn type_path(&self, definition: &TypeDefinition) -> String {
        format!(
            "{}{}.ts",
            self.type_folder(definition),
            self.type_file_name(definition)
        )
    }

    fn endpoint_base(&self, endpoint: &Endpoint) -> String {
        format!(
            "{}{}",
            self.endpoint_folder(endpoint),
            self.simple_file_name(endpoint.container.as_ref(), &endpoint.name)
        )
    }

    /// Output path of an endpoint's service artifact
    pub fn endpoint_path(&self, endpoint: &Endpoint) -> String {
        format!("{}.ts", self.endpoint_base(endpoint))
    }

    /// Output path of a file at the output root
    pub fn root_path(&self, file_name: &str) -> String {
        format!("{}{}", self.output_folder, end_with(file_name, ".ts"))
    }

    /// Output path of an Angular module
    pub fn module_path(&self, module_name: &str) -> String {
        format!("{}{}", self.output_folder, end_with(module_name, ".module.ts"))
    }

    /// Import path from a type's artifact to another type's artifact
    pub fn type_import(&self, from: &TypeDefinition, to: &TypeDefinition) -> String {
        format!(
            "{}{}",
            relative_path(&self.type_folder(from), &self.type_folder(to)),
            self.type_file_name(to)
        )
    }

    /// Import path from an endpoint's artifact to a type's artifact
    pub fn endpoint_type_import(&self, from: &Endpoint, to: &TypeDefinition) -> String {
        format!(
            "{}{}",
            relative_path(&self.endpoint_folder(from), &self.type_folder(to)),
            self.type_file_name(to)
        )
    }

    /// Import path from an endpoint's artifact to a file at the output root
    pub fn endpoint_root_import(&self, from: &Endpoint, file_name: &str) -> String {
        let target = format!("{}{}", self.output_folder, file_name);
        let path = relative_path(&self.endpoint_folder(from), &target);
        path.strip_suffix('/').unwrap_or(&path).to_string()
    }

    /// Import path from a module at the output root to an endpoint's artifact
    pub fn module_endpoint_import(&self, endpoint: &Endpoint) -> String {
        let base = self.endpoint_base(endpoint);
        let inner = base.strip_prefix(&self.output_folder).unwrap_or(&base);
        if inner.starts_with('/') {
            format!(".{}", inner)
        } else {
            format!("./{}", inner)
        }
    }
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' && previous_slash {
            continue;
        }
        previous_slash = c == '/';
        out.push(c);
    }
    out
}

fn segments(path: &str) -> Vec<&str> {
    path.split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// Relative path between two folders, forward slashes, ending with `/`
///
/// The result starts with `./` unless it already climbs with `../`; two
/// equal folders give `./`.
pub fn relative_path(from: &str, to: &str) -> String {
    let from = segments(from);
    let to = segments(to);
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<&str> = std::iter::repeat("..").take(from.len() - common).collect();
    parts.extend(&to[common..]);
    if parts.is_empty() {
        return "./".to_string();
    }

    let relative = end_with(&parts.join("/"), "/");
    if relative.starts_with('.') {
        relative
    } else {
        format!("./{}", relative)
    }
}
