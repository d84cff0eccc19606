use std::collections::HashSet;

use crate::model::TypeContainer;
use crate::symbols::{DeclaredType, SymbolProvider};

fn parent_name(name: &str) -> &str {
    name.rsplit_once('.').map(|(parent, _)| parent).unwrap_or("")
}

fn simple_name(name: &str) -> &str {
    name.rsplit(['.', '$']).next().unwrap_or(name)
}

/// Enclosing scope chain of a declared type
///
/// Walks `enclosing_type` links outwards and terminates in the package of
/// the outermost type. An explicit `package` on the type wins over the
/// derived one.
pub fn container_of(provider: &dyn SymbolProvider, declared: &DeclaredType) -> TypeContainer {
    let mut chain: Vec<(String, String)> = Vec::new();
    let mut seen = HashSet::new();
    let mut outermost = declared;
    let mut dangling: Option<&str> = None;

    while let Some(enclosing) = outermost.enclosing_type.as_deref() {
        if !seen.insert(enclosing) {
            break;
        }
        match provider.declared_type(enclosing) {
            Some(outer) => {
                chain.push((outer.name.clone(), outer.simple_name().to_string()));
                outermost = outer;
            }
            None => {
                chain.push((enclosing.to_string(), simple_name(enclosing).to_string()));
                dangling = Some(enclosing);
                break;
            }
        }
    }

    let package = match (&declared.package, dangling) {
        (Some(package), _) => package.clone(),
        (None, Some(enclosing)) => parent_name(enclosing).to_string(),
        (None, None) => outermost
            .package
            .clone()
            .unwrap_or_else(|| parent_name(&outermost.name).to_string()),
    };

    let mut container = TypeContainer::package(&package);
    for (full_name, short_name) in chain.into_iter().rev() {
        container = TypeContainer {
            package_element: false,
            full_name,
            short_name,
            container: Some(Box::new(container)),
        };
    }
    container
}
