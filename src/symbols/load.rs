use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::types::{AnnotationType, DeclaredType};
use super::SymbolProvider;

/// On-disk shape of a symbol export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolExport {
    #[serde(default)]
    pub types: Vec<DeclaredType>,
    #[serde(default)]
    pub annotation_types: Vec<AnnotationType>,
}

/// [`SymbolProvider`] backed by a parsed symbol export
#[derive(Debug, Clone, Default)]
pub struct SchemaSymbolProvider {
    types: HashMap<String, DeclaredType>,
    order: Vec<String>,
    annotation_types: HashMap<String, AnnotationType>,
}

impl SchemaSymbolProvider {
    /// Index an export; a later duplicate name replaces the earlier one
    pub fn from_export(export: SymbolExport) -> Self {
        let mut provider = SchemaSymbolProvider::default();
        for declared in export.types {
            if !provider.types.contains_key(&declared.name) {
                provider.order.push(declared.name.clone());
            }
            provider.types.insert(declared.name.clone(), declared);
        }
        for annotation in export.annotation_types {
            provider
                .annotation_types
                .insert(annotation.name.clone(), annotation);
        }
        provider
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let export: SymbolExport =
            serde_yaml::from_str(content).context("Failed to parse YAML symbol export")?;
        Ok(Self::from_export(export))
    }

    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        let export: SymbolExport =
            serde_json::from_str(content).context("Failed to parse JSON symbol export")?;
        Ok(Self::from_export(export))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl SymbolProvider for SchemaSymbolProvider {
    fn declared_type(&self, name: &str) -> Option<&DeclaredType> {
        self.types.get(name)
    }

    fn annotation_type(&self, name: &str) -> Option<&AnnotationType> {
        self.annotation_types.get(name)
    }

    fn type_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }
}

/// Load a symbol export from disk
///
/// # Arguments
///
/// * `path` - Path to the export; `.yaml`/`.yml` is read as YAML, anything else as JSON
///
/// # Returns
///
/// A provider indexing every declared type of the export
pub fn load_symbols(path: &Path) -> anyhow::Result<SchemaSymbolProvider> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read symbol export: {}", path.display()))?;
    let is_yaml = path
        .extension()
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);
    let provider = if is_yaml {
        SchemaSymbolProvider::from_yaml_str(&content)
    } else {
        SchemaSymbolProvider::from_json_str(&content)
    }
    .with_context(|| format!("Invalid symbol export: {}", path.display()))?;
    tracing::debug!(path = %path.display(), types = provider.len(), "Loaded symbol export");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{markers, Annotated, DeclaredKind, GenericOwner, TypeRef};

    const EXPORT: &str = r#"
types:
  - name: com.acme.Base
    kind: class
  - name: com.acme.Order
    kind: class
    superclass: { kind: declared, name: com.acme.Base }
    type_parameters:
      - name: T
        bounds: [{ kind: declared, name: java.lang.Number }]
    methods:
      - name: map
        type_parameters: [{ name: R }]
        return_type: { kind: type_var, name: R, owner: { method: { declaring_type: com.acme.Order, method: map } } }
  - name: com.acme.OrderList
    kind: class
    superclass: { kind: declared, name: java.util.ArrayList, args: [{ kind: declared, name: com.acme.Order }] }
  - name: com.acme.OrderController
    kind: class
    annotations: [{ name: tsgen.Endpoint }]
"#;

    #[test]
    fn test_yaml_export_indexes_types() {
        let p = SchemaSymbolProvider::from_yaml_str(EXPORT).unwrap();
        assert_eq!(p.len(), 4);
        let order = p.declared_type("com.acme.Order").unwrap();
        assert_eq!(order.kind, DeclaredKind::Class);
        assert_eq!(order.simple_name(), "Order");
        assert_eq!(
            order.superclass,
            Some(TypeRef::declared("com.acme.Base"))
        );
    }

    #[test]
    fn test_type_parameter_lookup() {
        let p = SchemaSymbolProvider::from_yaml_str(EXPORT).unwrap();
        let t = p
            .type_parameter(&GenericOwner::Type("com.acme.Order".into()), "T")
            .unwrap();
        assert_eq!(t.bounds.len(), 1);
        let r = p.type_parameter(
            &GenericOwner::Method {
                declaring_type: "com.acme.Order".into(),
                method: "map".into(),
                overload: 0,
            },
            "R",
        );
        assert!(r.unwrap().bounds.is_empty());
        assert!(p
            .type_parameter(&GenericOwner::Type("com.acme.Missing".into()), "T")
            .is_none());
    }

    #[test]
    fn test_assignability_uses_library_hierarchy() {
        let p = SchemaSymbolProvider::from_yaml_str(EXPORT).unwrap();
        assert!(p.is_assignable_to("com.acme.OrderList", markers::COLLECTION_ROOT));
        assert!(p.is_assignable_to("java.util.TreeMap", markers::MAP_ROOT));
        assert!(!p.is_assignable_to("com.acme.Order", markers::COLLECTION_ROOT));
        assert!(p.is_assignable_to("com.acme.Order", "com.acme.Base"));
    }

    #[test]
    fn test_controllers_follow_export_order() {
        let p = SchemaSymbolProvider::from_yaml_str(EXPORT).unwrap();
        let controllers = p.controllers();
        assert_eq!(controllers.len(), 1);
        assert!(controllers[0].has_annotation(markers::ENDPOINT));
    }

    #[test]
    fn test_load_symbols_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symbols.json");
        std::fs::write(&path, r#"{"types":[{"name":"a.B","kind":"enum","enum_constants":["X"]}]}"#)
            .unwrap();
        let p = load_symbols(&path).unwrap();
        assert_eq!(p.declared_type("a.B").unwrap().enum_constants, vec!["X"]);
    }

    #[test]
    fn test_load_symbols_reports_path() {
        let err = load_symbols(Path::new("/definitely/missing.yaml")).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.yaml"));
    }
}
