//! Built-in knowledge about library types that never appear in a symbol
//! export: the Spring web annotations and the standard collection
//! hierarchy.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::markers;
use super::types::{AliasFor, Annotation, AnnotationAttribute, AnnotationType, AnnotationValue};

/// Direct supertypes of the standard collection and map types
static LIBRARY_SUPERTYPES: &[(&str, &[&str])] = &[
    ("java.util.List", &["java.util.Collection"]),
    ("java.util.Set", &["java.util.Collection"]),
    ("java.util.Queue", &["java.util.Collection"]),
    ("java.util.Deque", &["java.util.Queue"]),
    ("java.util.SortedSet", &["java.util.Set"]),
    ("java.util.NavigableSet", &["java.util.SortedSet"]),
    ("java.util.AbstractCollection", &["java.util.Collection"]),
    ("java.util.AbstractList", &["java.util.AbstractCollection", "java.util.List"]),
    ("java.util.ArrayList", &["java.util.AbstractList", "java.util.List"]),
    ("java.util.LinkedList", &["java.util.AbstractList", "java.util.List", "java.util.Deque"]),
    ("java.util.Vector", &["java.util.AbstractList", "java.util.List"]),
    ("java.util.HashSet", &["java.util.AbstractCollection", "java.util.Set"]),
    ("java.util.LinkedHashSet", &["java.util.HashSet", "java.util.Set"]),
    ("java.util.TreeSet", &["java.util.AbstractCollection", "java.util.NavigableSet"]),
    ("java.util.EnumSet", &["java.util.AbstractCollection", "java.util.Set"]),
    ("java.util.ArrayDeque", &["java.util.AbstractCollection", "java.util.Deque"]),
    ("java.util.PriorityQueue", &["java.util.AbstractCollection", "java.util.Queue"]),
    ("java.util.concurrent.CopyOnWriteArrayList", &["java.util.List"]),
    ("java.util.SortedMap", &["java.util.Map"]),
    ("java.util.NavigableMap", &["java.util.SortedMap"]),
    ("java.util.AbstractMap", &["java.util.Map"]),
    ("java.util.HashMap", &["java.util.AbstractMap", "java.util.Map"]),
    ("java.util.LinkedHashMap", &["java.util.HashMap", "java.util.Map"]),
    ("java.util.TreeMap", &["java.util.AbstractMap", "java.util.NavigableMap"]),
    ("java.util.EnumMap", &["java.util.AbstractMap", "java.util.Map"]),
    ("java.util.Hashtable", &["java.util.Map"]),
    ("java.util.concurrent.ConcurrentMap", &["java.util.Map"]),
    ("java.util.concurrent.ConcurrentHashMap", &["java.util.AbstractMap", "java.util.concurrent.ConcurrentMap"]),
];

/// Direct library supertypes of `name`, empty for unknown names
pub fn library_supertypes(name: &str) -> &'static [&'static str] {
    LIBRARY_SUPERTYPES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, supers)| *supers)
        .unwrap_or(&[])
}

fn alias(name: &str, annotation: Option<&str>, attribute: &str) -> AnnotationAttribute {
    AnnotationAttribute {
        name: name.to_string(),
        alias_for: Some(AliasFor {
            annotation: annotation.map(str::to_string),
            attribute: Some(attribute.to_string()),
        }),
    }
}

fn plain(name: &str) -> AnnotationAttribute {
    AnnotationAttribute {
        name: name.to_string(),
        alias_for: None,
    }
}

fn verb_mapping(name: &str, verb: &str) -> AnnotationType {
    AnnotationType {
        name: name.to_string(),
        annotations: vec![Annotation::new(markers::REQUEST_MAPPING).with(
            "method",
            AnnotationValue::List(vec![AnnotationValue::Str(verb.to_string())]),
        )],
        attributes: vec![
            alias("value", Some(markers::REQUEST_MAPPING), "value"),
            alias("path", Some(markers::REQUEST_MAPPING), "path"),
            alias("name", Some(markers::REQUEST_MAPPING), "name"),
        ],
    }
}

fn name_value_pair(name: &str, extra: &[&str]) -> AnnotationType {
    let mut attributes = vec![alias("value", None, "name"), alias("name", None, "value")];
    attributes.extend(extra.iter().map(|a| plain(a)));
    AnnotationType {
        name: name.to_string(),
        annotations: Vec::new(),
        attributes,
    }
}

static CATALOG: Lazy<HashMap<&'static str, AnnotationType>> = Lazy::new(|| {
    let mut catalog = HashMap::new();
    catalog.insert(
        markers::REQUEST_MAPPING,
        AnnotationType {
            name: markers::REQUEST_MAPPING.to_string(),
            annotations: Vec::new(),
            attributes: vec![
                alias("value", None, "path"),
                alias("path", None, "value"),
                plain("method"),
                plain("name"),
            ],
        },
    );
    catalog.insert(markers::GET_MAPPING, verb_mapping(markers::GET_MAPPING, "GET"));
    catalog.insert(markers::POST_MAPPING, verb_mapping(markers::POST_MAPPING, "POST"));
    catalog.insert(markers::PUT_MAPPING, verb_mapping(markers::PUT_MAPPING, "PUT"));
    catalog.insert(markers::DELETE_MAPPING, verb_mapping(markers::DELETE_MAPPING, "DELETE"));
    catalog.insert(markers::PATCH_MAPPING, verb_mapping(markers::PATCH_MAPPING, "PATCH"));
    catalog.insert(
        markers::REQUEST_PARAM,
        name_value_pair(markers::REQUEST_PARAM, &["required", "defaultValue"]),
    );
    catalog.insert(
        markers::PATH_VARIABLE,
        name_value_pair(markers::PATH_VARIABLE, &["required"]),
    );
    catalog.insert(
        markers::REQUEST_BODY,
        AnnotationType {
            name: markers::REQUEST_BODY.to_string(),
            annotations: Vec::new(),
            attributes: vec![plain("required")],
        },
    );
    catalog
});

/// Built-in declaration of a well-known annotation type
pub fn annotation_type(name: &str) -> Option<&'static AnnotationType> {
    CATALOG.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_supertypes() {
        assert_eq!(library_supertypes("java.util.List"), &["java.util.Collection"]);
        assert!(library_supertypes("com.acme.Order").is_empty());
    }

    #[test]
    fn test_get_mapping_is_meta_annotated() {
        let get = annotation_type(markers::GET_MAPPING).unwrap();
        assert_eq!(get.annotations[0].name, markers::REQUEST_MAPPING);
        assert!(get
            .attributes
            .iter()
            .any(|a| a.name == "path" && a.alias_for.is_some()));
    }
}
