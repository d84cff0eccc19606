#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;

use tsgen::config::GenConfig;
use tsgen::model::TypeKind;

mod common;
use common::fixtures::{provider, shop};
use common::harness::Harness;

#[test]
fn test_get_or_define_returns_same_id() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let a = ctx.get_or_define("com.acme.shop.model.Item").unwrap();
    let b = ctx.get_or_define("com.acme.shop.model.Item").unwrap();
    assert_eq!(a, b);
    let item = h.graph.definition(a).unwrap();
    assert!(item.initialized);
    assert_eq!(item.kind, TypeKind::Interface);
    assert_eq!(item.package_name(), "com.acme.shop.model");
}

#[test]
fn test_recursive_bound_resolves() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let node_id = ctx.get_or_define("com.acme.shop.model.Node").unwrap();
    let node = h.graph.definition(node_id).unwrap();

    assert_eq!(node.generic_params.len(), 1);
    let t = h.graph.definition(node.generic_params[0]).unwrap();
    assert_eq!(t.kind, TypeKind::GenericPlaceholder);
    assert_eq!(t.ts_name, "T");
    // T extends Node<T>
    assert_eq!(t.super_types.len(), 1);
    let bound = &t.super_types[0];
    assert_eq!(bound.definition, node_id);
    assert_eq!(bound.arguments.len(), 1);
    assert_eq!(bound.arguments[0].definition, t.id);

    let parent = node.property("parent").unwrap();
    assert_eq!(parent.ty.definition, t.id);
}

#[test]
fn test_self_referencing_supertype() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let category = ctx.get_or_define("com.acme.shop.model.Category").unwrap();
    let node = h.graph.id_of("com.acme.shop.model.Node").unwrap();
    let def = h.graph.definition(category).unwrap();
    assert_eq!(def.super_types.len(), 1);
    assert_eq!(def.super_types[0].definition, node);
    assert_eq!(def.super_types[0].arguments[0].definition, category);
}

#[test]
fn test_enum_constants_in_order() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let id = ctx.get_or_define("com.acme.shop.model.ItemStatus").unwrap();
    let def = h.graph.definition(id).unwrap();
    assert_eq!(def.kind, TypeKind::Enum);
    let names: Vec<&str> = def.enum_constants.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ACTIVE", "RETIRED"]);
}

#[test]
fn test_collection_and_map_subtypes_use_markers() {
    let p = provider(
        r#"
types:
  - name: com.acme.Tags
    kind: class
    superclass: { kind: declared, name: java.util.ArrayList, args: [{ kind: declared, name: java.lang.String }] }
"#,
    );
    let h = Harness::new();
    let ctx = h.ctx(&p);
    assert_eq!(ctx.get_or_define("com.acme.Tags").unwrap(), h.graph.collection());
    assert_eq!(ctx.get_or_define("java.util.HashMap").unwrap(), h.graph.map());
    assert_eq!(ctx.get_or_define("java.util.Set").unwrap(), h.graph.collection());
}

#[test]
fn test_unknown_type_is_any_with_warning() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let id = ctx.get_or_define("com.elsewhere.Unknown").unwrap();
    assert_eq!(id, h.graph.any());
    let diags = ctx.diagnostics.snapshot();
    assert_eq!(diags.len(), 1);
    assert!(diags[0].location.contains("com.elsewhere.Unknown"));
}

#[test]
fn test_excluded_types_resolve_to_any() {
    let mut exclude = BTreeMap::new();
    exclude.insert("model".to_string(), r"com\.acme\.shop\.model\.Item.*".to_string());
    let h = Harness::with_config(GenConfig {
        exclude_classes: exclude,
        ..GenConfig::default()
    });
    let p = shop();
    let ctx = h.ctx(&p);
    assert_eq!(ctx.get_or_define("com.acme.shop.model.Item").unwrap(), h.graph.any());
    assert_eq!(ctx.get_or_define("com.acme.shop.model.ItemStatus").unwrap(), h.graph.any());
    // whole-name match only
    assert_ne!(ctx.get_or_define("com.acme.shop.model.Page").unwrap(), h.graph.any());
    assert!(h.graph.id_of("com.acme.shop.model.Item").is_none());
}

#[test]
fn test_type_override_wins_over_declaration() {
    let mut overrides = BTreeMap::new();
    overrides.insert("com.acme.shop.model.Item".to_string(), "ExternalItem".to_string());
    let h = Harness::with_config(GenConfig {
        type_overrides: overrides,
        ..GenConfig::default()
    });
    let p = shop();
    let ctx = h.ctx(&p);
    let id = ctx.get_or_define("com.acme.shop.model.Item").unwrap();
    let def = h.graph.definition(id).unwrap();
    assert!(def.predefined);
    assert_eq!(def.ts_name, "ExternalItem");
    assert!(def.properties.is_empty());
}

#[test]
fn test_display_name_override_on_type() {
    let p = provider(
        r#"
types:
  - name: com.acme.InternalOrder
    kind: class
    annotations: [{ name: tsgen.Name, values: { value: Order } }]
"#,
    );
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let id = ctx.get_or_define("com.acme.InternalOrder").unwrap();
    let def = h.graph.definition(id).unwrap();
    assert_eq!(def.ts_name, "Order");
    assert_eq!(def.short_name, "InternalOrder");
}

#[test]
fn test_nested_type_container() {
    let p = provider(
        r#"
types:
  - name: com.acme.Outer
    kind: class
  - name: com.acme.Outer$Inner
    simple_name: Inner
    enclosing_type: com.acme.Outer
    kind: class
"#,
    );
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let id = ctx.get_or_define("com.acme.Outer$Inner").unwrap();
    let def = h.graph.definition(id).unwrap();
    let container = def.container.unwrap();
    assert_eq!(container.enclosing_types(), vec!["Outer"]);
    assert_eq!(container.package_name(), "com.acme");
}

#[test]
fn test_concurrent_definitions_build_once() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let names = [
        "com.acme.shop.model.Item",
        "com.acme.shop.model.Category",
        "com.acme.shop.model.Node",
        "com.acme.shop.model.Page",
    ];

    let ids: Vec<Vec<_>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ctx = &ctx;
                s.spawn(move || {
                    let mut ids = Vec::new();
                    for k in 0..names.len() {
                        let name = names[(i + k) % names.len()];
                        ids.push((name, ctx.get_or_define(name).unwrap()));
                    }
                    ids.sort();
                    ids.into_iter().map(|(_, id)| id).collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for other in &ids[1..] {
        assert_eq!(other, &ids[0]);
    }
    for name in names {
        let def = h.graph.get(name).unwrap();
        assert!(def.initialized, "{} should be initialized", name);
    }
}

#[test]
fn test_clear_keeps_ids_monotonic() {
    let p = shop();
    let h = Harness::new();
    let before = {
        let ctx = h.ctx(&p);
        ctx.get_or_define("com.acme.shop.model.Item").unwrap()
    };
    h.graph.clear();
    assert!(h.graph.is_empty());
    assert!(!h.graph.is_seeded());
    let ctx = h.ctx(&p);
    let after = ctx.get_or_define("com.acme.shop.model.Item").unwrap();
    assert!(after > before);
}
