#![allow(clippy::unwrap_used, clippy::expect_used)]

use tsgen::model::{TypeInstance, TypeKind};
use tsgen::symbols::{SymbolProvider, TypeRef};
use tsgen::BuildError;

mod common;
use common::fixtures::{provider, shop};
use common::harness::Harness;

const GENERIC_METHODS: &str = r#"
types:
  - name: com.acme.Util
    kind: class
    methods:
      - name: unbounded
        type_parameters: [{ name: T }]
      - name: bounded
        type_parameters: [{ name: T, bounds: [{ kind: declared, name: java.lang.Number }] }]
      - name: intersection
        type_parameters:
          - name: T
            bounds:
              - { kind: declared, name: java.lang.Number }
              - { kind: declared, name: java.lang.Comparable }
      - name: convert
        type_parameters: [{ name: T, bounds: [{ kind: declared, name: java.lang.Number }] }]
        parameters: [{ name: value, type: { kind: type_var, name: T, owner: { method: { declaring_type: com.acme.Util, method: convert } } } }]
      - name: convert
        type_parameters: [{ name: T, bounds: [{ kind: declared, name: java.lang.String }] }]
        parameters:
          - { name: value, type: { kind: type_var, name: T, owner: { method: { declaring_type: com.acme.Util, method: convert, overload: 1 } } } }
          - { name: radix, type: { kind: primitive, name: int } }
"#;

#[test]
fn test_primitive_and_boxed_resolve_to_predefined() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let long = ctx.resolve(&TypeRef::primitive("long")).unwrap().unwrap();
    assert_eq!(h.graph.ts_name(long.definition).as_deref(), Some("number"));
    assert!(long.arguments.is_empty());
    let string = ctx.resolve(&TypeRef::declared("java.lang.String")).unwrap().unwrap();
    assert_eq!(h.graph.ts_name(string.definition).as_deref(), Some("string"));
}

#[test]
fn test_unbounded_wildcard_is_any() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let list = TypeRef::generic(
        "java.util.List",
        vec![TypeRef::Wildcard {
            extends: None,
            super_bound: None,
        }],
    );
    let resolved = ctx.resolve(&list).unwrap().unwrap();
    assert_eq!(resolved.definition, h.graph.collection());
    assert_eq!(resolved.arguments, vec![TypeInstance::new(h.graph.any())]);
}

#[test]
fn test_lower_bounded_wildcard_is_any() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let wildcard = TypeRef::Wildcard {
        extends: None,
        super_bound: Some(Box::new(TypeRef::declared("com.acme.shop.model.Item"))),
    };
    let resolved = ctx.resolve(&wildcard).unwrap().unwrap();
    assert_eq!(resolved.definition, h.graph.any());
}

#[test]
fn test_upper_bounded_wildcard_is_its_bound() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let wildcard = TypeRef::Wildcard {
        extends: Some(Box::new(TypeRef::declared("com.acme.shop.model.Item"))),
        super_bound: None,
    };
    let resolved = ctx.resolve(&wildcard).unwrap().unwrap();
    assert_eq!(Some(resolved.definition), h.graph.id_of("com.acme.shop.model.Item"));
}

#[test]
fn test_array_becomes_collection() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let resolved = ctx
        .resolve(&TypeRef::array(TypeRef::array(TypeRef::primitive("int"))))
        .unwrap()
        .unwrap();
    assert_eq!(resolved.definition, h.graph.collection());
    let inner = &resolved.arguments[0];
    assert_eq!(inner.definition, h.graph.collection());
    assert_eq!(h.graph.ts_name(inner.arguments[0].definition).as_deref(), Some("number"));
}

#[test]
fn test_raw_collection_has_no_arguments() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let resolved = ctx.resolve(&TypeRef::declared("java.util.ArrayList")).unwrap().unwrap();
    assert_eq!(resolved.definition, h.graph.collection());
    assert!(resolved.arguments.is_empty());
}

#[test]
fn test_arguments_on_non_generic_kind_are_dropped() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let resolved = ctx
        .resolve(&TypeRef::generic(
            "com.acme.shop.model.ItemStatus",
            vec![TypeRef::declared("java.lang.String")],
        ))
        .unwrap()
        .unwrap();
    assert_eq!(h.graph.kind(resolved.definition), Some(TypeKind::Enum));
    assert!(resolved.arguments.is_empty());
}

#[test]
fn test_type_variable_resolves_to_owner_placeholder() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let resolved = ctx
        .resolve(&TypeRef::type_var("T", "com.acme.shop.model.Page"))
        .unwrap()
        .unwrap();
    let page = h.graph.get("com.acme.shop.model.Page").unwrap();
    assert_eq!(resolved.definition, page.generic_params[0]);
    assert_eq!(h.graph.kind(resolved.definition), Some(TypeKind::GenericPlaceholder));
}

#[test]
fn test_type_variable_missing_on_owner_is_none() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let resolved = ctx
        .resolve(&TypeRef::type_var("X", "com.acme.shop.model.Page"))
        .unwrap();
    assert!(resolved.is_none());

    // and is dropped from argument lists
    let list = TypeRef::generic(
        "java.util.List",
        vec![TypeRef::type_var("X", "com.acme.shop.model.Page")],
    );
    let resolved = ctx.resolve(&list).unwrap().unwrap();
    assert!(resolved.arguments.is_empty());
}

#[test]
fn test_unknown_generic_owner_is_an_error() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let err = ctx
        .resolve(&TypeRef::type_var("T", "com.elsewhere.Missing"))
        .unwrap_err();
    assert!(matches!(err, BuildError::UnknownGenericOwner { .. }));
    assert!(!err.is_type_scoped());

    let err = ctx
        .resolve(&TypeRef::method_var("T", "com.acme.shop.model.Page", "nothing"))
        .unwrap_err();
    assert!(matches!(err, BuildError::UnknownGenericOwner { .. }));
}

#[test]
fn test_method_type_variable_bounds() {
    let p = provider(GENERIC_METHODS);
    let h = Harness::new();
    let ctx = h.ctx(&p);

    let unbounded = ctx
        .resolve(&TypeRef::method_var("T", "com.acme.Util", "unbounded"))
        .unwrap()
        .unwrap();
    assert_eq!(unbounded.definition, h.graph.any());

    let bounded = ctx
        .resolve(&TypeRef::method_var("T", "com.acme.Util", "bounded"))
        .unwrap()
        .unwrap();
    assert_eq!(h.graph.ts_name(bounded.definition).as_deref(), Some("number"));
    assert!(ctx.diagnostics.snapshot().is_empty());

    let intersection = ctx
        .resolve(&TypeRef::method_var("T", "com.acme.Util", "intersection"))
        .unwrap()
        .unwrap();
    assert_eq!(intersection.definition, h.graph.any());
    let diags = ctx.diagnostics.snapshot();
    assert_eq!(diags.len(), 1);
    assert!(diags[0].message.contains("2 bounds"));
}

#[test]
fn test_overloaded_method_type_variables() {
    let p = provider(GENERIC_METHODS);
    let h = Harness::new();
    let ctx = h.ctx(&p);

    let util = p.declared_type("com.acme.Util").unwrap();
    let second = &util.method_overload("convert", 1).unwrap().parameters[0].ty;
    assert_eq!(second, &TypeRef::overload_var("T", "com.acme.Util", "convert", 1));

    let first = ctx.resolve(&TypeRef::method_var("T", "com.acme.Util", "convert")).unwrap().unwrap();
    assert_eq!(h.graph.ts_name(first.definition).as_deref(), Some("number"));
    let second = ctx.resolve(second).unwrap().unwrap();
    assert_eq!(h.graph.ts_name(second.definition).as_deref(), Some("string"));

    let err = ctx
        .resolve(&TypeRef::overload_var("T", "com.acme.Util", "convert", 2))
        .unwrap_err();
    assert!(matches!(err, BuildError::UnknownGenericOwner { .. }));
    assert!(err.to_string().contains("com.acme.Util#convert[2]"));
}

#[test]
fn test_generic_instance_keeps_arguments() {
    let p = shop();
    let h = Harness::new();
    let ctx = h.ctx(&p);
    let page_of_items = TypeRef::generic(
        "com.acme.shop.model.Page",
        vec![TypeRef::declared("com.acme.shop.model.Item")],
    );
    let resolved = ctx.resolve(&page_of_items).unwrap().unwrap();
    assert_eq!(Some(resolved.definition), h.graph.id_of("com.acme.shop.model.Page"));
    assert_eq!(
        resolved.arguments,
        vec![TypeInstance::new(h.graph.id_of("com.acme.shop.model.Item").unwrap())]
    );
}
