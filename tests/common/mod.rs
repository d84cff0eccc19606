#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

pub mod fixtures {
    use tsgen::SchemaSymbolProvider;

    /// A small shop: data types with generics, an enum, a record, a
    /// recursive bound and one controller exercising every binding.
    pub const SHOP: &str = r#"
types:
  - name: com.acme.shop.model.ItemStatus
    kind: enum
    enum_constants: [ACTIVE, RETIRED]

  - name: com.acme.shop.model.Item
    kind: class
    annotations: [{ name: lombok.Data }]
    fields:
      - { name: id, type: { kind: primitive, name: long }, modifiers: [private] }
      - name: name
        type: { kind: declared, name: java.lang.String }
        modifiers: [private]
        annotations: [{ name: jakarta.validation.constraints.NotNull }]
      - { name: description, type: { kind: declared, name: java.lang.String }, modifiers: [private] }
      - { name: status, type: { kind: declared, name: com.acme.shop.model.ItemStatus }, modifiers: [private] }
      - name: tags
        type: { kind: declared, name: java.util.List, args: [{ kind: declared, name: java.lang.String }] }
        modifiers: [private]
      - name: stock
        type:
          kind: declared
          name: java.util.Map
          args:
            - { kind: declared, name: com.acme.shop.model.ItemStatus }
            - { kind: declared, name: java.lang.Integer }
        modifiers: [private]
      - { name: COUNTER, type: { kind: primitive, name: int }, modifiers: [private, static] }
      - { name: cache, type: { kind: declared, name: java.lang.String }, modifiers: [private, transient] }

  - name: com.acme.shop.model.Page
    kind: class
    type_parameters: [{ name: T }]
    methods:
      - name: getItems
        modifiers: [public]
        return_type:
          kind: declared
          name: java.util.List
          args: [{ kind: type_var, name: T, owner: { type: com.acme.shop.model.Page } }]
      - { name: getTotal, modifiers: [public], return_type: { kind: primitive, name: long } }
      - { name: isLast, modifiers: [public], return_type: { kind: primitive, name: boolean } }
      - { name: getInstance, modifiers: [public, static], return_type: { kind: declared, name: com.acme.shop.model.Page } }

  - name: com.acme.shop.model.Node
    kind: class
    type_parameters:
      - name: T
        bounds:
          - kind: declared
            name: com.acme.shop.model.Node
            args: [{ kind: type_var, name: T, owner: { type: com.acme.shop.model.Node } }]
    methods:
      - name: getParent
        modifiers: [public]
        return_type: { kind: type_var, name: T, owner: { type: com.acme.shop.model.Node } }
      - name: getChildren
        modifiers: [public]
        return_type:
          kind: declared
          name: java.util.List
          args: [{ kind: type_var, name: T, owner: { type: com.acme.shop.model.Node } }]

  - name: com.acme.shop.model.Category
    kind: class
    superclass:
      kind: declared
      name: com.acme.shop.model.Node
      args: [{ kind: declared, name: com.acme.shop.model.Category }]
    methods:
      - { name: getLabel, modifiers: [public], return_type: { kind: declared, name: java.lang.String } }

  - name: com.acme.shop.model.Coordinates
    kind: record
    record_components:
      - { name: field1, type: { kind: primitive, name: int } }
      - { name: field2, type: { kind: declared, name: java.lang.String } }
      - name: field3
        type: { kind: primitive, name: double }
        annotations: [{ name: tsgen.Name, values: { value: customName } }]

  - name: com.acme.shop.api.ItemController
    kind: class
    annotations:
      - { name: tsgen.Endpoint }
      - name: org.springframework.web.bind.annotation.RequestMapping
        values: { value: /api/, method: [GET] }
    methods:
      - name: getItem
        modifiers: [public]
        annotations:
          - { name: org.springframework.web.bind.annotation.GetMapping, values: { value: "item/{id}" } }
        parameters:
          - name: id
            type: { kind: primitive, name: long }
            annotations: [{ name: org.springframework.web.bind.annotation.PathVariable }]
        return_type: { kind: declared, name: com.acme.shop.model.Item }
      - name: listItems
        modifiers: [public]
        annotations:
          - { name: org.springframework.web.bind.annotation.RequestMapping, values: { value: items } }
        parameters:
          - name: page
            type: { kind: primitive, name: int }
            annotations:
              - name: org.springframework.web.bind.annotation.RequestParam
                values: { value: p, required: false }
          - name: request
            type: { kind: declared, name: jakarta.servlet.http.HttpServletRequest }
        return_type:
          kind: declared
          name: com.acme.shop.model.Page
          args: [{ kind: declared, name: com.acme.shop.model.Item }]
      - name: saveItem
        modifiers: [public]
        annotations:
          - { name: org.springframework.web.bind.annotation.PostMapping, values: { path: item } }
        parameters:
          - name: item
            type: { kind: declared, name: com.acme.shop.model.Item }
            annotations: [{ name: org.springframework.web.bind.annotation.RequestBody }]
      - name: categories
        modifiers: [public]
        annotations:
          - { name: org.springframework.web.bind.annotation.GetMapping, values: { value: categories } }
        return_type:
          kind: array
          component: { kind: declared, name: com.acme.shop.model.Category }
      - name: helper
        modifiers: [public]
        return_type: { kind: declared, name: java.lang.String }

  - name: com.acme.shop.api.Plain
    kind: class
"#;

    pub fn shop() -> SchemaSymbolProvider {
        SchemaSymbolProvider::from_yaml_str(SHOP).expect("shop fixture should parse")
    }

    /// Provider over an ad-hoc YAML export
    pub fn provider(yaml: &str) -> SchemaSymbolProvider {
        SchemaSymbolProvider::from_yaml_str(yaml).expect("fixture should parse")
    }
}

pub mod harness {
    use tsgen::config::GenConfig;
    use tsgen::properties::PropertyPipeline;
    use tsgen::{EndpointRegistry, ProcessingContext, SymbolProvider, TypeGraph};

    /// Long-lived state a context borrows
    pub struct Harness {
        pub graph: TypeGraph,
        pub endpoints: EndpointRegistry,
        pub pipeline: PropertyPipeline,
        pub config: GenConfig,
    }

    impl Harness {
        pub fn new() -> Self {
            Self::with_config(GenConfig::default())
        }

        pub fn with_config(config: GenConfig) -> Self {
            Harness {
                graph: TypeGraph::new(),
                endpoints: EndpointRegistry::new(),
                pipeline: PropertyPipeline::standard(),
                config,
            }
        }

        pub fn ctx<'a>(&'a self, provider: &'a dyn SymbolProvider) -> ProcessingContext<'a> {
            ProcessingContext::new(
                &self.graph,
                &self.endpoints,
                provider,
                &self.config,
                &self.pipeline,
            )
            .expect("context should build")
        }
    }

    impl Default for Harness {
        fn default() -> Self {
            Self::new()
        }
    }
}
