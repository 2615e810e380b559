// Common test utilities shared across test files

use pathto::{
    config::catalog::{parse_catalog, CatalogFormat},
    Application, Node,
};

pub const BASE: &str = "http://example.com/base";

pub const CATALOG: &str = r#"
- name: users
  uri_template: "http://example.com/users{-prefix|.|format}"
  optional_params: [format]
  options: [GET, POST]
  resource_templates:
    - name: new_user
      rel: new
      uri_template: "http://example.com/users/new{-prefix|.|format}"
      optional_params: [format]
    - name: user
      uri_template: "http://example.com/users/{user_id}{-prefix|.|format}"
      params: [user_id]
      optional_params: [format]
      resource_templates:
        - name: edit_user
          rel: edit
          uri_template: "http://example.com/users/{user_id}/edit{-prefix|.|format}"
          params: [user_id]
          optional_params: [format]
        - name: user_articles
          rel: articles
          uri_template: "http://example.com/users/{user_id}/articles{-prefix|.|format}"
          params: [user_id]
          optional_params: [format]
          resource_templates:
            - name: user_article
              uri_template: "http://example.com/users/{user_id}/articles/{article_id}{-prefix|.|format}"
              params: [user_id, article_id]
              optional_params: [format]
    - name: test_subresource_with_rel_and_mandatory_parameter
      rel: foo
      params: [bar]
      uri_template: "http://example.com/foo/{bar}"
- name: test_with_no_uri_template
  path_template: /path
- name: namespace_only
"#;

/// Root node over the shared test catalog
#[allow(dead_code)]
pub fn app() -> Node {
    let templates = parse_catalog(CATALOG, CatalogFormat::Yaml).expect("test catalog should parse");
    Application::new(templates, BASE).into_root()
}

/// Root node over an inline YAML catalog
#[allow(dead_code)]
pub fn app_from(yml: &str) -> Node {
    let templates = parse_catalog(yml, CatalogFormat::Yaml).expect("catalog should parse");
    Application::new(templates, BASE).into_root()
}
