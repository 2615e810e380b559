use serde::{Deserialize, Serialize};

/// One entry of a resource catalog as written in YAML or JSON.
///
/// Field names follow the snake_case catalog format; the camelCase spellings
/// are accepted as aliases.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct TemplateDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "relation", skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    #[serde(default, alias = "uriTemplate", skip_serializing_if = "Option::is_none")]
    pub uri_template: Option<String>,
    #[serde(default, alias = "pathTemplate", skip_serializing_if = "Option::is_none")]
    pub path_template: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
    #[serde(default, alias = "optionalParams", skip_serializing_if = "Vec::is_empty")]
    pub optional_params: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, alias = "children", skip_serializing_if = "Vec::is_empty")]
    pub resource_templates: Vec<TemplateDescriptor>,
}
