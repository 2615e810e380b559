// Resource template registry
//
// Templates are stored in a flat arena and refer to each other by index, so
// a node only needs to carry a `TemplateId` to know where it sits in the tree.

use tracing::debug;

use super::params::Params;
use super::template::{Template, TemplateParser, TemplateResolver};
use crate::config::descriptor::TemplateDescriptor;
use crate::error::PathError;
use crate::validation::validate_param_names;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateId(usize);

/// An addressable pattern with its parameters and its place in the catalog
#[derive(Debug, Clone)]
pub struct ResourceTemplate {
    pub name: Option<String>,
    pub rel: Option<String>,
    pub uri_template: Option<String>,
    pub path_template: Option<String>,
    pub params: Vec<String>,
    pub optional_params: Vec<String>,
    pub options: Vec<String>,
    parsed_uri: Option<Template>,
    parsed_path: Option<Template>,
    parent: Option<TemplateId>,
    children: Vec<TemplateId>,
}

impl ResourceTemplate {
    /// Name used in diagnostics: the template name, else its relation
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.rel.as_deref())
            .unwrap_or("<anonymous>")
    }

    pub fn parent(&self) -> Option<TemplateId> {
        self.parent
    }

    pub fn children(&self) -> &[TemplateId] {
        &self.children
    }
}

/// The catalog of resource templates, read-only once built
#[derive(Debug, Clone, Default)]
pub struct ResourceTemplates {
    templates: Vec<ResourceTemplate>,
    roots: Vec<TemplateId>,
}

impl ResourceTemplates {
    pub fn from_descriptors(descriptors: Vec<TemplateDescriptor>) -> Result<Self, PathError> {
        let mut registry = Self::default();

        for descriptor in descriptors {
            let name = match descriptor.name.as_deref() {
                Some(name) => name.to_string(),
                None => {
                    return Err(PathError::Config(
                        "Top-level resource template is missing a name".to_string(),
                    ))
                }
            };
            if !registry.find_by_name(&name).is_empty() {
                return Err(PathError::Config(format!(
                    "Duplicate resource template name: {}",
                    name
                )));
            }
            let id = registry.insert(descriptor, None)?;
            registry.roots.push(id);
        }

        debug!(
            templates = registry.templates.len(),
            roots = registry.roots.len(),
            "loaded resource templates"
        );
        Ok(registry)
    }

    fn insert(
        &mut self,
        descriptor: TemplateDescriptor,
        parent: Option<TemplateId>,
    ) -> Result<TemplateId, PathError> {
        let label = descriptor
            .name
            .clone()
            .or_else(|| descriptor.rel.clone())
            .unwrap_or_else(|| "<anonymous>".to_string());
        validate_param_names(&label, &descriptor.params, &descriptor.optional_params)?;
        let parsed_uri = parse_optional(&label, descriptor.uri_template.as_deref())?;
        let parsed_path = parse_optional(&label, descriptor.path_template.as_deref())?;

        let id = TemplateId(self.templates.len());
        self.templates.push(ResourceTemplate {
            name: descriptor.name,
            rel: descriptor.rel,
            uri_template: descriptor.uri_template,
            path_template: descriptor.path_template,
            params: descriptor.params,
            optional_params: descriptor.optional_params,
            options: descriptor.options,
            parsed_uri,
            parsed_path,
            parent,
            children: Vec::new(),
        });

        for child in descriptor.resource_templates {
            let child_id = self.insert(child, Some(id))?;
            self.templates[id.0].children.push(child_id);
        }

        Ok(id)
    }

    pub fn get(&self, id: TemplateId) -> &ResourceTemplate {
        &self.templates[id.0]
    }

    pub fn roots(&self) -> &[TemplateId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Top-level templates with exactly this name
    pub fn find_by_name(&self, name: &str) -> Vec<TemplateId> {
        self.roots
            .iter()
            .copied()
            .filter(|id| self.get(*id).name.as_deref() == Some(name))
            .collect()
    }

    /// Children of `id` whose declared relation equals `rel`; `None` matches anonymous children
    pub fn find_by_rel(&self, id: TemplateId, rel: Option<&str>) -> Vec<TemplateId> {
        self.get(id)
            .children
            .iter()
            .copied()
            .filter(|child| self.get(*child).rel.as_deref() == rel)
            .collect()
    }

    /// Parameter names a template introduces relative to its parent, in positional order.
    ///
    /// Mandatory parameters come first, then optional ones; anything the
    /// parent template already requires is skipped.
    pub fn positional_params(&self, id: TemplateId) -> Vec<&str> {
        let template = self.get(id);
        let inherited: &[String] = match template.parent {
            Some(parent) => &self.get(parent).params,
            None => &[],
        };
        template
            .params
            .iter()
            .chain(template.optional_params.iter())
            .filter(|param| !inherited.contains(*param))
            .map(String::as_str)
            .collect()
    }

    /// Mandatory parameters of `id` absent from `params`
    pub fn missing_params(&self, id: TemplateId, params: &Params) -> Vec<String> {
        self.get(id)
            .params
            .iter()
            .filter(|param| !params.contains_key(*param))
            .cloned()
            .collect()
    }

    /// Expand a template into an address.
    ///
    /// The URI template wins when present; otherwise the path template is
    /// appended to `base`; a template with neither resolves to `base` itself.
    pub fn uri_for(
        &self,
        id: TemplateId,
        params: &Params,
        base: &str,
    ) -> Result<String, PathError> {
        let template = self.get(id);
        let missing = self.missing_params(id, params);
        if !missing.is_empty() {
            return Err(PathError::IncompleteAddress {
                template: template.label().to_string(),
                missing,
            });
        }

        let resolver = TemplateResolver::new();
        let address = match (&template.parsed_uri, &template.parsed_path) {
            (Some(uri), _) => resolver.resolve(uri, params),
            (None, Some(path)) => format!("{}{}", base, resolver.resolve(path, params)),
            (None, None) => base.to_string(),
        };
        Ok(address)
    }
}

fn parse_optional(label: &str, source: Option<&str>) -> Result<Option<Template>, PathError> {
    source
        .map(|s| {
            TemplateParser::parse(s)
                .map_err(|e| PathError::Template(format!("{} ({}): {}", label, s, e)))
        })
        .transpose()
}
