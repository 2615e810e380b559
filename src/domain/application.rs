use std::sync::Arc;

use super::node::Node;
use super::params::Params;
use super::resource_template::ResourceTemplates;

/// Shared navigation context: the template catalog, the base address and the
/// params every walk starts from
#[derive(Debug, Clone)]
pub struct Application {
    templates: ResourceTemplates,
    base: String,
    params: Params,
}

impl Application {
    pub fn new(templates: ResourceTemplates, base: impl Into<String>) -> Self {
        Self {
            templates,
            base: base.into(),
            params: Params::new(),
        }
    }

    /// Params carried by the root node and inherited by everything below it
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn templates(&self) -> &ResourceTemplates {
        &self.templates
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Entry point of the navigation tree
    pub fn into_root(self) -> Node {
        Node::root(Arc::new(self))
    }
}
