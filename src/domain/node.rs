// Navigation nodes
//
// A node is a resource template bound to a parameter mapping. Nodes are
// immutable; every navigation or currying step builds a new one.

use std::fmt;
use std::sync::{Arc, Weak};

use tracing::{debug, trace};

use super::application::Application;
use super::params::{merge_params, Args, Params};
use super::resource_template::{ResourceTemplate, ResourceTemplates, TemplateId};
use crate::error::PathError;

#[derive(Clone)]
pub struct Node {
    inner: Arc<NodeInner>,
}

struct NodeInner {
    app: Arc<Application>,
    parent: Option<Weak<NodeInner>>,
    template: Option<TemplateId>,
    params: Params,
    address: Result<String, PathError>,
}

/// Outcome of resolving a candidate set against the supplied arguments
enum Attempt {
    Complete(Node),
    Incomplete { params: Params, missing: Vec<String> },
}

impl Node {
    pub fn root(app: Arc<Application>) -> Self {
        let params = app.params().clone();
        Self::build(app, None, None, params)
    }

    fn build(
        app: Arc<Application>,
        parent: Option<Weak<NodeInner>>,
        template: Option<TemplateId>,
        params: Params,
    ) -> Self {
        let address = match template {
            Some(id) => app.templates().uri_for(id, &params, app.base()),
            None => Ok(app.base().to_string()),
        };
        Self {
            inner: Arc::new(NodeInner {
                app,
                parent,
                template,
                params,
                address,
            }),
        }
    }

    fn spawn_child(&self, template: TemplateId, params: Params) -> Self {
        Self::build(
            Arc::clone(&self.inner.app),
            Some(Arc::downgrade(&self.inner)),
            Some(template),
            params,
        )
    }

    fn templates(&self) -> &ResourceTemplates {
        self.inner.app.templates()
    }

    pub fn is_root(&self) -> bool {
        self.inner.template.is_none()
    }

    /// The node this one was navigated from, if it is still alive
    pub fn parent(&self) -> Option<Node> {
        self.inner
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Node { inner })
    }

    pub fn template_id(&self) -> Option<TemplateId> {
        self.inner.template
    }

    pub fn template(&self) -> Option<&ResourceTemplate> {
        self.inner.template.map(|id| self.templates().get(id))
    }

    pub fn params(&self) -> &Params {
        &self.inner.params
    }

    /// The resolved address; fails when mandatory params are still unbound
    pub fn address(&self) -> Result<&str, PathError> {
        match &self.inner.address {
            Ok(address) => Ok(address),
            Err(e) => Err(e.clone()),
        }
    }

    fn candidate_templates(&self, relation: Option<&str>) -> Vec<TemplateId> {
        let templates = self.templates();
        match self.inner.template {
            // The root is a catalog of named resources
            None => relation
                .map(|name| templates.find_by_name(name))
                .unwrap_or_default(),
            // Any other node exposes the relations of its bound template
            Some(id) => templates.find_by_rel(id, relation),
        }
    }

    fn resolve(&self, relation: Option<&str>, args: &Args) -> Result<Attempt, PathError> {
        let candidates = self.candidate_templates(relation);
        if candidates.is_empty() {
            return Err(PathError::UnknownRelation {
                relation: relation.map(str::to_string),
            });
        }

        let templates = self.templates();
        let mut attempted = Params::new();
        let mut missing = Vec::new();
        for id in candidates {
            let positional = templates.positional_params(id);
            let params = merge_params(&self.inner.params, Some(positional.as_slice()), args);
            let unbound = templates.missing_params(id, &params);
            if unbound.is_empty() {
                debug!(
                    relation = relation.unwrap_or("<anonymous>"),
                    template = templates.get(id).label(),
                    "resolved child template"
                );
                return Ok(Attempt::Complete(self.spawn_child(id, params)));
            }
            trace!(
                template = templates.get(id).label(),
                missing = ?unbound,
                "candidate template not satisfied"
            );
            attempted = params;
            missing = unbound;
        }

        Ok(Attempt::Incomplete {
            params: attempted,
            missing,
        })
    }

    /// Navigate to the first child template for `relation` whose mandatory
    /// params are satisfied by this node's params plus `args`.
    ///
    /// `None` addresses anonymous children (see [`Node::item`]).
    pub fn child(&self, relation: Option<&str>, args: &Args) -> Result<Node, PathError> {
        match self.resolve(relation, args)? {
            Attempt::Complete(node) => Ok(node),
            Attempt::Incomplete { params, .. } => Err(PathError::NoMatchingTemplate {
                relation: relation.map(str::to_string),
                params,
            }),
        }
    }

    /// Follow a relation without arguments.
    ///
    /// Yields the child directly when nothing is missing, otherwise a
    /// [`Deferred`] step waiting for the remaining params.
    pub fn relation(&self, name: &str) -> Result<Resolution, PathError> {
        match self.resolve(Some(name), &Args::new())? {
            Attempt::Complete(node) => Ok(Resolution::Complete(node)),
            Attempt::Incomplete { missing, .. } => {
                debug!(relation = name, missing = ?missing, "deferring relation");
                Ok(Resolution::Deferred(Deferred {
                    origin: self.clone(),
                    relation: name.to_string(),
                    missing,
                }))
            }
        }
    }

    /// Address an anonymous child, e.g. an item of a collection
    pub fn item(&self, args: &Args) -> Result<Node, PathError> {
        self.child(None, args)
    }

    /// Same template, more params bound. Never fails; an incomplete result
    /// only errors once its address is read.
    pub fn with_params(&self, args: &Args) -> Node {
        let positional = self
            .inner
            .template
            .map(|id| self.templates().positional_params(id));
        let params = merge_params(&self.inner.params, positional.as_deref(), args);
        Self::build(
            Arc::clone(&self.inner.app),
            self.inner.parent.clone(),
            self.inner.template,
            params,
        )
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.address {
            Ok(address) => write!(f, "{}", address),
            Err(e) => write!(f, "<{}>", e),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("template", &self.template().map(ResourceTemplate::label))
            .field("params", &self.inner.params)
            .field("address", &self.inner.address)
            .finish()
    }
}

/// Result of following a relation with no arguments
#[derive(Debug, Clone)]
pub enum Resolution {
    Complete(Node),
    Deferred(Deferred),
}

impl Resolution {
    /// Supply arguments: a deferred step navigates with them, a complete
    /// node is curried with them.
    pub fn call(&self, args: &Args) -> Result<Node, PathError> {
        match self {
            Resolution::Complete(node) => Ok(node.with_params(args)),
            Resolution::Deferred(deferred) => deferred.call(args),
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Resolution::Deferred(_))
    }

    /// The resolved node; a deferred step fails with `NoMatchingTemplate`
    pub fn into_node(self) -> Result<Node, PathError> {
        match self {
            Resolution::Complete(node) => Ok(node),
            Resolution::Deferred(deferred) => deferred.call(&Args::new()),
        }
    }
}

/// A relation that still needs params before it can resolve
#[derive(Debug, Clone)]
pub struct Deferred {
    origin: Node,
    relation: String,
    missing: Vec<String>,
}

impl Deferred {
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// Mandatory params the last candidate template was missing
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    pub fn call(&self, args: &Args) -> Result<Node, PathError> {
        self.origin.child(Some(&self.relation), args)
    }
}
