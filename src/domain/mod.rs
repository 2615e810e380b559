// Domain model: resource templates, parameters and navigation nodes

pub mod application;
pub mod node;
pub mod params;
pub mod resource_template;
pub mod template;

pub use application::Application;
pub use node::{Deferred, Node, Resolution};
pub use params::{merge_params, Arg, Args, Params};
pub use resource_template::{ResourceTemplate, ResourceTemplates, TemplateId};
