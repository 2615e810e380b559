// Template module for the URI template mini-language
//
// Parsing and expansion of resource addresses with simple substitution
// (`{name}`) and operator expressions (`{-prefix|.|format}`).

mod ast;
mod parser;
mod resolver;

pub use ast::{Operator, OperatorExpr, Template, TemplatePart, VariableExpr};
pub use parser::TemplateParser;
pub use resolver::TemplateResolver;
