// Template variable resolution

use std::collections::BTreeMap;

use super::ast::{Operator, OperatorExpr, Template, TemplatePart};

/// Expands a parsed template against bound variables to produce an address.
///
/// Values are percent-encoded. Unbound simple variables expand to their
/// default or to nothing; operator expressions decide for themselves what
/// an unbound variable means.
pub struct TemplateResolver;

impl TemplateResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, template: &Template, variables: &BTreeMap<String, String>) -> String {
        let mut result = String::new();

        for part in &template.parts {
            match part {
                TemplatePart::Literal(s) => result.push_str(s),
                TemplatePart::Variable(var_expr) => {
                    let value = bound(variables, &var_expr.name).or(var_expr.default.as_deref());
                    if let Some(val) = value {
                        result.push_str(&urlencoding::encode(val));
                    }
                }
                TemplatePart::Operator(op_expr) => {
                    self.resolve_operator(op_expr, variables, &mut result)
                }
            }
        }

        result
    }

    fn resolve_operator(
        &self,
        expr: &OperatorExpr,
        variables: &BTreeMap<String, String>,
        out: &mut String,
    ) {
        let mut values = expr
            .variables
            .iter()
            .filter_map(|name| bound(variables, name).map(|value| (name.as_str(), value)));

        match expr.op {
            Operator::Prefix => {
                if let Some((_, value)) = values.next() {
                    out.push_str(&expr.arg);
                    out.push_str(&urlencoding::encode(value));
                }
            }
            Operator::Suffix => {
                if let Some((_, value)) = values.next() {
                    out.push_str(&urlencoding::encode(value));
                    out.push_str(&expr.arg);
                }
            }
            Operator::Opt => {
                if values.next().is_some() {
                    out.push_str(&expr.arg);
                }
            }
            Operator::Neg => {
                if values.next().is_none() {
                    out.push_str(&expr.arg);
                }
            }
            Operator::Join => {
                let pairs: Vec<String> = values
                    .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
                    .collect();
                out.push_str(&pairs.join(&expr.arg));
            }
        }
    }
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::new()
    }
}

// Empty strings count as unbound
fn bound<'a>(variables: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    variables
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}
