// Abstract Syntax Tree types for URI templates

/// Represents a parsed template as a list of parts
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub parts: Vec<TemplatePart>,
}

impl Template {
    pub fn new(parts: Vec<TemplatePart>) -> Self {
        Self { parts }
    }
}

/// A template consists of literal strings, simple variables and operator expressions
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Literal(String),
    Variable(VariableExpr),
    Operator(OperatorExpr),
}

/// A simple `{name}` or `{name=default}` substitution
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    pub name: String,
    pub default: Option<String>,
}

impl VariableExpr {
    pub fn new(name: String) -> Self {
        Self {
            name,
            default: None,
        }
    }

    pub fn with_default(mut self, default: String) -> Self {
        self.default = Some(default);
        self
    }
}

/// An operator expression of the form `{-op|arg|var1,var2}`
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorExpr {
    pub op: Operator,
    pub arg: String,
    pub variables: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Emit `arg` followed by the value, only when the variable is bound
    Prefix,
    /// Emit the value followed by `arg`, only when the variable is bound
    Suffix,
    /// Emit `arg` when any of the variables is bound
    Opt,
    /// Emit `arg` when none of the variables is bound
    Neg,
    /// Emit `name=value` pairs for the bound variables, separated by `arg`
    Join,
}

impl Operator {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "prefix" => Some(Operator::Prefix),
            "suffix" => Some(Operator::Suffix),
            "opt" => Some(Operator::Opt),
            "neg" => Some(Operator::Neg),
            "join" => Some(Operator::Join),
            _ => None,
        }
    }

    /// Prefix and suffix only make sense for a single variable
    pub fn is_single_variable(&self) -> bool {
        matches!(self, Operator::Prefix | Operator::Suffix)
    }
}
