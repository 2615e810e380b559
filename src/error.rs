// Error handling for pathto

use std::fmt;

use crate::domain::Params;

/// Errors surfaced while loading a catalog or navigating it
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// The relation has no candidate templates at all
    UnknownRelation { relation: Option<String> },
    /// Candidates exist but none had its mandatory parameters satisfied
    NoMatchingTemplate {
        relation: Option<String>,
        params: Params,
    },
    /// The address was read before every mandatory parameter was bound
    IncompleteAddress {
        template: String,
        missing: Vec<String>,
    },
    Template(String),
    Config(String),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::UnknownRelation { relation } => {
                write!(f, "Unknown relation: {}", display_relation(relation))
            }
            PathError::NoMatchingTemplate { relation, params } => write!(
                f,
                "No resource template with relation {} is satisfied by params {:?}",
                display_relation(relation),
                params
            ),
            PathError::IncompleteAddress { template, missing } => write!(
                f,
                "Incomplete address for '{}': missing {}",
                template,
                missing.join(", ")
            ),
            PathError::Template(msg) => write!(f, "Invalid URI template: {}", msg),
            PathError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for PathError {}

fn display_relation(relation: &Option<String>) -> String {
    match relation {
        Some(rel) => format!("'{}'", rel),
        None => "<anonymous>".to_string(),
    }
}

// Extension trait for catalog loading results
pub trait ConfigResultExt<T> {
    /// Convert any displayable error to PathError::Config with a context prefix
    fn config_err(self, context: &str) -> Result<T, PathError>;
}

impl<T, E: std::fmt::Display> ConfigResultExt<T> for Result<T, E> {
    fn config_err(self, context: &str) -> Result<T, PathError> {
        self.map_err(|e| PathError::Config(format!("{}: {}", context, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_relation_display() {
        let err = PathError::UnknownRelation {
            relation: Some("comments".to_string()),
        };
        assert_eq!(err.to_string(), "Unknown relation: 'comments'");

        let anonymous = PathError::UnknownRelation { relation: None };
        assert_eq!(anonymous.to_string(), "Unknown relation: <anonymous>");
    }

    #[test]
    fn test_no_matching_template_lists_params() {
        let mut params = Params::new();
        params.insert("format".to_string(), "json".to_string());
        let err = PathError::NoMatchingTemplate {
            relation: Some("foo".to_string()),
            params,
        };
        let message = err.to_string();
        assert!(message.contains("'foo'"));
        assert!(message.contains("\"format\": \"json\""));
    }

    #[test]
    fn test_config_err_prefixes_context() {
        let result: Result<(), &str> = Err("boom");
        let err = result.config_err("Could not read catalog").unwrap_err();
        assert_eq!(
            err,
            PathError::Config("Could not read catalog: boom".to_string())
        );
    }
}
