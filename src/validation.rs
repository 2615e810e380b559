// Validation functions for pathto
// Checks applied to catalog descriptions and command-line input

use url::Url;

use crate::error::PathError;

/// Validate that a base address is an absolute http or https URL
///
/// Returns Ok(()) if valid, Err(PathError::Config) if invalid
pub fn validate_base_address(base: &str) -> Result<(), PathError> {
    let url = base
        .parse::<Url>()
        .map_err(|e| PathError::Config(format!("Invalid base address '{}': {}", base, e)))?;

    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(PathError::Config(
            "Only http:// and https:// base addresses are allowed".to_string(),
        ));
    }

    if url.host_str().is_none() {
        return Err(PathError::Config(format!(
            "Base address '{}' must have a host",
            base
        )));
    }

    Ok(())
}

/// Validate the parameter names declared by a template
///
/// Returns Ok(()) if every name is valid and no name is declared twice
pub fn validate_param_names(
    template: &str,
    params: &[String],
    optional: &[String],
) -> Result<(), PathError> {
    let mut seen = std::collections::HashSet::new();
    for name in params.iter().chain(optional.iter()) {
        if !is_valid_param_name(name) {
            return Err(PathError::Config(format!(
                "Invalid parameter name '{}' in '{}': \
                 must contain only letters, numbers, and underscores",
                name, template
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(PathError::Config(format!(
                "Parameter '{}' declared more than once in '{}'",
                name, template
            )));
        }
    }
    Ok(())
}

/// Check if a parameter name is valid (alphanumeric + underscore)
fn is_valid_param_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}
