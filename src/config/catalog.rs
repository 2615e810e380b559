use std::path::Path;

use tracing::debug;

use crate::{
    config::descriptor::TemplateDescriptor,
    domain::{Application, ResourceTemplates},
    error::{ConfigResultExt, PathError},
};

pub const DEFAULT_CATALOG_FILE: &str = "resources.yml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

impl CatalogFormat {
    /// `.json` files are read as JSON, everything else as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::Json,
            _ => CatalogFormat::Yaml,
        }
    }
}

/// Parse a catalog description into a template registry
pub fn parse_catalog(source: &str, format: CatalogFormat) -> Result<ResourceTemplates, PathError> {
    let descriptors: Vec<TemplateDescriptor> = match format {
        CatalogFormat::Yaml => serde_yaml::from_str(source).config_err("Invalid yaml catalog")?,
        CatalogFormat::Json => serde_json::from_str(source).config_err("Invalid json catalog")?,
    };
    ResourceTemplates::from_descriptors(descriptors)
}

/// Read a catalog file, falling back to [`DEFAULT_CATALOG_FILE`]
pub fn load_catalog(maybe_path: Option<&str>) -> Result<ResourceTemplates, PathError> {
    let path = Path::new(maybe_path.unwrap_or(DEFAULT_CATALOG_FILE));
    debug!(path = %path.display(), "loading resource catalog");

    let source = std::fs::read_to_string(path)
        .config_err(&format!("Could not read {}", path.display()))?;
    parse_catalog(&source, CatalogFormat::from_path(path))
}

pub fn load_application(maybe_path: Option<&str>, base: &str) -> Result<Application, PathError> {
    Ok(Application::new(load_catalog(maybe_path)?, base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_loads() {
        // ensure that the bundled catalog can be constructed
        let templates = load_catalog(None).unwrap();
        assert!(!templates.find_by_name("users").is_empty());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(CatalogFormat::from_path(Path::new("a.json")), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("a.JSON")), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("a.yml")), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("catalog")), CatalogFormat::Yaml);
    }

    #[test]
    fn test_parse_json_catalog() {
        let json = r#"[{"name": "users", "uri_template": "http://example.com/users"}]"#;
        let templates = parse_catalog(json, CatalogFormat::Json).unwrap();
        assert_eq!(templates.len(), 1);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let result = parse_catalog("- name: [unclosed", CatalogFormat::Yaml);
        match result {
            Err(PathError::Config(msg)) => assert!(msg.starts_with("Invalid yaml catalog")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_catalog(Some("does/not/exist.yml"));
        match result {
            Err(PathError::Config(msg)) => assert!(msg.contains("Could not read")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }
}
