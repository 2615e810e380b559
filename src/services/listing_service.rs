// Listing service - renders the catalog tree for the `--list` command

use crate::domain::{ResourceTemplates, TemplateId};

/// One line per template, children indented under their parent
pub fn catalog_lines(templates: &ResourceTemplates) -> Vec<String> {
    let mut lines = Vec::new();
    for root in templates.roots() {
        push_lines(templates, *root, 0, &mut lines);
    }
    lines
}

fn push_lines(
    templates: &ResourceTemplates,
    id: TemplateId,
    depth: usize,
    lines: &mut Vec<String>,
) {
    let template = templates.get(id);
    let mut line = format!("{}{}", "  ".repeat(depth), template.label());

    if let (Some(rel), Some(_)) = (&template.rel, &template.name) {
        line.push_str(&format!(" (rel: {})", rel));
    }
    if !template.params.is_empty() {
        line.push_str(&format!(" [{}]", template.params.join(", ")));
    }
    if !template.optional_params.is_empty() {
        line.push_str(&format!(" [{}?]", template.optional_params.join("?, ")));
    }
    if !template.options.is_empty() {
        line.push_str(&format!(" {}", template.options.join("|")));
    }
    lines.push(line);

    for child in template.children() {
        push_lines(templates, *child, depth + 1, lines);
    }
}
