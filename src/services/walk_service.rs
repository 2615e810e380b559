// Walk service - turns textual navigation steps into node traversals
//
// Step syntax:
//   users                    follow a relation (or a top-level name at the root)
//   user(dojo, format=json)  follow a relation, then supply arguments
//   [dojo, format=json]      anonymous child, e.g. an item of a collection
//   (format=json)            supply arguments to the current node
//
// Arguments are `value`, `key=value`, or a mapping `{key=value; key2=value2}`.
// Values may be double-quoted to include separators.

use anyhow::{bail, Result};
use tracing::debug;

use crate::{
    domain::{Args, Node, Params},
    error::PathError,
};

/// One navigation step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Relation { name: String, args: Option<Args> },
    Item(Args),
    Params(Args),
}

/// Service for walking a catalog from its root
pub struct WalkService {
    root: Node,
}

impl WalkService {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Parse a single step
    pub fn parse_step(input: &str) -> Result<Step> {
        let input = input.trim();
        if input.is_empty() {
            bail!("Empty navigation step");
        }

        if let Some(inner) = strip_delimiters(input, '[', ']') {
            return Ok(Step::Item(Self::parse_args(inner)?));
        }
        if let Some(inner) = strip_delimiters(input, '(', ')') {
            return Ok(Step::Params(Self::parse_args(inner)?));
        }

        let (name, rest) = match input.find('(') {
            Some(open) => (&input[..open], Some(&input[open..])),
            None => (input, None),
        };
        if !is_valid_relation_name(name) {
            bail!("Invalid relation name '{}'", name);
        }

        let args = match rest {
            Some(rest) => match strip_delimiters(rest, '(', ')') {
                Some(inner) => Some(Self::parse_args(inner)?),
                None => bail!("Unbalanced parentheses in step '{}'", input),
            },
            None => None,
        };

        Ok(Step::Relation {
            name: name.to_string(),
            args,
        })
    }

    pub fn parse_steps<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Step>> {
        inputs.iter().map(|s| Self::parse_step(s.as_ref())).collect()
    }

    /// Parse a comma separated argument list
    pub fn parse_args(input: &str) -> Result<Args> {
        let mut args = Args::new();
        for item in split_top_level(input, ',')? {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            if let Some(inner) = strip_delimiters(item, '{', '}') {
                args = args.params(Self::parse_mapping(inner)?);
            } else if let Some((key, value)) = split_key_value(item) {
                args = args.kw(key, unquote(value)?);
            } else {
                args = args.arg(unquote(item)?);
            }
        }
        Ok(args)
    }

    fn parse_mapping(input: &str) -> Result<Params> {
        let mut mapping = Params::new();
        for pair in split_top_level(input, ';')? {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            match split_key_value(pair) {
                Some((key, value)) => {
                    mapping.insert(key.to_string(), unquote(value)?);
                }
                None => bail!("Invalid mapping entry '{}': expected 'key=value'", pair),
            }
        }
        Ok(mapping)
    }

    /// Apply steps in order, starting at the root
    pub fn walk(&self, steps: &[Step]) -> Result<Node, PathError> {
        let mut node = self.root.clone();
        for step in steps {
            debug!(?step, "walking step");
            node = match step {
                Step::Relation { name, args: None } => node.relation(name)?.into_node()?,
                Step::Relation {
                    name,
                    args: Some(args),
                } => node.relation(name)?.call(args)?,
                Step::Item(args) => node.item(args)?,
                Step::Params(args) => node.with_params(args),
            };
        }
        Ok(node)
    }
}

fn strip_delimiters(input: &str, open: char, close: char) -> Option<&str> {
    input.strip_prefix(open)?.strip_suffix(close)
}

fn is_valid_relation_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

fn split_key_value(item: &str) -> Option<(&str, &str)> {
    if item.starts_with('"') {
        return None;
    }
    let (key, value) = item.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    Some((key, value.trim()))
}

fn unquote(value: &str) -> Result<String> {
    let Some(body) = value.strip_prefix('"') else {
        return Ok(value.to_string());
    };

    let mut result = String::new();
    let mut escaped = false;
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if escaped {
            result.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            if chars.next().is_some() {
                bail!("Unexpected characters after closing quote in {}", value);
            }
            return Ok(result);
        } else {
            result.push(ch);
        }
    }
    bail!("Unterminated quoted value: {}", value)
}

// Split on `separator` outside of quotes and braces
fn split_top_level(input: &str, separator: char) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, ch) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '{' if !in_quotes => depth += 1,
            '}' if !in_quotes => {
                if depth == 0 {
                    bail!("Unexpected closing brace in '{}'", input);
                }
                depth -= 1;
            }
            c if c == separator && !in_quotes && depth == 0 => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if in_quotes {
        bail!("Unterminated quoted value in '{}'", input);
    }
    if depth != 0 {
        bail!("Unclosed brace in '{}'", input);
    }
    parts.push(&input[start..]);
    Ok(parts)
}
