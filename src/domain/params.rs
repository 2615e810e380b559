// Navigation arguments and the parameter merge rules

use std::collections::BTreeMap;

/// Parameter name to value
pub type Params = BTreeMap<String, String>;

/// A single positional argument: a bare value or a whole mapping of params
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Value(String),
    Params(Params),
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Value(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Value(value)
    }
}

impl From<Params> for Arg {
    fn from(params: Params) -> Self {
        Arg::Params(params)
    }
}

/// Positional and keyword arguments for one navigation or currying call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    positional: Vec<Arg>,
    keywords: Params,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.positional.push(arg.into());
        self
    }

    /// Append a positional mapping argument
    pub fn params<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mapping = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.positional.push(Arg::Params(mapping));
        self
    }

    /// Set a keyword argument
    pub fn kw(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.keywords.insert(name.into(), value.into());
        self
    }

    pub fn positional(&self) -> &[Arg] {
        &self.positional
    }

    pub fn keywords(&self) -> &Params {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }
}

/// Merge `args` on top of `existing`, lowest precedence first:
///
/// 1. the already-bound params;
/// 2. the trailing run of mapping arguments, popped from the end, so the
///    earliest mapping of that run is applied last and wins;
/// 3. the remaining leading values, bound to `positional_names` in order
///    (dropped when there are no names to bind against);
/// 4. keyword arguments.
///
/// A mapping found among the leading arguments is merged where it stands,
/// whether or not there are names to bind, and does not consume a name.
pub fn merge_params(
    existing: &Params,
    positional_names: Option<&[&str]>,
    args: &Args,
) -> Params {
    let mut merged = existing.clone();

    let mut leading: &[Arg] = &args.positional;
    while let Some((Arg::Params(mapping), rest)) = leading.split_last() {
        extend(&mut merged, mapping);
        leading = rest;
    }

    let mut names = positional_names.unwrap_or_default().iter();
    for arg in leading {
        match arg {
            Arg::Params(mapping) => extend(&mut merged, mapping),
            Arg::Value(value) => {
                if let Some(name) = names.next() {
                    merged.insert(name.to_string(), value.clone());
                }
            }
        }
    }

    extend(&mut merged, &args.keywords);
    merged
}

fn extend(target: &mut Params, source: &Params) {
    target.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
}
