pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod validation;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches};

use config::catalog::load_application;
use services::{listing_service::catalog_lines, walk_service::WalkService};

pub use domain::{Application, Args, Deferred, Node, Resolution};
pub use error::PathError;

const DEFAULT_BASE: &str = "http://localhost";

// Command-line definition for the pathto binary
pub fn cli_command() -> clap::Command {
    clap::Command::new("pathto")
        .about("Resolve addresses by walking a catalog of resource templates")
        .arg(
            Arg::new("catalog")
                .short('c')
                .long("catalog")
                .value_name("CATALOG")
                .help("Path to a YAML or JSON file describing the resource templates"),
        )
        .arg(
            Arg::new("base")
                .short('b')
                .long("base")
                .value_name("BASE")
                .help("Base address for templates without a URI template")
                .default_value(DEFAULT_BASE),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .action(ArgAction::SetTrue)
                .help("Print the catalog tree instead of resolving a walk"),
        )
        .arg(
            Arg::new("steps")
                .value_name("STEP")
                .num_args(0..)
                .help("Navigation steps, e.g. users '[dojo]' articles '[foo, format=json]'"),
        )
}

/// Execute parsed arguments and return the text to print
pub fn run(matches: &ArgMatches) -> Result<String> {
    let catalog_path = matches.get_one::<String>("catalog").map(|c| c.as_str());
    let base = matches
        .get_one::<String>("base")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_BASE);

    validation::validate_base_address(base)?;
    let app = load_application(catalog_path, base).context("Failed to load catalog")?;

    if matches.get_flag("list") {
        return Ok(catalog_lines(app.templates()).join("\n"));
    }

    let inputs: Vec<&String> = matches
        .get_many::<String>("steps")
        .map(|steps| steps.collect())
        .unwrap_or_default();
    let steps = WalkService::parse_steps(&inputs)?;

    let node = WalkService::new(app.into_root()).walk(&steps)?;
    Ok(node.address()?.to_string())
}
