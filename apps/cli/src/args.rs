//! # CLI Argument Definitions
//!
//! Subcommands, arguments and flags of the `dskit` binary.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dskit")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Render design-system components and pages to HTML")]
pub(crate) struct Cli {
    /// Configuration file (TOML, JSON or YAML); `./dskit.*` is used when present
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// List registered components
    List,
    /// Show the properties of a component
    Describe {
        /// Component tag (e.g. 'ds-button')
        tag: String,
    },
    /// Render a single component
    Render {
        /// Component tag (e.g. 'ds-button')
        tag: String,
        /// Attribute or property as NAME=VALUE (a bare NAME is a flag)
        #[arg(short, long = "attr", value_name = "NAME=VALUE", value_parser = parse_key_value)]
        attrs: Vec<(String, String)>,
        /// Default slot content
        #[arg(short, long)]
        slot: Option<String>,
        /// Named slot content as NAME=HTML
        #[arg(short, long = "named-slot", value_name = "NAME=HTML", value_parser = parse_key_value)]
        named: Vec<(String, String)>,
    },
    /// Render every component tag in a page ('-' reads stdin)
    Page {
        /// Page file
        input: PathBuf,
    },
    /// Expand template directives ('-' reads stdin)
    Expand {
        /// Template file
        input: PathBuf,
    },
}

impl Commands {
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Describe { .. } => "describe",
            Self::Render { .. } => "render",
            Self::Page { .. } => "page",
            Self::Expand { .. } => "expand",
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw.split_once('=').unwrap_or((raw, ""));
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{raw}'"));
    }
    Ok((name.to_owned(), value.to_owned()))
}
