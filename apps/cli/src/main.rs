#![allow(clippy::print_stdout)]

mod args;
mod handlers;

use crate::args::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use dskit::DesignSystemConfig;
use dskit::domain::config::LoggingConfig;
use dskit::engine::DirectiveExpander;
use dskit::kernel::config::load_config;
use dskit_logger::{LevelFilter, LogFormat, Logger};
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config: DesignSystemConfig = load_config(cli.config.as_deref())?;
    let _logger = init_logger(&config.logging, cli.verbose)?;
    info!(version = env!("CARGO_PKG_VERSION"), config = ?cli.config, "Starting dskit");

    let command = cli.command.name();
    let output = match cli.command {
        Commands::List => handlers::list(&dskit::boot(&config)?),
        Commands::Describe { tag } => handlers::describe(&dskit::boot(&config)?, &tag)?,
        Commands::Render { tag, attrs, slot, named } => {
            handlers::render(&dskit::boot(&config)?, &tag, attrs, slot, named)?
        },
        Commands::Page { input } => handlers::page(&dskit::boot(&config)?, &input)?,
        Commands::Expand { input } => {
            handlers::expand(&DirectiveExpander::from_config(&config.directives)?, &input)?
        },
    };
    debug!(command, bytes = output.len(), "Command finished");

    println!("{}", output.trim_end());
    Ok(())
}

fn init_logger(config: &LoggingConfig, verbose: u8) -> Result<Logger> {
    let level = match verbose {
        0 => config
            .level
            .parse::<LevelFilter>()
            .with_context(|| format!("Invalid log level '{}'", config.level))?,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let format = if config.json { LogFormat::Json } else { LogFormat::Compact };

    let mut builder =
        Logger::builder().name(env!("CARGO_PKG_NAME")).console(true).level(level).format(format);
    if let Some(filter) = &config.env_filter {
        builder = builder.env_filter(filter);
    }

    let logger = match &config.path {
        Some(path) => builder.path(path).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
