//! Command handlers. Each returns the text to print on stdout.

use anyhow::{Context, Result};
use dskit::engine::{DirectiveExpander, Invocation, Renderer};
use std::io::Read;
use std::path::Path;

pub(crate) fn list(renderer: &Renderer) -> String {
    let header = format!("{:<14} {}\n{:-<60}\n", "Tag", "Description", "");
    let rows = renderer.registry.iter().map(|(tag, definition)| {
        let description = definition.description.as_deref().unwrap_or("-");
        format!("{tag:<14} {description}\n")
    });
    std::iter::once(header).chain(rows).collect()
}

pub(crate) fn describe(renderer: &Renderer, tag: &str) -> Result<String> {
    let definition = renderer.registry.resolve(tag)?;

    let title = match &definition.description {
        Some(description) => format!("<{tag}> {description}"),
        None => format!("<{tag}>"),
    };
    let header =
        format!("{title}\n\n{:<18} {:<40} {}\n{:-<72}\n", "Property", "Type", "Default", "");
    let rows = definition.schema.iter().map(|spec| {
        let default = if spec.is_optional() { "-".to_owned() } else { spec.default().to_string() };
        format!("{:<18} {:<40} {default}\n", spec.name(), spec.ty().to_string())
    });
    Ok(std::iter::once(header).chain(rows).collect())
}

pub(crate) fn render(
    renderer: &Renderer,
    tag: &str,
    attrs: Vec<(String, String)>,
    slot: Option<String>,
    named: Vec<(String, String)>,
) -> Result<String> {
    let mut invocation = Invocation::new(tag);
    for (name, value) in attrs {
        invocation = invocation.attr(name, value);
    }
    if let Some(slot) = slot {
        invocation = invocation.content(slot);
    }
    for (name, html) in named {
        invocation = invocation.named_slot(name, html);
    }

    Ok(renderer.render(&invocation)?)
}

pub(crate) fn page(renderer: &Renderer, input: &Path) -> Result<String> {
    let source = read_input(input)?;
    renderer.render_markup(&source).with_context(|| format!("Failed to render {}", input.display()))
}

pub(crate) fn expand(expander: &DirectiveExpander, input: &Path) -> Result<String> {
    let source = read_input(input)?;
    expander.expand(&source).with_context(|| format!("Failed to expand {}", input.display()))
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source).context("Failed to read stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}
