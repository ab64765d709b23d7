use anyhow::Context;
use serde::Serialize;
use sv_schema::SchemaRegistry;

use crate::cli::root_commands::SchemaArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

#[derive(Debug, Serialize)]
struct SchemaListResponse {
    schemas: Vec<&'static str>,
}

/// Handle `sv schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();

    let Some(name) = args.name.as_deref().filter(|_| !args.list) else {
        return output(
            &SchemaListResponse {
                schemas: registry.list(),
            },
            flags.format,
        );
    };

    let schema = registry
        .get(name)
        .with_context(|| format!("unknown schema '{name}' (see `sv schema --list`)"))?;

    // A schema is a JSON document; tables would flatten it beyond use.
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        _ => OutputFormat::Json,
    };
    output(schema, format)
}
