use anyhow::Context;
use colored::Colorize;
use specsplit_sdk::{
    merge, split_file, CodecConfig, EntityKind, MergeOptions, PartialView, SplitOptions,
};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Split(args) => cmd_split(args),
        Command::Merge(args) => cmd_merge(args),
        Command::List(args) => cmd_list(args),
        Command::Show(args) => cmd_show(args),
    }
}

fn cmd_split(args: SplitArgs) -> anyhow::Result<()> {
    let options = SplitOptions {
        codec: CodecConfig {
            compact: args.compact,
            ..CodecConfig::with_format(args.format.into())
        },
        split_sections: args.split_sections,
    };
    debug!(?options, "splitting");
    let summary = split_file(&args.source, &args.dest, options)
        .with_context(|| format!("split {}", args.source))?;

    println!("{} Split {} into {}", "✓".green().bold(), args.source.bold(), args.dest.bold());
    println!("  Resources: {}", summary.resources.to_string().cyan());
    println!("  Functions: {}", summary.functions.to_string().cyan());
    println!("  Types:     {}", summary.types.to_string().cyan());
    if summary.sidecars > 0 {
        println!("  Sidecars:  {}", summary.sidecars.to_string().dimmed());
    }
    Ok(())
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let options = MergeOptions {
        format: args.format.into(),
        compact: args.compact,
    };
    let doc = merge(&args.source, &args.dest, &options)
        .with_context(|| format!("merge {}", args.source))?;

    println!("{} Merged {} into {}", "✓".green().bold(), args.source.bold(), args.dest.bold());
    for kind in EntityKind::ALL {
        println!("  {}: {}", kind, doc.entity_count(kind).to_string().cyan());
    }
    Ok(())
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let kind: EntityKind = args.kind.into();
    let view = PartialView::open_with_format(&args.source, args.format.into());
    let table = view.tokens(kind).with_context(|| format!("list {kind}"))?;
    for (token, path) in table.iter() {
        println!("{}  {}", token.yellow(), path.dimmed());
    }
    Ok(())
}

fn cmd_show(args: ShowArgs) -> anyhow::Result<()> {
    let view = PartialView::open_with_format(&args.source, args.format.into());
    let value = match EntityKind::from(args.kind) {
        EntityKind::Resource => view.resource(&args.token)?.map(|e| serde_json::to_value(&*e)),
        EntityKind::Function => view.function(&args.token)?.map(|e| serde_json::to_value(&*e)),
        EntityKind::Type => view.complex_type(&args.token)?.map(|e| serde_json::to_value(&*e)),
    };
    match value.transpose()? {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => anyhow::bail!("{} not found: {}", EntityKind::from(args.kind), args.token),
    }
    Ok(())
}
