use clap::{Args, Parser, Subcommand, ValueEnum};
use specsplit_sdk::{EntityKind, Format};

#[derive(Parser)]
#[command(
    name = "specsplit",
    about = "Split specification documents into per-entity files and merge them back",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Split a document into a directory tree
    Split(SplitArgs),
    /// Merge a split tree into a single JSON document
    Merge(MergeArgs),
    /// List the tokens of one entity kind
    List(ListArgs),
    /// Print one entity
    Show(ShowArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Format::Json,
            FormatArg::Yaml => Format::Yaml,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    Resource,
    Function,
    Type,
}

impl From<KindArg> for EntityKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Resource => EntityKind::Resource,
            KindArg::Function => EntityKind::Function,
            KindArg::Type => EntityKind::Type,
        }
    }
}

#[derive(Args)]
pub struct SplitArgs {
    /// Document to split (JSON, or YAML by extension)
    #[arg(short, long, default_value = "schema.json")]
    pub source: String,
    /// Directory to write the split tree into
    #[arg(short, long, default_value = ".")]
    pub dest: String,
    /// Format of the written tree
    #[arg(long, value_enum, default_value = "json")]
    pub format: FormatArg,
    /// Write JSON files without whitespace
    #[arg(long)]
    pub compact: bool,
    /// Write language, config and provider sections to their own files
    #[arg(long)]
    pub split_sections: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Directory containing the split tree
    #[arg(short, long, default_value = ".")]
    pub source: String,
    /// File to write the merged document to
    #[arg(short, long, default_value = "schema.json")]
    pub dest: String,
    /// Format of the split tree
    #[arg(long, value_enum, default_value = "json")]
    pub format: FormatArg,
    /// Write the merged document without whitespace
    #[arg(short, long)]
    pub compact: bool,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub kind: KindArg,
    #[arg(short, long, default_value = ".")]
    pub source: String,
    #[arg(long, value_enum, default_value = "json")]
    pub format: FormatArg,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(value_enum)]
    pub kind: KindArg,
    pub token: String,
    #[arg(short, long, default_value = ".")]
    pub source: String,
    #[arg(long, value_enum, default_value = "json")]
    pub format: FormatArg,
}
