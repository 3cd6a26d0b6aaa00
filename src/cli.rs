use clap::{Args, Parser, Subcommand};

use crate::formats::RecordKind;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    List(ListArgs),
    Detail(DetailArgs),
    Build(BuildArgs),
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Collection to render.
    #[arg(long, value_enum)]
    pub kind: RecordKind,

    /// Site root: an http/https base URL or a local directory.
    #[arg(long)]
    pub site: String,

    /// HTML page to mount the list into (default: print the bare fragment).
    #[arg(long)]
    pub shell: Option<String>,

    /// Output file (default: stdout).
    #[arg(long)]
    pub out: Option<String>,

    /// YAML site config.
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Debug, Args)]
pub struct DetailArgs {
    /// Collection to render.
    #[arg(long, value_enum)]
    pub kind: RecordKind,

    /// Site root: an http/https base URL or a local directory.
    #[arg(long)]
    pub site: String,

    /// Detail page URL carrying the `slug` query parameter
    /// (e.g. `blog-detail.html?slug=my-post`).
    #[arg(long)]
    pub page_url: String,

    /// HTML page to mount the article into (default: print the bare fragment).
    #[arg(long)]
    pub shell: Option<String>,

    /// Output file (default: stdout).
    #[arg(long)]
    pub out: Option<String>,

    /// YAML site config.
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Site root: an http/https base URL or a local directory.
    #[arg(long)]
    pub site: String,

    /// Directory holding the list page shells (`blogs.html`, `projects.html`).
    #[arg(long)]
    pub pages: String,

    /// Output directory for rendered pages.
    #[arg(long)]
    pub out: String,

    /// YAML site config.
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Site root: an http/https base URL or a local directory.
    #[arg(long)]
    pub site: String,

    /// YAML site config.
    #[arg(long)]
    pub config: Option<String>,
}
