use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::cli::BuildArgs;
use crate::config::{CollectionConfig, SiteConfig};
use crate::fetch::DataSource;
use crate::formats::{BlogRecord, ProjectRecord};
use crate::render::Render;

/// Mounts both list pages into their shells and writes them to `args.out`.
pub async fn run(args: BuildArgs) -> anyhow::Result<()> {
    let config = SiteConfig::load(args.config.as_deref().map(Path::new)).context("load config")?;
    let pages_dir = PathBuf::from(&args.pages);
    let out_dir = PathBuf::from(&args.out);
    if out_dir.exists() {
        anyhow::bail!("build output directory already exists: {}", out_dir.display());
    }
    let blogs_shell = read_shell(&pages_dir, &config.blogs)?;
    let projects_shell = read_shell(&pages_dir, &config.projects)?;
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create build output dir: {}", out_dir.display()))?;

    let source = crate::fetch::source_for(&args.site);
    tracing::info!(site = %source.describe(), out = %out_dir.display(), "build: start");

    tracing::info!("build: blogs");
    build_list::<BlogRecord>(source.as_ref(), &config.blogs, &blogs_shell, &out_dir)
        .await
        .context("blogs")?;

    tracing::info!("build: projects");
    build_list::<ProjectRecord>(source.as_ref(), &config.projects, &projects_shell, &out_dir)
        .await
        .context("projects")?;

    Ok(())
}

fn read_shell(pages_dir: &Path, collection: &CollectionConfig) -> anyhow::Result<String> {
    let shell_path = pages_dir.join(&collection.list_page);
    std::fs::read_to_string(&shell_path)
        .with_context(|| format!("read shell page: {}", shell_path.display()))
}

async fn build_list<R: Render>(
    source: &dyn DataSource,
    collection: &CollectionConfig,
    shell: &str,
    out_dir: &Path,
) -> anyhow::Result<()> {
    let Some(html) = crate::view::list_page::<R>(source, collection, Some(shell)).await else {
        return Ok(());
    };

    let out_path = out_dir.join(&collection.list_page);
    crate::view::write_output(Some(&out_path), &html)
}
