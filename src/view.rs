use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;
use url::Url;

use crate::cli::{DetailArgs, ListArgs};
use crate::config::{CollectionConfig, SiteConfig};
use crate::fetch::DataSource;
use crate::formats::{BlogRecord, ProjectRecord, RecordKind};
use crate::render::Render;

pub async fn list(args: ListArgs) -> anyhow::Result<()> {
    let config = SiteConfig::load(args.config.as_deref().map(Path::new)).context("load config")?;
    let shell = read_shell(args.shell.as_deref())?;
    let source = crate::fetch::source_for(&args.site);
    let collection = config.collection(args.kind);

    let html = match args.kind {
        RecordKind::Blog => {
            list_page::<BlogRecord>(source.as_ref(), collection, shell.as_deref()).await
        }
        RecordKind::Project => {
            list_page::<ProjectRecord>(source.as_ref(), collection, shell.as_deref()).await
        }
    };

    match html {
        Some(html) => write_output(args.out.as_deref().map(Path::new), &html),
        None => Ok(()),
    }
}

pub async fn detail(args: DetailArgs) -> anyhow::Result<()> {
    let config = SiteConfig::load(args.config.as_deref().map(Path::new)).context("load config")?;
    let page_url = crate::detail::parse_page_url(&args.page_url).context("parse --page-url")?;
    let shell = read_shell(args.shell.as_deref())?;
    let source = crate::fetch::source_for(&args.site);

    let html = match args.kind {
        RecordKind::Blog => {
            detail_page::<BlogRecord>(source.as_ref(), &config, &page_url, shell.as_deref()).await
        }
        RecordKind::Project => {
            detail_page::<ProjectRecord>(source.as_ref(), &config, &page_url, shell.as_deref())
                .await
        }
    };

    match html {
        Some(html) => write_output(args.out.as_deref().map(Path::new), &html),
        None => Ok(()),
    }
}

/// Renders a list page. With a shell, the result is the whole document with
/// the cards mounted; `None` means the shell has no container and nothing
/// was fetched.
pub async fn list_page<R: Render>(
    source: &dyn DataSource,
    collection: &CollectionConfig,
    shell: Option<&str>,
) -> Option<String> {
    if !has_container(shell, &collection.container_id) {
        return None;
    }

    let state = crate::page::load_list::<R>(source, collection).await;
    let fragment = crate::render::render_list(&state, collection);
    match shell {
        Some(shell) => crate::mount::mount(shell, &collection.container_id, &fragment),
        None => Some(fragment),
    }
}

/// Renders a detail page, retitling the shell after the record it shows.
pub async fn detail_page<R: Render>(
    source: &dyn DataSource,
    config: &SiteConfig,
    page_url: &Url,
    shell: Option<&str>,
) -> Option<String> {
    let collection = config.collection(R::KIND);
    if !has_container(shell, &collection.detail_container_id) {
        return None;
    }

    let state = crate::page::load_detail::<R>(source, collection, page_url).await;
    let fragment = crate::render::render_detail(&state, collection);
    let Some(shell) = shell else {
        return Some(fragment);
    };

    let mounted = crate::mount::mount(shell, &collection.detail_container_id, &fragment)?;
    Some(match crate::render::detail_title(&state, &config.site_name) {
        Some(title) => crate::mount::set_title(&mounted, &title),
        None => mounted,
    })
}

fn has_container(shell: Option<&str>, id: &str) -> bool {
    let Some(shell) = shell else {
        return true;
    };
    if crate::mount::find_container(shell, id).is_some() {
        return true;
    }
    tracing::warn!(container = id, "container element not found; skipping page");
    false
}

fn read_shell(path: Option<&str>) -> anyhow::Result<Option<String>> {
    path.map(|path| {
        std::fs::read_to_string(path).with_context(|| format!("read shell page: {path}"))
    })
    .transpose()
}

pub(crate) fn write_output(out: Option<&Path>, html: &str) -> anyhow::Result<()> {
    let Some(out_path) = out else {
        print!("{html}");
        return Ok(());
    };

    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir: {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(out_path)
        .with_context(|| format!("create output: {}", out_path.display()))?;
    file.write_all(html.as_bytes())
        .with_context(|| format!("write output: {}", out_path.display()))?;
    tracing::info!(out = %out_path.display(), "wrote page");

    Ok(())
}
