use std::path::Path;

use anyhow::Context as _;

use crate::cli::CheckArgs;
use crate::config::{CollectionConfig, SiteConfig};
use crate::fetch::DataSource;
use crate::formats::{BlogRecord, ProjectRecord};
use crate::validate::{Record, Validated, validate};

/// Validates both collection files and reports what a page would drop.
pub async fn run(args: CheckArgs) -> anyhow::Result<()> {
    let config = SiteConfig::load(args.config.as_deref().map(Path::new)).context("load config")?;
    let source = crate::fetch::source_for(&args.site);

    let blogs = check::<BlogRecord>(source.as_ref(), &config.blogs)
        .await
        .context("check blogs")?;
    print!("{}", report(&blogs, &config.blogs));

    let projects = check::<ProjectRecord>(source.as_ref(), &config.projects)
        .await
        .context("check projects")?;
    print!("{}", report(&projects, &config.projects));

    Ok(())
}

async fn check<R: Record>(
    source: &dyn DataSource,
    collection: &CollectionConfig,
) -> anyhow::Result<Validated<R>> {
    let value = source.fetch_json(&collection.data_path).await?;
    Ok(validate::<R>(&value)?)
}

pub fn report<R: Record>(validated: &Validated<R>, collection: &CollectionConfig) -> String {
    let mut out = format!(
        "{} ({}): {} accepted, {} rejected\n",
        R::KIND.label(),
        collection.data_path,
        validated.records.len(),
        validated.rejected.len()
    );
    for rejection in &validated.rejected {
        out.push_str(&format!("  #{}: {}\n", rejection.index, rejection.reason));
    }
    let unlinkable = validated.records.iter().filter(|r| r.slug().is_none()).count();
    if unlinkable > 0 {
        out.push_str(&format!("  {unlinkable} without slug (no card)\n"));
    }
    out
}
