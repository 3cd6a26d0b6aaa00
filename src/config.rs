use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

use crate::formats::RecordKind;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "SiteConfigFile")]
pub struct SiteConfig {
    pub site_name: String,
    pub blogs: CollectionConfig,
    pub projects: CollectionConfig,
}

/// Where a collection's data lives and how its pages talk about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionConfig {
    pub data_path: String,
    pub list_page: String,
    pub detail_page: String,
    pub container_id: String,
    pub detail_container_id: String,
    pub loading_message: String,
    pub fallback_message: String,
    pub error_message: String,
    pub error_hint: String,
    pub not_found_title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Business Analyst".to_owned(),
            blogs: CollectionConfig::blogs(),
            projects: CollectionConfig::projects(),
        }
    }
}

/// On-disk shape: every key is optional and falls back to the defaults of
/// the collection it belongs to.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SiteConfigFile {
    site_name: Option<String>,
    blogs: Option<CollectionFile>,
    projects: Option<CollectionFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CollectionFile {
    data_path: Option<String>,
    list_page: Option<String>,
    detail_page: Option<String>,
    container_id: Option<String>,
    detail_container_id: Option<String>,
    loading_message: Option<String>,
    fallback_message: Option<String>,
    error_message: Option<String>,
    error_hint: Option<String>,
    not_found_title: Option<String>,
}

impl From<SiteConfigFile> for SiteConfig {
    fn from(file: SiteConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            site_name: file.site_name.unwrap_or(defaults.site_name),
            blogs: file.blogs.unwrap_or_default().over(defaults.blogs),
            projects: file.projects.unwrap_or_default().over(defaults.projects),
        }
    }
}

impl CollectionFile {
    fn over(self, base: CollectionConfig) -> CollectionConfig {
        CollectionConfig {
            data_path: self.data_path.unwrap_or(base.data_path),
            list_page: self.list_page.unwrap_or(base.list_page),
            detail_page: self.detail_page.unwrap_or(base.detail_page),
            container_id: self.container_id.unwrap_or(base.container_id),
            detail_container_id: self.detail_container_id.unwrap_or(base.detail_container_id),
            loading_message: self.loading_message.unwrap_or(base.loading_message),
            fallback_message: self.fallback_message.unwrap_or(base.fallback_message),
            error_message: self.error_message.unwrap_or(base.error_message),
            error_hint: self.error_hint.unwrap_or(base.error_hint),
            not_found_title: self.not_found_title.unwrap_or(base.not_found_title),
        }
    }
}

impl CollectionConfig {
    pub fn blogs() -> Self {
        Self {
            data_path: "data/blogs.json".to_owned(),
            list_page: "blogs.html".to_owned(),
            detail_page: "blog-detail.html".to_owned(),
            container_id: "blogsContainer".to_owned(),
            detail_container_id: "blogDetailContainer".to_owned(),
            loading_message: "Loading professional insights...".to_owned(),
            fallback_message: "Professional insights and articles are currently being prepared."
                .to_owned(),
            error_message: "Unable to load analytical articles at this time.".to_owned(),
            error_hint: "Analytical content will be available shortly.".to_owned(),
            not_found_title: "Blog article not found".to_owned(),
        }
    }

    pub fn projects() -> Self {
        Self {
            data_path: "data/projects.json".to_owned(),
            list_page: "projects.html".to_owned(),
            detail_page: "project-detail.html".to_owned(),
            container_id: "projectsContainer".to_owned(),
            detail_container_id: "projectDetailContainer".to_owned(),
            loading_message: "Loading analytical case studies...".to_owned(),
            fallback_message: "Analytical case studies are currently being prepared for review."
                .to_owned(),
            error_message: "Unable to load project details at this time.".to_owned(),
            error_hint: "Please try again later or contact for direct case examples.".to_owned(),
            not_found_title: "Project not found".to_owned(),
        }
    }
}

impl SiteConfig {
    pub fn collection(&self, kind: RecordKind) -> &CollectionConfig {
        match kind {
            RecordKind::Blog => &self.blogs,
            RecordKind::Project => &self.projects,
        }
    }

    /// Reads a YAML config file, or falls back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&yaml)
            .with_context(|| format!("parse config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
