use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use url::Url;

use crate::error::PipelineError;

/// Somewhere collection files can be read from, addressed by the same
/// relative paths the site uses (`data/blogs.json`).
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Retrieves and decodes the JSON document at `path`. The shape of the
    /// value is not checked here.
    async fn fetch_json(&self, path: &str) -> Result<Value, PipelineError>;

    fn describe(&self) -> String;
}

/// Reads collection files from a served site over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, mut base_url: Url) -> Self {
        // Relative joins drop the last segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    pub fn resolve(&self, path: &str) -> Result<Url, PipelineError> {
        self.base_url
            .join(path)
            .map_err(|err| PipelineError::Transport {
                path: path.to_owned(),
                message: format!("invalid data path: {err}"),
            })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch_json(&self, path: &str) -> Result<Value, PipelineError> {
        let url = self.resolve(path)?;
        tracing::debug!(%url, "GET collection");

        let transport = |err: reqwest::Error| PipelineError::Transport {
            path: path.to_owned(),
            message: err.to_string(),
        };
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, concat!("portfolio/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PipelineError::Status {
                path: path.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(transport)?;
        decode(path, &body)
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}

/// Reads collection files from a site checked out on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DataSource for DirSource {
    async fn fetch_json(&self, path: &str) -> Result<Value, PipelineError> {
        let file = self.root.join(path.trim_start_matches('/'));
        tracing::debug!(path = %file.display(), "read collection");

        let body = tokio::fs::read(&file)
            .await
            .map_err(|err| PipelineError::Transport {
                path: path.to_owned(),
                message: format!("{}: {err}", file.display()),
            })?;
        decode(path, &body)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Picks an HTTP source for http(s) URLs and a directory source otherwise.
pub fn source_for(site: &str) -> Box<dyn DataSource> {
    match Url::parse(site) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            Box::new(HttpSource::new(url))
        }
        _ => Box::new(DirSource::new(site)),
    }
}

fn decode(path: &str, body: &[u8]) -> Result<Value, PipelineError> {
    serde_json::from_slice(body).map_err(|source| PipelineError::Parse {
        path: path.to_owned(),
        source,
    })
}
