use thiserror::Error;

/// Failures of the data stage of a page: fetching, decoding and validating a
/// collection file.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("fetch {path} failed with HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("fetch {path} failed: {message}")]
    Transport { path: String, message: String },
    #[error("parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid data format: expected a JSON array, got {found}")]
    Format { found: &'static str },
    #[error("no valid records ({rejected} rejected)")]
    Empty { rejected: usize },
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl PipelineError {
    /// HTTP status carried by a fetch failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Transport { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Why a detail page could not resolve its record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no slug given in page url")]
    NotSpecified,
    #[error("no record with slug {slug:?}")]
    NotFound { slug: String },
}

/// A single record could not be turned into markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("record {title:?} has no slug to link to")]
    MissingSlug { title: String },
}
