use serde_json::Value;
use url::Url;

use crate::config::CollectionConfig;
use crate::error::{LookupError, PipelineError};
use crate::fetch::DataSource;
use crate::validate::{Record, validate};

/// Where a page ends up after its single load attempt.
#[derive(Debug)]
pub enum PageState<T> {
    Loading,
    Success(T),
    /// Fetch, decode or shape failure of the collection file.
    Unavailable(PipelineError),
    EmptyContent,
    NotFound(LookupError),
}

impl<T> PageState<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Unavailable(_) => "unavailable",
            Self::EmptyContent => "empty",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl<T> From<Result<T, PipelineError>> for PageState<T> {
    fn from(result: Result<T, PipelineError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(PipelineError::Empty { .. }) => Self::EmptyContent,
            Err(PipelineError::Lookup(err)) => Self::NotFound(err),
            Err(err) => Self::Unavailable(err),
        }
    }
}

/// Validates a decoded collection and puts it in display order. A collection
/// with nothing usable left is `PipelineError::Empty`.
pub fn collect<R: Record>(value: &Value) -> Result<Vec<R>, PipelineError> {
    let validated = validate::<R>(value)?;
    if validated.records.is_empty() {
        return Err(PipelineError::Empty {
            rejected: validated.rejected.len(),
        });
    }

    let mut records = validated.records;
    R::arrange(&mut records);
    Ok(records)
}

/// Picks the record a detail page asks for out of a decoded collection.
pub fn pick<R: Record>(value: &Value, page_url: &Url) -> Result<R, PipelineError> {
    let validated = validate::<R>(value)?;
    let found = crate::detail::resolve(&validated.records, page_url)?;
    Ok(found.clone())
}

pub fn list_state<R: Record>(value: &Value) -> PageState<Vec<R>> {
    PageState::from(collect::<R>(value))
}

pub fn detail_state<R: Record>(value: &Value, page_url: &Url) -> PageState<R> {
    PageState::from(pick::<R>(value, page_url))
}

pub async fn load_list<R: Record>(
    source: &dyn DataSource,
    collection: &CollectionConfig,
) -> PageState<Vec<R>> {
    let state = match source.fetch_json(&collection.data_path).await {
        Ok(value) => list_state::<R>(&value),
        Err(err) => PageState::Unavailable(err),
    };
    log_outcome(R::KIND.label(), &collection.data_path, &state);
    state
}

pub async fn load_detail<R: Record>(
    source: &dyn DataSource,
    collection: &CollectionConfig,
    page_url: &Url,
) -> PageState<R> {
    // Without a slug there is nothing to look up, so skip the fetch.
    if crate::detail::slug_from_page_url(page_url).is_none() {
        let state = PageState::NotFound(LookupError::NotSpecified);
        log_outcome(R::KIND.label(), &collection.data_path, &state);
        return state;
    }

    let state = match source.fetch_json(&collection.data_path).await {
        Ok(value) => detail_state::<R>(&value, page_url),
        Err(err) => PageState::Unavailable(err),
    };
    log_outcome(R::KIND.label(), &collection.data_path, &state);
    state
}

fn log_outcome<T>(kind: &str, path: &str, state: &PageState<T>) {
    match state {
        PageState::Unavailable(err) => {
            tracing::error!(kind, path, error = %err, "failed to load collection");
        }
        PageState::NotFound(err) => tracing::info!(kind, path, reason = %err, "record not found"),
        other => tracing::debug!(kind, path, state = other.name(), "page loaded"),
    }
}
