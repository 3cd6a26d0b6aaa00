use url::Url;

use crate::error::LookupError;
use crate::validate::Record;

/// The `slug` query parameter of a detail page, if present and non-empty.
pub fn slug_from_page_url(page_url: &Url) -> Option<String> {
    page_url
        .query_pairs()
        .find(|(key, _)| key == "slug")
        .map(|(_, value)| value.into_owned())
        .filter(|slug| !slug.is_empty())
}

/// Finds the record the page URL points at by exact slug match.
pub fn resolve<'a, R: Record>(records: &'a [R], page_url: &Url) -> Result<&'a R, LookupError> {
    let slug = slug_from_page_url(page_url).ok_or(LookupError::NotSpecified)?;
    records
        .iter()
        .find(|record| record.slug() == Some(slug.as_str()))
        .ok_or(LookupError::NotFound { slug })
}

/// Parses a page URL as given on the command line. Relative forms such as
/// `blog-detail.html?slug=x` are resolved against a placeholder origin since
/// only the query matters.
pub fn parse_page_url(raw: &str) -> Result<Url, url::ParseError> {
    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("http://localhost/")?.join(raw)
        }
        Err(err) => Err(err),
    }
}
