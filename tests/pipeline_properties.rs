use portfolio::detail::parse_page_url;
use portfolio::error::{LookupError, PipelineError};
use portfolio::fetch::{DataSource, DirSource};
use portfolio::formats::{BlogRecord, ProjectRecord};
use portfolio::page::{PageState, detail_state, list_state, load_list};
use portfolio::validate::validate;
use serde_json::json;

fn titles(records: &[BlogRecord]) -> Vec<&str> {
    records.iter().map(|r| r.title.as_str()).collect()
}

#[test]
fn validated_output_is_an_ordered_subset_of_the_input() {
    let input = json!([
        {"title": "one", "date": "2024-03-01", "summary": "s"},
        {"title": "two", "date": "", "summary": "s"},
        {"title": "three", "date": "2022-01-01", "summary": "s"},
        {"title": 4, "date": "2024-03-01", "summary": "s"},
        {"title": "five", "date": "2030-01-01", "summary": "s"},
    ]);
    let out = validate::<BlogRecord>(&input).unwrap();
    assert_eq!(titles(&out.records), vec!["one", "three", "five"]);
    assert_eq!(out.total(), 5);
}

#[test]
fn unparsable_dates_are_excluded_whatever_else_is_right() {
    for date in ["31/12/2024", "yesterday", "2024-00-10", "2024-06-01T25:00:00"] {
        let input = json!([{
            "slug": "s", "title": "t", "date": date, "summary": "s",
            "category": "c", "mediaType": "image", "mediaPath": "m.png", "content": "<p/>"
        }]);
        let out = validate::<BlogRecord>(&input).unwrap();
        assert!(out.records.is_empty(), "{date} should be rejected");
    }
}

#[test]
fn sorted_blog_list_is_stable_under_resorting() {
    let input = json!([
        {"title": "A", "date": "2024-01-01", "summary": "s"},
        {"title": "B", "date": "2024-06-01", "summary": "s"},
    ]);
    let PageState::Success(first) = list_state::<BlogRecord>(&input) else {
        panic!("expected success");
    };
    assert_eq!(titles(&first), vec!["B", "A"]);

    let mut again = first.clone();
    portfolio::sort::newest_first(&mut again);
    assert_eq!(again, first);
}

#[test]
fn empty_array_reaches_empty_content() {
    assert!(matches!(
        list_state::<BlogRecord>(&json!([])),
        PageState::EmptyContent
    ));
    assert!(matches!(
        list_state::<ProjectRecord>(&json!([])),
        PageState::EmptyContent
    ));
}

#[tokio::test]
async fn malformed_body_reaches_parse_error_not_empty_content() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    std::fs::create_dir_all(temp.path().join("data"))?;
    std::fs::write(temp.path().join("data/blogs.json"), "[{\"title\": ")?;
    let source = DirSource::new(temp.path());

    let err = source.fetch_json("data/blogs.json").await.unwrap_err();
    assert!(err.is_parse());

    let state = load_list::<BlogRecord>(&source, &portfolio::config::CollectionConfig::blogs()).await;
    match state {
        PageState::Unavailable(PipelineError::Parse { .. }) => {}
        other => panic!("unexpected state: {}", other.name()),
    }
    Ok(())
}

#[test]
fn unknown_slug_reaches_not_found() {
    let projects = json!([
        {"slug": "a", "title": "A", "description": "d", "tools": [], "github": "g"},
        {"slug": "b", "title": "B", "description": "d", "tools": ["SQL"], "github": "g"},
    ]);
    let page_url = parse_page_url("project-detail.html?slug=does-not-exist").unwrap();
    match detail_state::<ProjectRecord>(&projects, &page_url) {
        PageState::NotFound(LookupError::NotFound { slug }) => assert_eq!(slug, "does-not-exist"),
        other => panic!("unexpected state: {}", other.name()),
    }
}
