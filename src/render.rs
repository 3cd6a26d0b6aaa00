use crate::config::CollectionConfig;
use crate::error::RenderError;
use crate::formats::{BlogRecord, Media, MediaType, ProjectRecord};
use crate::page::PageState;
use crate::validate::Record;

/// Markup for one record type.
pub trait Render: Record {
    /// Label of the link back to the list page.
    const BACK_LABEL: &'static str;

    /// Card shown on the list page. Fails when the card cannot link to its
    /// detail page.
    fn card(&self, collection: &CollectionConfig) -> Result<String, RenderError>;

    /// Full article shown on the detail page.
    fn article(&self, collection: &CollectionConfig) -> String;
}

/// Renders every card that can be built, skipping the ones that fail.
pub fn cards<R: Render>(records: &[R], collection: &CollectionConfig) -> String {
    let mut out = String::new();
    for record in records {
        match record.card(collection) {
            Ok(card) => out.push_str(&card),
            Err(err) => tracing::warn!(kind = R::KIND.label(), error = %err, "skipping card"),
        }
    }
    out
}

pub fn render_list<R: Render>(state: &PageState<Vec<R>>, collection: &CollectionConfig) -> String {
    match state {
        PageState::Loading => loading_view(collection),
        PageState::Success(records) => {
            let out = cards(records, collection);
            if out.is_empty() {
                tracing::warn!(kind = R::KIND.label(), "no card could be built");
                return empty_view(collection);
            }
            out
        }
        PageState::EmptyContent => empty_view(collection),
        PageState::Unavailable(_) => error_view(collection),
        // Lists never look anything up.
        PageState::NotFound(_) => empty_view(collection),
    }
}

pub fn render_detail<R: Render>(state: &PageState<R>, collection: &CollectionConfig) -> String {
    match state {
        PageState::Loading => loading_view(collection),
        PageState::Success(record) => record.article(collection),
        PageState::Unavailable(_) => {
            status_view::<R>(&collection.error_message, Some(&collection.error_hint), collection)
        }
        PageState::EmptyContent | PageState::NotFound(_) => {
            status_view::<R>(&collection.not_found_title, None, collection)
        }
    }
}

/// Document title for a rendered detail page.
pub fn detail_title<R: Render>(state: &PageState<R>, site_name: &str) -> Option<String> {
    match state {
        PageState::Success(record) => Some(format!("{} | {site_name}", record.title())),
        _ => None,
    }
}

fn loading_view(collection: &CollectionConfig) -> String {
    format!(
        r#"<div class="text-center py-12 text-gray-500 col-span-full">
  <div class="inline-block animate-spin rounded-full h-8 w-8 border-b-2 border-blue-700 mb-4"></div>
  <p>{}</p>
</div>
"#,
        html_escape(&collection.loading_message)
    )
}

fn empty_view(collection: &CollectionConfig) -> String {
    format!(
        r#"<div class="text-center py-12 text-gray-500 col-span-full">
  <p>{}</p>
  <a href="{}" class="text-blue-700 hover:text-blue-900">Refresh</a>
</div>
"#,
        html_escape(&collection.fallback_message),
        html_escape(&collection.list_page)
    )
}

fn error_view(collection: &CollectionConfig) -> String {
    format!(
        r#"<div class="text-center py-12 text-gray-500 col-span-full">
  <p>{}</p>
  <p class="text-sm mt-2">{}</p>
  <a href="{}" class="text-blue-700 hover:text-blue-900">Reload</a>
</div>
"#,
        html_escape(&collection.error_message),
        html_escape(&collection.error_hint),
        html_escape(&collection.list_page)
    )
}

fn status_view<R: Render>(
    heading: &str,
    hint: Option<&str>,
    collection: &CollectionConfig,
) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"text-center py-12\">\n");
    out.push_str(&format!(
        "  <h2 class=\"text-2xl text-gray-700 mb-4\">{}</h2>\n",
        html_escape(heading)
    ));
    if let Some(hint) = hint {
        out.push_str(&format!(
            "  <p class=\"text-gray-600 mb-4\">{}</p>\n",
            html_escape(hint)
        ));
    }
    out.push_str(&format!(
        "  <a href=\"{}\" class=\"text-blue-700 hover:text-blue-900\">&larr; {}</a>\n",
        html_escape(&collection.list_page),
        R::BACK_LABEL
    ));
    out.push_str("</div>\n");
    out
}

impl Render for BlogRecord {
    const BACK_LABEL: &'static str = "Back to all blogs";

    fn card(&self, collection: &CollectionConfig) -> Result<String, RenderError> {
        let href = detail_href(self, collection)?;

        let mut out = String::new();
        out.push_str("<article class=\"bg-white p-8 rounded-lg shadow-sm border border-gray-200 flex flex-col h-full\">\n");
        out.push_str("  <div class=\"mb-4\">\n");
        if let Some(category) = &self.category {
            out.push_str(&format!(
                "    <span class=\"inline-block px-3 py-1 bg-blue-50 text-blue-700 text-xs font-medium rounded-full mb-3\">{}</span>\n",
                html_escape(category)
            ));
        }
        out.push_str(&format!(
            "    <h3 class=\"text-xl font-semibold text-gray-900 mb-3\">{}</h3>\n",
            html_escape(&self.title)
        ));
        out.push_str(&format!(
            "    <time class=\"text-gray-600 text-sm\" datetime=\"{}\">{}</time>\n",
            self.date.at.to_rfc3339(),
            self.date.long()
        ));
        out.push_str("  </div>\n");
        out.push_str(&format!(
            "  <div class=\"mt-4 flex-grow\"><p class=\"text-gray-700 leading-relaxed\">{}</p></div>\n",
            html_escape(&self.summary)
        ));
        out.push_str(&format!(
            "  <div class=\"mt-6 pt-4 border-t border-gray-100\"><a class=\"text-blue-700 hover:text-blue-900 font-medium text-sm\" href=\"{}\">Read Analysis<span class=\"ml-2\">&rarr;</span></a></div>\n",
            html_escape(&href)
        ));
        out.push_str("</article>\n");
        Ok(out)
    }

    fn article(&self, collection: &CollectionConfig) -> String {
        let list = html_escape(&collection.list_page);

        let mut out = String::new();
        out.push_str("<article class=\"bg-white rounded-lg p-6 md:p-8 lg:p-10\">\n");
        out.push_str(&format!(
            "  <div class=\"mb-8\"><a href=\"{list}\" class=\"text-blue-700 hover:text-blue-900 font-medium\">&larr; {}</a></div>\n",
            Self::BACK_LABEL
        ));
        if let Some(category) = &self.category {
            out.push_str(&format!(
                "  <span class=\"inline-block px-4 py-2 bg-blue-100 text-blue-800 rounded-full text-sm font-medium mb-4\">{}</span>\n",
                html_escape(category)
            ));
        }
        out.push_str(&format!(
            "  <h1 class=\"text-3xl md:text-4xl font-bold text-gray-900 mb-4 mt-2\">{}</h1>\n",
            html_escape(&self.title)
        ));
        out.push_str(&format!(
            "  <div class=\"text-gray-600 mb-8\"><time datetime=\"{}\">{}</time></div>\n",
            html_escape(&self.date.raw),
            self.date.long()
        ));
        if let Some(media) = &self.media {
            out.push_str(&blog_media(media, &self.title));
        }
        out.push_str(&format!(
            "  <div class=\"bg-blue-50 border-l-4 border-blue-500 p-6 mb-8 rounded-r-lg\"><p class=\"text-lg text-gray-700 italic\">{}</p></div>\n",
            html_escape(&self.summary)
        ));
        out.push_str(&format!(
            "  <div class=\"blog-content text-gray-700 leading-relaxed space-y-6 text-lg\">\n{}\n  </div>\n",
            content_or(self.content.as_deref(), "Full content coming soon...")
        ));
        out.push_str(&format!(
            "  <div class=\"mt-12 pt-8 border-t border-gray-200 flex justify-between\">\n    <a href=\"{list}\" class=\"text-blue-700 hover:text-blue-900 font-medium\">All Blogs</a>\n    <a href=\"contact.html\" class=\"text-blue-700 hover:text-blue-900 font-medium\">Contact Me &rarr;</a>\n  </div>\n"
        ));
        out.push_str("</article>\n");
        out
    }
}

impl Render for ProjectRecord {
    const BACK_LABEL: &'static str = "Back to all projects";

    fn card(&self, collection: &CollectionConfig) -> Result<String, RenderError> {
        let href = detail_href(self, collection)?;

        let mut out = String::new();
        out.push_str("<article class=\"bg-white rounded-lg shadow-sm border border-gray-200 overflow-hidden flex flex-col h-full\">\n");
        if let Some(media) = &self.media {
            out.push_str(&project_card_media(media, &self.title));
        }
        out.push_str("  <div class=\"p-8 flex-grow flex flex-col\">\n");
        out.push_str(&format!(
            "    <h3 class=\"text-xl font-semibold text-blue-800 mb-4\">{}</h3>\n",
            html_escape(&self.title)
        ));
        out.push_str(&format!(
            "    <p class=\"text-gray-700 mb-6 flex-grow\">{}</p>\n",
            html_escape(&self.description)
        ));
        let badges = tool_badges(&self.tools, "px-3 py-1 bg-blue-50 text-blue-700 text-xs font-medium rounded-full");
        if !badges.is_empty() {
            out.push_str("    <div class=\"mb-6\">\n");
            out.push_str("      <h4 class=\"font-medium text-gray-900 mb-2\">Tools &amp; Techniques</h4>\n");
            out.push_str(&format!(
                "      <div class=\"flex flex-wrap gap-2\">{badges}</div>\n"
            ));
            out.push_str("    </div>\n");
        }
        out.push_str(&format!(
            "    <a href=\"{}\" class=\"inline-flex items-center text-blue-700 hover:text-blue-900 font-medium mt-2\">View Case Study<span class=\"ml-2\">&rarr;</span></a>\n",
            html_escape(&href)
        ));
        out.push_str("  </div>\n");
        out.push_str("</article>\n");
        Ok(out)
    }

    fn article(&self, collection: &CollectionConfig) -> String {
        let list = html_escape(&collection.list_page);

        let mut out = String::new();
        out.push_str("<article class=\"bg-white rounded-lg p-6 md:p-8 lg:p-10 shadow-lg\">\n");
        out.push_str(&format!(
            "  <div class=\"mb-8\"><a href=\"{list}\" class=\"text-blue-700 hover:text-blue-900 font-medium\">&larr; {}</a></div>\n",
            Self::BACK_LABEL
        ));
        out.push_str(&format!(
            "  <h1 class=\"text-3xl md:text-4xl font-bold text-gray-900 mb-4\">{}</h1>\n",
            html_escape(&self.title)
        ));
        out.push_str(&format!(
            "  <div class=\"bg-gray-50 border-l-4 border-blue-500 p-6 mb-8 rounded-r-lg\"><p class=\"text-lg text-gray-700\">{}</p></div>\n",
            html_escape(&self.description)
        ));
        if let Some(media) = &self.media {
            out.push_str(&project_article_media(media, &self.title));
        }
        out.push_str(&format!(
            "  <div class=\"project-content text-gray-700 leading-relaxed space-y-6 text-lg mb-8\">\n{}\n  </div>\n",
            content_or(self.content.as_deref(), "Detailed case study coming soon...")
        ));
        out.push_str("  <div class=\"mb-8\">\n");
        out.push_str("    <h3 class=\"text-xl font-bold text-gray-900 mb-4\">Tools &amp; Technologies Used</h3>\n");
        out.push_str(&format!(
            "    <div class=\"flex flex-wrap gap-2 mb-6\">{}</div>\n",
            tool_badges(&self.tools, "px-3 py-1 bg-blue-100 text-blue-800 text-sm font-medium rounded-full")
        ));
        out.push_str("  </div>\n");
        out.push_str(&format!(
            "  <div class=\"bg-blue-50 p-6 rounded-lg mb-8\">\n    <h3 class=\"text-lg font-semibold text-gray-900 mb-3\">Project Repository</h3>\n    <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"inline-flex items-center bg-gray-900 text-white px-6 py-3 rounded-lg font-medium\">View on GitHub</a>\n  </div>\n",
            html_escape(&self.github)
        ));
        out.push_str(&format!(
            "  <div class=\"mt-12 pt-8 border-t border-gray-200 flex justify-between\">\n    <a href=\"{list}\" class=\"text-blue-700 hover:text-blue-900 font-medium\">All Projects</a>\n    <a href=\"contact.html\" class=\"text-blue-700 hover:text-blue-900 font-medium\">Request Similar Project &rarr;</a>\n  </div>\n"
        ));
        out.push_str("</article>\n");
        out
    }
}

fn detail_href<R: Record>(record: &R, collection: &CollectionConfig) -> Result<String, RenderError> {
    let slug = record
        .slug()
        .filter(|slug| !slug.is_empty())
        .ok_or_else(|| RenderError::MissingSlug {
            title: record.title().to_owned(),
        })?;
    let encoded: String = url::form_urlencoded::byte_serialize(slug.as_bytes()).collect();
    Ok(format!("{}?slug={encoded}", collection.detail_page))
}

fn content_or(content: Option<&str>, placeholder: &str) -> String {
    match content {
        Some(html) => html.to_owned(),
        None => format!("<p class=\"text-center py-8 text-gray-500\">{placeholder}</p>"),
    }
}

fn tool_badges(tools: &[String], class: &str) -> String {
    tools
        .iter()
        .map(|tool| tool.trim())
        .filter(|tool| !tool.is_empty())
        .map(|tool| format!("<span class=\"{class}\">{}</span>", html_escape(tool)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn video_poster(path: &str) -> String {
    path.replacen(".mp4", ".jpg", 1).replacen(".webm", ".jpg", 1)
}

fn blog_media(media: &Media, title: &str) -> String {
    let src = html_escape(&media.path);
    match media.kind {
        MediaType::Image => format!(
            "  <div class=\"mb-8 rounded-lg overflow-hidden shadow-lg\"><img src=\"{src}\" alt=\"{}\" class=\"w-full h-auto object-cover\" loading=\"lazy\"></div>\n",
            html_escape(title)
        ),
        MediaType::Video => format!(
            "  <div class=\"mb-8 rounded-lg overflow-hidden shadow-lg\"><video controls class=\"w-full h-auto\" poster=\"{}\"><source src=\"{src}\" type=\"video/mp4\">Your browser does not support the video tag.</video></div>\n",
            html_escape(&video_poster(&media.path))
        ),
    }
}

fn project_card_media(media: &Media, title: &str) -> String {
    let src = html_escape(&media.path);
    let element = match media.kind {
        MediaType::Image => format!(
            "<img class=\"w-full h-48 object-cover\" src=\"{src}\" alt=\"{} - Analytical Output\" loading=\"lazy\" decoding=\"async\">",
            html_escape(title)
        ),
        MediaType::Video => format!(
            "<video class=\"w-full h-48 object-cover\" src=\"{src}\" poster=\"{}\" controls muted playsinline preload=\"metadata\" controlslist=\"nofullscreen nodownload noremoteplayback noplaybackrate\" disablepictureinpicture disableremoteplayback></video>",
            html_escape(&video_poster(&media.path))
        ),
    };
    format!("  <div class=\"bg-gray-100 overflow-hidden\">{element}</div>\n")
}

fn project_article_media(media: &Media, title: &str) -> String {
    let src = html_escape(&media.path);
    match media.kind {
        MediaType::Image => format!(
            "  <div class=\"mb-8 rounded-lg overflow-hidden shadow-xl border border-gray-200\"><img src=\"{src}\" alt=\"{}\" class=\"w-full h-auto object-contain bg-white p-4\" loading=\"lazy\"><p class=\"text-center text-gray-500 text-sm p-2 bg-gray-50\">Project Screenshot</p></div>\n",
            html_escape(title)
        ),
        MediaType::Video => format!(
            "  <div class=\"mb-8 bg-black rounded-lg overflow-hidden shadow-xl\"><video controls playsinline preload=\"metadata\" controlslist=\"nofullscreen nodownload noremoteplayback\" disablepictureinpicture disableremoteplayback class=\"w-full h-full\" src=\"{src}\"></video></div>\n"
        ),
    }
}

pub fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LookupError, PipelineError};
    use crate::formats::PublishedDate;

    fn blog(slug: Option<&str>, title: &str) -> BlogRecord {
        BlogRecord {
            slug: slug.map(str::to_owned),
            title: title.to_owned(),
            date: PublishedDate::parse("2024-06-01").unwrap(),
            summary: "Summary <b>".to_owned(),
            category: Some("Data".to_owned()),
            media: None,
            content: None,
        }
    }

    fn project() -> ProjectRecord {
        ProjectRecord {
            slug: Some("churn model".to_owned()),
            title: "Churn".to_owned(),
            description: "Predicting churn".to_owned(),
            tools: vec!["SQL".to_owned(), "  ".to_owned(), "Power BI".to_owned()],
            github: "https://github.com/me/churn".to_owned(),
            media: Some(Media {
                kind: MediaType::Video,
                path: "media/demo.webm".to_owned(),
            }),
            content: Some("<p>Case study</p>".to_owned()),
        }
    }

    #[test]
    fn blog_card_links_to_detail_page_and_escapes_text() {
        let card = blog(Some("q&a"), "Tips & <Tricks>")
            .card(&CollectionConfig::blogs())
            .unwrap();
        assert!(card.contains("href=\"blog-detail.html?slug=q%26a\""));
        assert!(card.contains("Tips &amp; &lt;Tricks&gt;"));
        assert!(card.contains("Summary &lt;b&gt;"));
        assert!(card.contains(">June 1, 2024</time>"));
        assert!(card.contains(">Data</span>"));
    }

    #[test]
    fn card_without_slug_is_skipped_but_others_render() {
        let records = vec![
            blog(Some("first"), "First"),
            blog(None, "Broken"),
            blog(Some("third"), "Third"),
        ];
        let html = cards(&records, &CollectionConfig::blogs());
        assert!(html.contains("First"));
        assert!(!html.contains("Broken"));
        assert!(html.contains("Third"));
        assert_eq!(html.matches("<article").count(), 2);
    }

    #[test]
    fn every_card_link_resolves_to_its_own_record() {
        let collection = CollectionConfig::blogs();
        let value = serde_json::json!([
            {"slug": " padded ", "title": "Padded", "date": "2024-01-01", "summary": "s"},
            {"slug": "q&a", "title": "Questions", "date": "2024-02-01", "summary": "s"},
            {"slug": "plain", "title": "Plain", "date": "2024-03-01", "summary": "s"},
        ]);
        let PageState::Success(records) = crate::page::list_state::<BlogRecord>(&value) else {
            panic!("expected success");
        };
        let html = render_list(&PageState::Success(records.clone()), &collection);

        for record in &records {
            let href = detail_href(record, &collection).unwrap();
            assert!(html.contains(&format!("href=\"{}\"", html_escape(&href))));
            let page_url = crate::detail::parse_page_url(&href).unwrap();
            match crate::page::detail_state::<BlogRecord>(&value, &page_url) {
                PageState::Success(found) => assert_eq!(found.title, record.title),
                other => panic!("{href} reached {}", other.name()),
            }
        }
    }

    #[test]
    fn list_with_no_buildable_card_renders_fallback() {
        let collection = CollectionConfig::blogs();
        let value = serde_json::json!([{"title": "T", "date": "2024-01-01", "summary": "s"}]);
        let state = crate::page::list_state::<BlogRecord>(&value);
        assert_eq!(state.name(), "success");

        let html = render_list(&state, &collection);
        assert!(html.contains(&collection.fallback_message));
        assert!(html.contains("href=\"blogs.html\""));
    }

    #[test]
    fn project_card_shows_non_blank_tools_and_video_poster() {
        let card = project().card(&CollectionConfig::projects()).unwrap();
        assert!(card.contains("project-detail.html?slug=churn+model"));
        assert_eq!(card.matches("rounded-full\">").count(), 2);
        assert!(card.contains("poster=\"media/demo.jpg\""));
        assert!(card.contains("Tools &amp; Techniques"));
    }

    #[test]
    fn project_card_omits_tools_section_when_all_blank() {
        let mut record = project();
        record.tools = vec![" ".to_owned()];
        let card = record.card(&CollectionConfig::projects()).unwrap();
        assert!(!card.contains("Tools &amp; Techniques"));
    }

    #[test]
    fn detail_falls_back_to_placeholder_content() {
        let html = blog(Some("a"), "A").article(&CollectionConfig::blogs());
        assert!(html.contains("Full content coming soon..."));

        let mut record = project();
        record.content = None;
        let html = record.article(&CollectionConfig::projects());
        assert!(html.contains("Detailed case study coming soon..."));
    }

    #[test]
    fn detail_inserts_content_verbatim() {
        let html = project().article(&CollectionConfig::projects());
        assert!(html.contains("<p>Case study</p>"));
        assert!(html.contains("rel=\"noopener noreferrer\""));
    }

    #[test]
    fn list_states_render_messages_with_link_back() {
        let collection = CollectionConfig::blogs();

        let empty = render_list::<BlogRecord>(&PageState::EmptyContent, &collection);
        assert!(empty.contains(&collection.fallback_message));
        assert!(empty.contains("href=\"blogs.html\""));

        let failed = render_list::<BlogRecord>(
            &PageState::Unavailable(PipelineError::Status {
                path: collection.data_path.clone(),
                status: 500,
            }),
            &collection,
        );
        assert!(failed.contains(&collection.error_message));
        assert!(failed.contains("href=\"blogs.html\""));

        let loading = render_list::<BlogRecord>(&PageState::Loading, &collection);
        assert!(loading.contains("Loading professional insights..."));
    }

    #[test]
    fn not_specified_and_not_found_render_the_same_view() {
        let collection = CollectionConfig::projects();
        let a = render_detail::<ProjectRecord>(
            &PageState::NotFound(LookupError::NotSpecified),
            &collection,
        );
        let b = render_detail::<ProjectRecord>(
            &PageState::NotFound(LookupError::NotFound {
                slug: "x".to_owned(),
            }),
            &collection,
        );
        assert_eq!(a, b);
        assert!(a.contains("Project not found"));
        assert!(a.contains("Back to all projects"));
    }

    #[test]
    fn detail_title_uses_site_name() {
        let state = PageState::Success(blog(Some("a"), "Hello"));
        assert_eq!(
            detail_title(&state, "Business Analyst").as_deref(),
            Some("Hello | Business Analyst")
        );
        assert!(detail_title::<BlogRecord>(&PageState::EmptyContent, "x").is_none());
    }
}
