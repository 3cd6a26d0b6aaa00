//! Placing rendered fragments into a site's own HTML pages.
//!
//! A shell page is any HTML document containing the container element a
//! collection renders into, e.g. `<div id="blogsContainer"></div>`. Mounting
//! replaces the container's children and leaves everything else untouched.

use crate::render::html_escape;

/// Byte range of a container element's children within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    pub inner_start: usize,
    pub inner_end: usize,
}

/// Locates the element whose `id` attribute equals `id`.
pub fn find_container(html: &str, id: &str) -> Option<Container> {
    let lower = html.to_ascii_lowercase();
    let attr_at = find_id_attribute(html, &lower, id)?;

    let tag_start = lower[..attr_at].rfind('<')?;
    if lower[tag_start..attr_at].contains('>') {
        return None;
    }
    let name: String = lower[tag_start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if name.is_empty() {
        return None;
    }

    let open_end = attr_at + lower[attr_at..].find('>')?;
    if lower[..open_end].ends_with('/') {
        return None;
    }
    let inner_start = open_end + 1;
    let inner_end = matching_close(&lower, &name, inner_start)?;

    Some(Container {
        inner_start,
        inner_end,
    })
}

/// Replaces the children of the container `id` with `fragment`. `None` when
/// the document has no such container.
pub fn mount(html: &str, id: &str, fragment: &str) -> Option<String> {
    let container = find_container(html, id)?;
    let mut out = String::with_capacity(html.len() + fragment.len() + 2);
    out.push_str(&html[..container.inner_start]);
    out.push('\n');
    out.push_str(fragment);
    if !fragment.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&html[container.inner_end..]);
    Some(out)
}

/// Rewrites the text of the document's `<title>` element, if it has one.
pub fn set_title(html: &str, title: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let Some(open) = lower.find("<title") else {
        return html.to_owned();
    };
    let Some(open_end) = lower[open..].find('>').map(|i| open + i + 1) else {
        return html.to_owned();
    };
    let Some(close) = lower[open_end..].find("</title>").map(|i| open_end + i) else {
        return html.to_owned();
    };

    format!("{}{}{}", &html[..open_end], html_escape(title), &html[close..])
}

// Attribute name in any case, value matched exactly. The name must follow
// whitespace so `data-id` does not count.
fn find_id_attribute(html: &str, lower: &str, id: &str) -> Option<usize> {
    let quoted = [format!("\"{id}\""), format!("'{id}'")];
    let mut from = 0;
    while let Some(rel) = lower[from..].find("id=") {
        let at = from + rel;
        let value = &html[at + 3..];
        if lower[..at].ends_with(|c: char| c.is_ascii_whitespace())
            && quoted.iter().any(|q| value.starts_with(q.as_str()))
        {
            return Some(at);
        }
        from = at + 3;
    }
    None
}

fn matching_close(lower: &str, name: &str, from: usize) -> Option<usize> {
    let open = format!("<{name}");
    let close = format!("</{name}");
    let mut depth = 0_usize;
    let mut pos = from;

    loop {
        let next_open = find_tag(lower, &open, pos);
        let next_close = find_tag(lower, &close, pos)?;
        match next_open {
            Some(o) if o < next_close => {
                depth += 1;
                pos = o + open.len();
            }
            _ => {
                if depth == 0 {
                    return Some(next_close);
                }
                depth -= 1;
                pos = next_close + close.len();
            }
        }
    }
}

// A tag prefix only counts when the name ends there (`<div` but not `<divider`).
fn find_tag(lower: &str, prefix: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(rel) = lower[pos..].find(prefix) {
        let at = pos + rel;
        let after = lower[at + prefix.len()..].chars().next();
        if matches!(after, Some(c) if c.is_ascii_whitespace() || c == '>' || c == '/') {
            return Some(at);
        }
        pos = at + prefix.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHELL: &str = r#"<!doctype html>
<html>
  <head><title>Blogs</title></head>
  <body>
    <nav data-id="blogsContainer"><div>menu</div></nav>
    <main>
      <div id="blogsContainer" class="grid">
        <div class="spinner"><div></div></div>
        <p>Loading...</p>
      </div>
      <footer>f</footer>
    </main>
  </body>
</html>
"#;

    #[test]
    fn mount_replaces_only_container_children() {
        let out = mount(SHELL, "blogsContainer", "<article>A</article>").unwrap();
        assert!(out.contains("<div id=\"blogsContainer\" class=\"grid\">\n<article>A</article>\n</div>"));
        assert!(!out.contains("Loading..."));
        assert!(out.contains("<footer>f</footer>"));
        assert!(out.contains("<div>menu</div>"));
    }

    #[test]
    fn missing_container_is_none() {
        assert!(mount(SHELL, "projectsContainer", "x").is_none());
        assert!(find_container("<div data-id=\"a\"></div>", "a").is_none());
    }

    #[test]
    fn attribute_name_is_case_insensitive_but_value_is_exact() {
        let html = "<DIV ID=\"blogsContainer\"><P>old</P></DIV>";
        let out = mount(html, "blogsContainer", "<p>new</p>").unwrap();
        assert_eq!(out, "<DIV ID=\"blogsContainer\">\n<p>new</p>\n</DIV>");
        assert!(find_container(html, "blogscontainer").is_none());
    }

    #[test]
    fn self_closing_container_is_not_mountable() {
        assert!(find_container("<div id=\"a\"/>", "a").is_none());
    }

    #[test]
    fn nested_same_name_tags_are_balanced() {
        let html = "<section id='c'><section><p>x</p></section></section><p>after</p>";
        let container = find_container(html, "c").unwrap();
        assert_eq!(
            &html[container.inner_start..container.inner_end],
            "<section><p>x</p></section>"
        );
    }

    #[test]
    fn set_title_rewrites_title_text() {
        let out = set_title(SHELL, "A & B | Site");
        assert!(out.contains("<title>A &amp; B | Site</title>"));
        assert_eq!(set_title("<p>no head</p>", "x"), "<p>no head</p>");
    }
}
