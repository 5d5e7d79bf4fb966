use dioxus::prelude::*;
use pulldown_cmark::{html, Event, Options, Parser};

/// Render user-written markdown to HTML. Raw HTML in the source is escaped,
/// not passed through.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[component]
pub fn Markdown(source: String, #[props(default)] class: String) -> Element {
    let html = use_memo(use_reactive((&source,), |(source,)| render_markdown(&source)));

    rsx! {
        div {
            class: "prose max-w-none {class}",
            dangerous_inner_html: html(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_basic_markdown() {
        let html = render_markdown("# Velkommen\n\nTil **TIHLDE**");
        assert!(html.contains("<h1>Velkommen</h1>"));
        assert!(html.contains("<strong>TIHLDE</strong>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("Hei <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_tables_enabled() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }
}
