//! Plain-text conversion of post bodies.

use html2text::render::text_renderer::{TaggedLine, TextDecorator, TrivialDecorator};
use serde_json::Value;
use tracing::warn;

// Wide enough that the renderer never wraps a real paragraph.
const RENDER_WIDTH: usize = 10_000;

/// Text-only decorator: no emphasis markers, list bullets or link
/// footnotes, and images contribute nothing.
#[derive(Clone, Debug)]
struct TextOnly(TrivialDecorator);

impl TextOnly {
    fn new() -> Self {
        Self(TrivialDecorator::new())
    }
}

impl TextDecorator for TextOnly {
    type Annotation = ();

    fn decorate_link_start(&mut self, url: &str) -> (String, ()) {
        self.0.decorate_link_start(url)
    }

    fn decorate_link_end(&mut self) -> String {
        self.0.decorate_link_end()
    }

    fn decorate_em_start(&self) -> (String, ()) {
        self.0.decorate_em_start()
    }

    fn decorate_em_end(&self) -> String {
        self.0.decorate_em_end()
    }

    fn decorate_strong_start(&self) -> (String, ()) {
        self.0.decorate_strong_start()
    }

    fn decorate_strong_end(&self) -> String {
        self.0.decorate_strong_end()
    }

    fn decorate_strikeout_start(&self) -> (String, ()) {
        self.0.decorate_strikeout_start()
    }

    fn decorate_strikeout_end(&self) -> String {
        self.0.decorate_strikeout_end()
    }

    fn decorate_code_start(&self) -> (String, ()) {
        self.0.decorate_code_start()
    }

    fn decorate_code_end(&self) -> String {
        self.0.decorate_code_end()
    }

    fn decorate_preformat_first(&self) {}

    fn decorate_preformat_cont(&self) {}

    fn decorate_image(&mut self, _src: &str, _title: &str) -> (String, ()) {
        (String::new(), ())
    }

    fn header_prefix(&self, level: usize) -> String {
        self.0.header_prefix(level)
    }

    fn quote_prefix(&self) -> String {
        self.0.quote_prefix()
    }

    fn unordered_item_prefix(&self) -> String {
        self.0.unordered_item_prefix()
    }

    fn ordered_item_prefix(&self, i: i64) -> String {
        self.0.ordered_item_prefix(i)
    }

    fn make_subblock_decorator(&self) -> Self {
        Self::new()
    }

    fn decorate_superscript_start(&self) -> (String, ()) {
        (String::new(), ())
    }

    fn decorate_superscript_end(&self) -> String {
        String::new()
    }

    fn finalise(&mut self, links: Vec<String>) -> Vec<TaggedLine<()>> {
        self.0.finalise(links)
    }
}

/// Strip markup from an HTML fragment, keeping its visible text.
///
/// Table cells come out one per line with no borders drawn.
pub fn html_to_text(html: &str) -> String {
    let rendered = html2text::config::with_decorator(TextOnly::new())
        .raw_mode(true)
        .allow_width_overflow()
        .string_from_read(html.as_bytes(), RENDER_WIDTH);

    match rendered {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            // Left as-is rather than dropping the post body
            warn!(error = %e, "Could not render post HTML");
            html.trim().to_string()
        }
    }
}

/// Replace every `post_stream.posts[*].cooked` string with its plain text.
///
/// Returns how many posts were rewritten. Documents without a post stream
/// are left alone.
pub fn clean_topic(topic: &mut Value) -> usize {
    let Some(posts) = topic
        .get_mut("post_stream")
        .and_then(|stream| stream.get_mut("posts"))
        .and_then(Value::as_array_mut)
    else {
        return 0;
    };

    let mut cleaned = 0;
    for post in posts.iter_mut() {
        if let Some(cooked) = post.get_mut("cooked") {
            if let Some(html) = cooked.as_str() {
                *cooked = Value::String(html_to_text(html));
                cleaned += 1;
            }
        }
    }
    cleaned
}
