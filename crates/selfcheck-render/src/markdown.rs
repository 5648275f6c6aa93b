//! Markdown rendering for stems, options and rationales.

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

/// Renders author markdown to HTML fragments.
pub trait Markdown: Send + Sync {
    /// Render a single line without block wrapping.
    fn render_inline(&self, source: &str) -> String;

    /// Render full block markdown, possibly several paragraphs.
    fn render_block(&self, source: &str) -> String;
}

/// [`Markdown`] backed by pulldown-cmark.
#[derive(Debug, Clone, Copy)]
pub struct PulldownMarkdown {
    options: Options,
}

impl PulldownMarkdown {
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }
}

impl Default for PulldownMarkdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Markdown for PulldownMarkdown {
    fn render_inline(&self, source: &str) -> String {
        let escaped = escape_block_starts(source);
        let options = self.options.difference(Options::ENABLE_TABLES);

        let events = Parser::new_ext(&escaped, options).filter_map(|e| match e {
            Event::Start(Tag::Paragraph) => None,
            Event::End(TagEnd::Paragraph) => Some(Event::SoftBreak),
            other => Some(other),
        });

        let mut out = String::new();
        html::push_html(&mut out, events);
        out.trim_end().to_string()
    }

    fn render_block(&self, source: &str) -> String {
        let mut out = String::new();
        html::push_html(&mut out, Parser::new_ext(source, self.options));
        out
    }
}

/// Backslash-escape any line start that would open a block, so the text
/// parses as a single run of inline content.
fn escape_block_starts(source: &str) -> String {
    source
        .lines()
        .map(|line| {
            let line = line.trim_start();
            match block_marker(line) {
                Some(at) => format!("{}\\{}", &line[..at], &line[at..]),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte offset of the character that makes `line` open a block.
fn block_marker(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let first = *bytes.first()?;
    let spaced = |at: usize| bytes.get(at).map_or(true, |b| b.is_ascii_whitespace());

    match first {
        b'>' => Some(0),
        b'#' => {
            let hashes = bytes.iter().take_while(|&&b| b == b'#').count();
            (hashes <= 6 && spaced(hashes)).then_some(0)
        }
        b'-' | b'*' | b'+' | b'_' | b'=' if is_rule(line, first) => Some(0),
        b'-' | b'*' | b'+' if spaced(1) => Some(0),
        b'`' | b'~' if line.starts_with("```") || line.starts_with("~~~") => Some(0),
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            let delimited = matches!(bytes.get(digits), Some(b'.' | b')'));
            (digits <= 9 && delimited && spaced(digits + 1)).then_some(digits)
        }
        _ => None,
    }
}

/// Whether `line` is only `marker` repeated, as in a rule or setext underline.
fn is_rule(line: &str, marker: u8) -> bool {
    line.bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .all(|b| b == marker)
}
