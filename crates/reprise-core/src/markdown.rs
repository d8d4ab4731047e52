//! Markdown to plain prose, for `--strip-markdown`.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Render markdown as the prose a reader sees.
///
/// Code (fenced, indented, inline), raw HTML, headings and YAML
/// frontmatter are dropped. Headings go because they carry no terminator
/// and would run into the next sentence. Emphasis, link and quote markers
/// are removed but their text kept. Paragraphs end with a blank line, list
/// items and table cells with a newline.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let body = strip_frontmatter(text);
    let parser = Parser::new_ext(
        body,
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES,
    );

    let mut prose = String::with_capacity(body.len());
    // Nesting level inside code blocks and headings.
    let mut hidden = 0usize;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Heading { .. }) => hidden += 1,
            Event::End(TagEnd::CodeBlock | TagEnd::Heading(_)) => {
                hidden = hidden.saturating_sub(1);
            }
            _ if hidden > 0 => {}
            Event::Text(t) => prose.push_str(&t),
            Event::SoftBreak | Event::HardBreak => prose.push(' '),
            Event::End(TagEnd::Paragraph) => prose.push_str("\n\n"),
            Event::End(TagEnd::Item | TagEnd::TableCell) => prose.push('\n'),
            _ => {}
        }
    }

    prose.truncate(prose.trim_end().len());
    prose
}

/// Drop a leading `---` ... `---` block. Text without a closing
/// delimiter is returned untouched.
fn strip_frontmatter(text: &str) -> &str {
    let Some(body) = text.trim_start().strip_prefix("---") else {
        return text;
    };
    match body.split_once("\n---") {
        Some((_, rest)) => rest.strip_prefix('\n').unwrap_or(rest),
        None => text,
    }
}
