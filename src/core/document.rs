//! Parsing of the notebook text into titled sections
//!
//! A section starts at a line of the form `## <title>` and runs up to the
//! next such line, or to end of text. Text before the first heading is the
//! preamble and never belongs to a section.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Marker that opens a heading line, including its single trailing space
pub const HEADING_MARKER: &str = "## ";

/// Preamble written when a section is inserted into an empty notebook
pub const DEFAULT_PREAMBLE: &str = "# Notebook\n\n";

/// Content line for freshly inserted sections
pub const NEW_PAGE_PLACEHOLDER: &str = "<p><em>New page.</em></p>";

/// A titled section of the notebook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text after the marker, untrimmed
    pub title: String,
    /// Everything after the heading line up to the next heading
    pub content: String,
}

/// Byte offsets of one section inside the text it was scanned from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    /// Start of the heading line through the end of the section
    pub whole: Range<usize>,
    /// Marker and title, without the line terminator
    pub heading: Range<usize>,
    pub title: Range<usize>,
    pub content: Range<usize>,
}

impl SectionSpan {
    /// Title slice of `text`
    pub fn title<'a>(&self, text: &'a str) -> &'a str {
        &text[self.title.clone()]
    }

    /// Content slice of `text`
    pub fn content<'a>(&self, text: &'a str) -> &'a str {
        &text[self.content.clone()]
    }
}

/// Locate every heading line and the span of the section it opens.
pub fn scan(text: &str) -> Vec<SectionSpan> {
    // (heading line start, heading line end excluding '\n', content start)
    let mut headings = Vec::new();
    let mut line_start = 0;

    for line in text.split_inclusive('\n') {
        if line.starts_with(HEADING_MARKER) {
            let body = line.strip_suffix('\n').unwrap_or(line);
            let heading_end = line_start + body.len();
            headings.push((line_start, heading_end, line_start + line.len()));
        }
        line_start += line.len();
    }

    let mut spans = Vec::with_capacity(headings.len());
    for (i, &(start, heading_end, content_start)) in headings.iter().enumerate() {
        let end = headings
            .get(i + 1)
            .map(|&(next_start, _, _)| next_start)
            .unwrap_or(text.len());
        spans.push(SectionSpan {
            whole: start..end,
            heading: start..heading_end,
            title: start + HEADING_MARKER.len()..heading_end,
            content: content_start..end,
        });
    }
    spans
}

/// Split notebook text into its sections, in file order.
pub fn split(text: &str) -> Vec<Section> {
    scan(text)
        .iter()
        .map(|span| Section {
            title: span.title(text).to_string(),
            content: span.content(text).to_string(),
        })
        .collect()
}

/// Text before the first heading line (the whole text if there is none)
pub fn preamble(text: &str) -> &str {
    match scan(text).first() {
        Some(span) => &text[..span.whole.start],
        None => text,
    }
}

/// Span of the first section titled exactly `title`
pub fn find_section(text: &str, title: &str) -> Option<SectionSpan> {
    scan(text).into_iter().find(|span| span.title(text) == title)
}

/// Build a heading line without its terminator
pub fn heading_line(title: &str) -> String {
    format!("{HEADING_MARKER}{title}")
}

/// Build the replacement block for a saved section
pub fn section_block(title: &str, html: &str) -> String {
    format!("{}\n\n{html}\n", heading_line(title))
}

/// Build the block appended by a section insert
pub fn new_section_stub(title: &str) -> String {
    format!("\n\n{}\n\n{NEW_PAGE_PLACEHOLDER}\n", heading_line(title))
}
