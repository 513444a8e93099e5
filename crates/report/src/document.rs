//! The renderable document model.
//!
//! Assembly produces this tree; serializers consume it. It carries layout
//! semantics (headings, tables, page structure) but no output-format
//! detail, so a second serializer only has to understand these blocks.

use serde::{Deserialize, Serialize};

use crate::inline::StyledRun;

/// Default accent color for covers, headings, and table headers.
pub const BRAND_COLOR: &str = "#1f4e79";

/// A complete report, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderableDocument {
    pub title: String,
    /// Hex accent color applied by the serializer.
    pub brand_color: String,
    pub blocks: Vec<DocBlock>,
}

impl RenderableDocument {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            brand_color: BRAND_COLOR.to_string(),
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: DocBlock) {
        self.blocks.push(block);
    }

    /// Headings that belong in the table of contents, in document order.
    /// Levels 1 through 3 are listed; deeper headings stay out.
    #[must_use]
    pub fn toc_entries(&self) -> Vec<TocEntry> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                DocBlock::Heading { level, runs } if (1..=3).contains(level) => Some(TocEntry {
                    level: *level,
                    title: crate::inline::plain_text(runs),
                }),
                _ => None,
            })
            .collect()
    }
}

/// One table-of-contents line: the heading's level and its plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u8,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocBlock {
    /// Full-page cover: report title, subject line, and metadata lines.
    Cover {
        title: String,
        subtitle: String,
        lines: Vec<String>,
    },
    /// Table of contents. Entries are resolved by the serializer from the
    /// headings that follow, so assembly never goes out of sync.
    Toc,
    /// Hard page boundary; paged output starts a fresh page here.
    PageBreak,
    Heading {
        level: u8,
        runs: Vec<StyledRun>,
    },
    Paragraph {
        runs: Vec<StyledRun>,
    },
    Bullet {
        indent: u8,
        runs: Vec<StyledRun>,
    },
    Numbered {
        indent: u8,
        runs: Vec<StyledRun>,
    },
    Table(TableBlock),
    Rule,
}

/// A rendered data table. Alignment is positional and applied by the
/// serializer: first column left, last column right, everything between
/// centered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    #[must_use]
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
