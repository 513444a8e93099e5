//! # Renewal Report
//!
//! Turns one aggregate snapshot into a styled, self-contained report:
//!
//! ```text
//! AggregateBundle ─┐
//! narrative text ──┼─> assemble ──> RenderableDocument ──> HTML
//! detail rows ─────┘
//! ```
//!
//! Narrative text is a small markdown dialect parsed line-first (heading,
//! bullet, numbered, rule, blank, paragraph) with a single-regex inline
//! pass for bold, italic, code, and links. Everything in this crate is a
//! pure function; writing the artifact anywhere is the caller's job.

mod assemble;
mod document;
mod filename;
mod html;
mod inline;
mod lines;
mod markdown;

pub use assemble::{
    assemble_report, format_amount, DetailRows, NarrativeSection, ReportInput, ReportKind,
    CLOSING_MARKER,
};
pub use document::{DocBlock, RenderableDocument, TableBlock, TocEntry, BRAND_COLOR};
pub use filename::{report_filename, sanitize_component, REPORT_EXTENSION};
pub use html::{escape, render_html};
pub use inline::{parse_inline, plain_text, RunStyle, StyledRun};
pub use lines::{classify_line, indent_level, LineKind};
pub use markdown::markdown_to_blocks;
