//! HTML serialization of a [`RenderableDocument`].
//!
//! The output is a single self-contained file: styling is inlined, nothing
//! references the network, and print CSS gives each section its own page.
//! Column alignment is positional (first left, last right, middle centered)
//! and row shading is handled entirely in the stylesheet.

use crate::document::{DocBlock, RenderableDocument, TableBlock, TocEntry};
use crate::inline::{RunStyle, StyledRun};

/// Escape text for element and attribute positions.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize the whole document to a standalone HTML page.
#[must_use]
pub fn render_html(doc: &RenderableDocument) -> String {
    let toc = doc.toc_entries();
    let mut body = String::new();
    let mut lists = ListStack::default();
    let mut section = 0usize;

    for block in &doc.blocks {
        match block {
            DocBlock::Bullet { indent, runs } => {
                lists.item(&mut body, ListKind::Unordered, *indent, &render_runs(runs));
                continue;
            }
            DocBlock::Numbered { indent, runs } => {
                lists.item(&mut body, ListKind::Ordered, *indent, &render_runs(runs));
                continue;
            }
            _ => lists.close_all(&mut body),
        }
        match block {
            DocBlock::Cover {
                title,
                subtitle,
                lines,
            } => render_cover(&mut body, title, subtitle, lines),
            DocBlock::Toc => render_toc(&mut body, &toc),
            DocBlock::PageBreak => body.push_str("<div class=\"page-break\"></div>\n"),
            DocBlock::Heading { level, runs } => {
                // Ids are assigned in the same order toc_entries walks the
                // tree, so anchors line up without a second pass.
                let tag = (*level).clamp(1, 3);
                if (1..=3).contains(level) {
                    section += 1;
                    let class = if tag == 1 { " class=\"section\"" } else { "" };
                    body.push_str(&format!(
                        "<h{tag}{class} id=\"sec-{section}\">{}</h{tag}>\n",
                        render_runs(runs)
                    ));
                } else {
                    body.push_str(&format!("<h{tag}>{}</h{tag}>\n", render_runs(runs)));
                }
            }
            DocBlock::Paragraph { runs } => {
                body.push_str(&format!("<p>{}</p>\n", render_runs(runs)));
            }
            DocBlock::Table(table) => render_table(&mut body, table),
            DocBlock::Rule => body.push_str("<hr>\n"),
            // List blocks were handled above.
            DocBlock::Bullet { .. } | DocBlock::Numbered { .. } => {}
        }
    }
    lists.close_all(&mut body);

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>\n:root {{ --brand: {}; }}\n{}</style>\n</head>\n\
         <body>\n{}</body>\n</html>\n",
        escape(&doc.title),
        doc.brand_color,
        STYLE,
        body
    )
}

fn render_cover(body: &mut String, title: &str, subtitle: &str, lines: &[String]) {
    body.push_str("<header class=\"cover\">\n");
    body.push_str(&format!("<h1>{}</h1>\n", escape(title)));
    if !subtitle.is_empty() {
        body.push_str(&format!("<p class=\"subtitle\">{}</p>\n", escape(subtitle)));
    }
    for line in lines {
        body.push_str(&format!("<p class=\"meta\">{}</p>\n", escape(line)));
    }
    body.push_str("</header>\n");
}

fn render_toc(body: &mut String, entries: &[TocEntry]) {
    if entries.is_empty() {
        return;
    }
    body.push_str("<nav class=\"toc\">\n<h2>Contents</h2>\n<ol>\n");
    for (i, entry) in entries.iter().enumerate() {
        body.push_str(&format!(
            "<li class=\"toc-l{}\"><a href=\"#sec-{}\">{}</a></li>\n",
            entry.level,
            i + 1,
            escape(&entry.title)
        ));
    }
    body.push_str("</ol>\n</nav>\n");
}

fn render_runs(runs: &[StyledRun]) -> String {
    let mut out = String::new();
    for run in runs {
        let text = escape(&run.text);
        match &run.style {
            RunStyle::Plain => out.push_str(&text),
            RunStyle::Bold => out.push_str(&format!("<strong>{text}</strong>")),
            RunStyle::Italic => out.push_str(&format!("<em>{text}</em>")),
            RunStyle::Code => out.push_str(&format!("<code>{text}</code>")),
            RunStyle::Link => out.push_str(&format!("<span class=\"link\">{text}</span>")),
        }
    }
    out
}

fn align_class(index: usize, width: usize) -> &'static str {
    if index == 0 {
        "left"
    } else if index + 1 == width {
        "right"
    } else {
        "center"
    }
}

fn render_table(body: &mut String, table: &TableBlock) {
    let width = table.columns.len();
    body.push_str("<table>\n<thead>\n<tr>");
    for (i, column) in table.columns.iter().enumerate() {
        body.push_str(&format!(
            "<th class=\"{}\">{}</th>",
            align_class(i, width),
            escape(column)
        ));
    }
    body.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &table.rows {
        body.push_str("<tr>");
        for (i, cell) in row.iter().enumerate() {
            body.push_str(&format!(
                "<td class=\"{}\">{}</td>",
                align_class(i, width),
                escape(cell)
            ));
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>\n");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    const fn open_tag(self) -> &'static str {
        match self {
            Self::Unordered => "<ul>\n",
            Self::Ordered => "<ol>\n",
        }
    }

    const fn close_tag(self) -> &'static str {
        match self {
            Self::Unordered => "</ul>\n",
            Self::Ordered => "</ol>\n",
        }
    }
}

/// Tracks open list elements so consecutive items group into `<ul>`/`<ol>`
/// and deeper indents nest.
#[derive(Default)]
struct ListStack {
    open: Vec<(ListKind, u8)>,
}

impl ListStack {
    fn item(&mut self, out: &mut String, kind: ListKind, indent: u8, inner: &str) {
        loop {
            match self.open.last() {
                Some(&(open_kind, open_indent))
                    if open_indent > indent || (open_indent == indent && open_kind != kind) =>
                {
                    self.close_one(out);
                }
                _ => break,
            }
        }
        let needs_open = self
            .open
            .last()
            .map_or(true, |&(_, open_indent)| open_indent < indent);
        if needs_open {
            out.push_str(kind.open_tag());
            self.open.push((kind, indent));
        }
        out.push_str(&format!("<li>{inner}</li>\n"));
    }

    fn close_one(&mut self, out: &mut String) {
        if let Some((kind, _)) = self.open.pop() {
            out.push_str(kind.close_tag());
        }
    }

    fn close_all(&mut self, out: &mut String) {
        while !self.open.is_empty() {
            self.close_one(out);
        }
    }
}

const STYLE: &str = r#"
* { box-sizing: border-box; }
body {
  font-family: "Segoe UI", Arial, sans-serif;
  color: #1a1a1a;
  margin: 0 auto;
  max-width: 960px;
  padding: 2rem;
  line-height: 1.5;
}
.cover {
  border-top: 12px solid var(--brand);
  padding: 4rem 0 2rem 0;
  margin-bottom: 2rem;
}
.cover h1 { color: var(--brand); font-size: 2.2rem; margin: 0 0 0.5rem 0; }
.cover .subtitle { font-size: 1.4rem; margin: 0 0 1.5rem 0; }
.cover .meta { color: #555; margin: 0.15rem 0; }
.toc h2 { color: var(--brand); }
.toc ol { margin: 0 0 2rem 1.2rem; }
.toc a { color: var(--brand); text-decoration: none; }
.toc .toc-l2 { list-style: none; margin-left: 1.2rem; }
.toc .toc-l3 { list-style: none; margin-left: 2.4rem; }
.link { color: var(--brand); text-decoration: underline; }
h1.section {
  color: var(--brand);
  border-bottom: 2px solid var(--brand);
  padding-bottom: 0.3rem;
  margin-top: 2.5rem;
}
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th {
  background: var(--brand);
  color: #fff;
  padding: 0.45rem 0.6rem;
  font-weight: 600;
}
td { padding: 0.4rem 0.6rem; border-bottom: 1px solid #dde3ea; }
tbody tr:nth-child(even) { background: #f3f6fa; }
th.left, td.left { text-align: left; }
th.center, td.center { text-align: center; }
th.right, td.right { text-align: right; }
code {
  font-family: Consolas, monospace;
  background: #eef1f5;
  padding: 0.1rem 0.3rem;
  border-radius: 3px;
}
hr { border: none; border-top: 1px solid #c9d2dc; margin: 1.5rem 0; }
.page-break { height: 0; }
@media print {
  body { max-width: none; padding: 0; }
  .page-break { page-break-after: always; }
  h1.section { page-break-before: always; }
  tr { page-break-inside: avoid; }
}
"#;
