//! Narrative markdown to document blocks.

use crate::document::DocBlock;
use crate::inline::parse_inline;
use crate::lines::{classify_line, LineKind};

/// Convert narrative text into blocks, one block per non-blank line.
///
/// Blank lines separate content but emit nothing themselves, and adjacent
/// paragraph lines stay separate blocks; the serializer handles spacing.
#[must_use]
pub fn markdown_to_blocks(text: &str) -> Vec<DocBlock> {
    let mut blocks = Vec::new();
    for line in text.lines() {
        match classify_line(line) {
            LineKind::Blank => {}
            LineKind::Heading { level, text } => blocks.push(DocBlock::Heading {
                level,
                runs: parse_inline(&text),
            }),
            LineKind::Bullet { indent, text } => blocks.push(DocBlock::Bullet {
                indent,
                runs: parse_inline(&text),
            }),
            LineKind::Numbered { indent, text } => blocks.push(DocBlock::Numbered {
                indent,
                runs: parse_inline(&text),
            }),
            LineKind::Rule => blocks.push(DocBlock::Rule),
            LineKind::Paragraph { text } => blocks.push(DocBlock::Paragraph {
                runs: parse_inline(&text),
            }),
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::{plain_text, RunStyle};
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_lines_emit_no_block() {
        let text = "# Summary\n\nFirst point.\n\n\nSecond point.\n";
        let blocks = markdown_to_blocks(text);
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], DocBlock::Heading { level: 1, .. }));
        assert!(matches!(blocks[1], DocBlock::Paragraph { .. }));
        assert!(matches!(blocks[2], DocBlock::Paragraph { .. }));
    }

    #[test]
    fn nested_bullets_keep_their_levels() {
        let text = "- top\n    - middle\n        - bottom";
        let blocks = markdown_to_blocks(text);
        let indents: Vec<u8> = blocks
            .iter()
            .map(|b| match b {
                DocBlock::Bullet { indent, .. } => *indent,
                other => panic!("expected bullet, got {other:?}"),
            })
            .collect();
        assert_eq!(indents, vec![0, 1, 2]);
    }

    #[test]
    fn inline_styling_reaches_the_blocks() {
        let blocks = markdown_to_blocks("Deal size was **significant** this quarter.");
        let DocBlock::Paragraph { runs } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(runs[1].style, RunStyle::Bold);
        assert_eq!(plain_text(runs), "Deal size was significant this quarter.");
    }

    #[test]
    fn mixed_document_converts_in_order() {
        let text = "## Outlook\n1. renew early\n2) hold\n---\nDone.";
        let blocks = markdown_to_blocks(text);
        assert!(matches!(blocks[0], DocBlock::Heading { level: 2, .. }));
        assert!(matches!(blocks[1], DocBlock::Numbered { .. }));
        assert!(matches!(blocks[2], DocBlock::Numbered { .. }));
        assert!(matches!(blocks[3], DocBlock::Rule));
        assert!(matches!(blocks[4], DocBlock::Paragraph { .. }));
    }

    #[test]
    fn empty_text_yields_no_blocks() {
        assert!(markdown_to_blocks("").is_empty());
        assert!(markdown_to_blocks("\n\n  \n").is_empty());
    }
}
