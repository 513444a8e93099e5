//! Line classification for narrative markdown.
//!
//! One line in, one kind out, first match wins: heading, then bullet, then
//! numbered item, then horizontal rule, then blank, then paragraph. The
//! classifier never fails; anything unrecognized is a paragraph.

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,3})\s+(.*)$").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*•]\s+(.*)$").unwrap());
static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]\s+(.*)$").unwrap());

/// What a single line of narrative text is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `#`, `##`, or `###` with a space after the markers. Level is 1-3.
    Heading { level: u8, text: String },
    /// `-`, `*`, or `•` with a space after the marker.
    Bullet { indent: u8, text: String },
    /// Digits plus `.` or `)` with a space after.
    Numbered { indent: u8, text: String },
    /// Three or more of the same `-`, `*`, or `_` and nothing else.
    Rule,
    /// Whitespace-only. Emits no block downstream.
    Blank,
    Paragraph { text: String },
}

/// Map leading whitespace to a nesting level: 0-3 chars is level 0, 4-7 is
/// level 1, 8+ clamps to level 2. Tabs count as one character each.
#[must_use]
pub fn indent_level(line: &str) -> u8 {
    let width = line.chars().take_while(|c| c.is_whitespace()).count();
    match width {
        0..=3 => 0,
        4..=7 => 1,
        _ => 2,
    }
}

#[must_use]
pub fn classify_line(line: &str) -> LineKind {
    let stripped = line.trim_start();

    if let Some(caps) = HEADING.captures(stripped) {
        return LineKind::Heading {
            level: caps[1].len() as u8,
            text: caps[2].trim().to_string(),
        };
    }
    if let Some(caps) = BULLET.captures(stripped) {
        return LineKind::Bullet {
            indent: indent_level(line),
            text: caps[1].trim_end().to_string(),
        };
    }
    if let Some(caps) = NUMBERED.captures(stripped) {
        return LineKind::Numbered {
            indent: indent_level(line),
            text: caps[1].trim_end().to_string(),
        };
    }
    if is_rule(stripped) {
        return LineKind::Rule;
    }
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    LineKind::Paragraph {
        text: trimmed.to_string(),
    }
}

fn is_rule(stripped: &str) -> bool {
    let trimmed = stripped.trim_end();
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && trimmed.len() >= 3 && chars.all(|c| c == first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn headings_cap_at_three_levels() {
        assert_eq!(
            classify_line("# Title"),
            LineKind::Heading {
                level: 1,
                text: "Title".into()
            }
        );
        assert_eq!(
            classify_line("### Deep"),
            LineKind::Heading {
                level: 3,
                text: "Deep".into()
            }
        );
        // Four markers fail the heading pattern and fall through.
        assert_eq!(
            classify_line("#### Too deep"),
            LineKind::Paragraph {
                text: "#### Too deep".into()
            }
        );
    }

    #[test]
    fn heading_requires_whitespace_after_markers() {
        assert_eq!(
            classify_line("#NoSpace"),
            LineKind::Paragraph {
                text: "#NoSpace".into()
            }
        );
    }

    #[test]
    fn all_three_bullet_markers_work() {
        for marker in ["- item", "* item", "• item"] {
            assert_eq!(
                classify_line(marker),
                LineKind::Bullet {
                    indent: 0,
                    text: "item".into()
                },
                "marker line {marker:?}"
            );
        }
    }

    #[test]
    fn indentation_maps_to_clamped_levels() {
        assert_eq!(indent_level("- x"), 0);
        assert_eq!(indent_level("   - x"), 0);
        assert_eq!(indent_level("    - x"), 1);
        assert_eq!(indent_level("       - x"), 1);
        assert_eq!(indent_level("        - x"), 2);
        assert_eq!(indent_level("                - x"), 2);
        assert_eq!(indent_level("\t- x"), 0);
    }

    #[test]
    fn numbered_items_take_dot_or_paren() {
        assert_eq!(
            classify_line("1. first"),
            LineKind::Numbered {
                indent: 0,
                text: "first".into()
            }
        );
        assert_eq!(
            classify_line("12) twelfth"),
            LineKind::Numbered {
                indent: 0,
                text: "twelfth".into()
            }
        );
    }

    #[test]
    fn rules_need_three_matching_characters_alone() {
        assert_eq!(classify_line("---"), LineKind::Rule);
        assert_eq!(classify_line("_____"), LineKind::Rule);
        assert_eq!(classify_line("***"), LineKind::Rule);
        assert_eq!(
            classify_line("--"),
            LineKind::Paragraph { text: "--".into() }
        );
        assert_eq!(
            classify_line("-*-"),
            LineKind::Paragraph { text: "-*-".into() }
        );
    }

    #[test]
    fn bullets_outrank_rules() {
        // "- -" has a space after the marker, so it is a bullet whose text
        // is a dash, not a rule.
        assert_eq!(
            classify_line("- -"),
            LineKind::Bullet {
                indent: 0,
                text: "-".into()
            }
        );
    }

    #[test]
    fn blank_and_whitespace_lines_classify_blank() {
        assert_eq!(classify_line(""), LineKind::Blank);
        assert_eq!(classify_line("   \t "), LineKind::Blank);
    }
}
