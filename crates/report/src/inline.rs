//! Inline styling for a single line of text.
//!
//! One regex alternation handles the whole grammar: bold, italic, code,
//! link, in that priority. Matches are non-greedy and never cross lines.
//! Nesting is deliberately not supported; `**a*b*c**` is one bold run with
//! the inner stars kept as literal text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(.+?)\*\*|\*(.+?)\*|`(.+?)`|\[(.+?)\]\((.+?)\)").unwrap()
});

/// Style of one run. `Link` keeps only the visual treatment; the url is
/// consumed by the parse and dropped, since the report is a document, not
/// a page of working hyperlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStyle {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
}

/// A stretch of text with one style applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledRun {
    pub text: String,
    pub style: RunStyle,
}

impl StyledRun {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::Plain,
        }
    }

    #[must_use]
    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Split a line into styled runs. Unmarked stretches come back as plain
/// runs; a line with no markup is a single plain run, so output is never
/// empty.
#[must_use]
pub fn parse_inline(line: &str) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    let mut cursor = 0;

    for caps in INLINE.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > cursor {
            runs.push(StyledRun::plain(&line[cursor..whole.start()]));
        }
        let run = if let Some(bold) = caps.get(1) {
            StyledRun::styled(bold.as_str(), RunStyle::Bold)
        } else if let Some(italic) = caps.get(2) {
            StyledRun::styled(italic.as_str(), RunStyle::Italic)
        } else if let Some(code) = caps.get(3) {
            StyledRun::styled(code.as_str(), RunStyle::Code)
        } else {
            // Group 5 is the url; matched and discarded.
            StyledRun::styled(&caps[4], RunStyle::Link)
        };
        runs.push(run);
        cursor = whole.end();
    }

    if cursor < line.len() {
        runs.push(StyledRun::plain(&line[cursor..]));
    }
    if runs.is_empty() {
        runs.push(StyledRun::plain(line));
    }
    runs
}

/// Concatenated text of all runs, markup stripped.
#[must_use]
pub fn plain_text(runs: &[StyledRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn unmarked_text_is_one_plain_run() {
        assert_eq!(parse_inline("just words"), vec![StyledRun::plain("just words")]);
    }

    #[test]
    fn bold_italic_pair_splits_into_three_runs() {
        assert_eq!(
            parse_inline("**bold** and *italic*"),
            vec![
                StyledRun::styled("bold", RunStyle::Bold),
                StyledRun::plain(" and "),
                StyledRun::styled("italic", RunStyle::Italic),
            ]
        );
    }

    #[test]
    fn bold_italic_code_and_link_all_parse() {
        let runs = parse_inline("a **b** c *d* e `f` g [h](http://x) i");
        assert_eq!(
            runs,
            vec![
                StyledRun::plain("a "),
                StyledRun::styled("b", RunStyle::Bold),
                StyledRun::plain(" c "),
                StyledRun::styled("d", RunStyle::Italic),
                StyledRun::plain(" e "),
                StyledRun::styled("f", RunStyle::Code),
                StyledRun::plain(" g "),
                StyledRun::styled("h", RunStyle::Link),
                StyledRun::plain(" i"),
            ]
        );
    }

    #[test]
    fn link_urls_are_dropped_from_the_output() {
        let runs = parse_inline("see [the docs](https://example.com/a?b=c)");
        assert_eq!(
            runs,
            vec![
                StyledRun::plain("see "),
                StyledRun::styled("the docs", RunStyle::Link),
            ]
        );
        assert!(!plain_text(&runs).contains("example.com"));
    }

    #[test]
    fn bold_wins_over_italic_and_keeps_inner_stars_literal() {
        let runs = parse_inline("**a*b*c**");
        assert_eq!(runs, vec![StyledRun::styled("a*b*c", RunStyle::Bold)]);
    }

    #[test]
    fn matching_is_non_greedy() {
        let runs = parse_inline("`one` and `two`");
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].style, RunStyle::Code);
        assert_eq!(runs[0].text, "one");
        assert_eq!(runs[2].text, "two");
    }

    #[test]
    fn unclosed_markers_stay_literal() {
        assert_eq!(
            parse_inline("half **open"),
            vec![StyledRun::plain("half **open")]
        );
        assert_eq!(
            parse_inline("[text](unclosed"),
            vec![StyledRun::plain("[text](unclosed")]
        );
    }

    #[test]
    fn output_is_never_empty() {
        assert_eq!(parse_inline(""), vec![StyledRun::plain("")]);
    }

    #[test]
    fn plain_text_strips_markup() {
        let runs = parse_inline("**Total:** `42` units");
        assert_eq!(plain_text(&runs), "Total: 42 units");
    }

    proptest! {
        /// Marker-free text always survives as exactly one plain run.
        #[test]
        fn marker_free_text_round_trips(s in "[a-zA-Z0-9 ,.;:!?-]{1,60}") {
            // Dashes never start a run on their own and the alphabet has no
            // inline markers, so the parser must pass the text through.
            let runs = parse_inline(&s);
            prop_assert_eq!(runs.len(), 1);
            prop_assert_eq!(&runs[0].text, &s);
            prop_assert_eq!(runs[0].style, RunStyle::Plain);
        }

        /// Parsing never loses characters outside the markers themselves.
        #[test]
        fn plain_text_is_a_subsequence(s in ".{0,80}") {
            let line = s.replace('\n', " ");
            let joined = plain_text(&parse_inline(&line));
            prop_assert!(joined.len() <= line.len());
        }
    }
}
