//! Inline markup in body paragraphs and word-limited previews.
//!
//! Paragraphs may carry CommonMark emphasis (`*italic*`, `**bold**`). Only the
//! emphasis delimiters are treated as markup; every other character, list and
//! heading markers, links and HTML included, renders as written.

use super::types::Article;
use crate::util::StyledWord;
use pulldown_cmark::{Event, Parser, Tag};
use std::ops::Range;

/// Inline emphasis carried by a word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Emphasis {
    pub italic: bool,
    pub bold: bool,
}

/// An emphasis span in paragraph source, delimiters included.
struct EmphasisSpan {
    range: Range<usize>,
    delim: usize,
    bold: bool,
}

/// Emphasis spans the parser found, minus those wedged between digits
/// (`3*4*5` stays arithmetic).
fn emphasis_spans(paragraph: &str) -> Vec<EmphasisSpan> {
    let digit_before = |i: usize| {
        paragraph[..i]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit())
    };
    let digit_after = |i: usize| {
        paragraph[i..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    };

    Parser::new(paragraph)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::Emphasis) => Some(EmphasisSpan {
                range,
                delim: 1,
                bold: false,
            }),
            Event::Start(Tag::Strong) => Some(EmphasisSpan {
                range,
                delim: 2,
                bold: true,
            }),
            _ => None,
        })
        .filter(|span| {
            span.range.len() > span.delim * 2
                && paragraph.is_char_boundary(span.range.start)
                && paragraph.is_char_boundary(span.range.end)
                && !digit_before(span.range.start)
                && !digit_after(span.range.end)
        })
        .collect()
}

/// Split a paragraph into words tagged with their emphasis.
///
/// A word that changes emphasis mid-way (`*ground*breaking`) keeps the
/// emphasis of its first part.
pub fn inline_words(paragraph: &str) -> Vec<StyledWord<Emphasis>> {
    let spans = emphasis_spans(paragraph);
    let is_delimiter = |i: usize| {
        spans.iter().any(|s| {
            (s.range.start..s.range.start + s.delim).contains(&i)
                || (s.range.end - s.delim..s.range.end).contains(&i)
        })
    };
    let emphasis_at = |i: usize| {
        spans
            .iter()
            .filter(|s| s.range.contains(&i))
            .fold(Emphasis::default(), |mut e, s| {
                if s.bold {
                    e.bold = true;
                } else {
                    e.italic = true;
                }
                e
            })
    };

    let mut words: Vec<StyledWord<Emphasis>> = Vec::new();
    // True when the next visible character starts a new word
    let mut at_boundary = true;

    for (i, c) in paragraph.char_indices() {
        if is_delimiter(i) {
            continue;
        }
        if c.is_whitespace() {
            at_boundary = true;
            continue;
        }
        match words.last_mut() {
            Some(last) if !at_boundary => last.text.push(c),
            _ => words.push(StyledWord {
                text: c.to_string(),
                style: emphasis_at(i),
            }),
        }
        at_boundary = false;
    }

    words
}

/// Preview length in words, from the article's height hint.
pub fn preview_words(article: &Article) -> usize {
    match article.height_hint {
        Some(600) => 80,
        Some(500) => 64,
        Some(450) => 56,
        Some(350) => 40,
        Some(300) => 32,
        _ => 48,
    }
}

/// Titles of tall articles are set in capitals.
pub fn is_tall(article: &Article) -> bool {
    article.height_hint.is_some_and(|h| h >= 500)
}

/// Styled words of the whole body, one inner `Vec` per paragraph.
pub fn body_words(article: &Article) -> Vec<Vec<StyledWord<Emphasis>>> {
    article.content.iter().map(|p| inline_words(p)).collect()
}

/// The collapsed view of the body: paragraphs cut after
/// [`preview_words`] words in total. Returns the kept paragraphs and whether
/// anything was cut.
pub fn preview_body(article: &Article) -> (Vec<Vec<StyledWord<Emphasis>>>, bool) {
    let mut budget = preview_words(article);
    let mut kept = Vec::new();
    let mut truncated = false;

    for paragraph in body_words(article) {
        if budget == 0 {
            truncated = true;
            break;
        }
        if paragraph.len() > budget {
            kept.push(paragraph.into_iter().take(budget).collect());
            truncated = true;
            break;
        }
        budget -= paragraph.len();
        kept.push(paragraph);
    }

    (kept, truncated)
}

/// Plain-text preview, ending in "…" when the body was cut.
pub fn preview_text(article: &Article) -> String {
    let (paragraphs, truncated) = preview_body(article);
    let mut text = paragraphs
        .iter()
        .flatten()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    if truncated {
        text.push('…');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn article(hint: Option<u16>, content: &[&str]) -> Article {
        Article {
            category: "Test".into(),
            category_color: Default::default(),
            title: "T".into(),
            author: "A".into(),
            content: content.iter().map(|s| s.to_string()).collect(),
            video_id: None,
            height_hint: hint,
            published: None,
        }
    }

    fn words(n: usize) -> String {
        (1..=n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn emphasis_tagged_per_word() {
        let w = inline_words("plain *soft words* and **loud**");
        let tagged: Vec<(&str, Emphasis)> = w.iter().map(|w| (w.text.as_str(), w.style)).collect();
        let italic = Emphasis {
            italic: true,
            bold: false,
        };
        let bold = Emphasis {
            italic: false,
            bold: true,
        };
        assert_eq!(
            tagged,
            vec![
                ("plain", Emphasis::default()),
                ("soft", italic),
                ("words", italic),
                ("and", Emphasis::default()),
                ("loud", bold),
            ]
        );
    }

    #[test]
    fn partial_word_emphasis_glued() {
        let w = inline_words("a *ground*breaking idea");
        let texts: Vec<&str> = w.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "groundbreaking", "idea"]);
        assert!(w[1].style.italic);
    }

    fn texts(paragraph: &str) -> Vec<String> {
        inline_words(paragraph).into_iter().map(|w| w.text).collect()
    }

    #[test]
    fn block_markers_render_literally() {
        assert_eq!(
            texts("2024. A record year"),
            vec!["2024.", "A", "record", "year"]
        );
        assert_eq!(
            texts("# of panels doubled"),
            vec!["#", "of", "panels", "doubled"]
        );
        assert_eq!(texts("- not a list"), vec!["-", "not", "a", "list"]);
    }

    #[test]
    fn links_and_html_render_literally() {
        assert_eq!(
            texts("See [the report](https://example.org/solar) now"),
            vec!["See", "[the", "report](https://example.org/solar)", "now"]
        );
        assert_eq!(
            texts("Read the <b>full</b> story"),
            vec!["Read", "the", "<b>full</b>", "story"]
        );
    }

    #[test]
    fn asterisks_between_digits_are_kept() {
        assert_eq!(
            texts("a factor of 3*4*5 overall"),
            vec!["a", "factor", "of", "3*4*5", "overall"]
        );
        assert!(inline_words("3*4*5")
            .iter()
            .all(|w| w.style == Emphasis::default()));
    }

    #[test]
    fn emphasis_inside_a_numbered_line() {
        let w = inline_words("2024. A *record* year");
        assert_eq!(w[0].text, "2024.");
        assert_eq!(w[2].text, "record");
        assert!(w[2].style.italic);
        assert!(!w[3].style.italic);
    }

    #[test]
    fn preview_word_limits_follow_height_hint() {
        let cases = [
            (Some(600), 80),
            (Some(500), 64),
            (Some(450), 56),
            (Some(350), 40),
            (Some(300), 32),
            (Some(550), 48),
            (None, 48),
        ];
        for (hint, expected) in cases {
            assert_eq!(preview_words(&article(hint, &[])), expected, "{:?}", hint);
        }
    }

    #[test]
    fn preview_cuts_across_paragraphs() {
        let first = words(20);
        let second = words(30);
        let a = article(Some(300), &[&first, &second]);
        let (kept, truncated) = preview_body(&a);
        assert!(truncated);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].len(), 20);
        assert_eq!(kept[1].len(), 12);
        assert!(preview_text(&a).ends_with("w12…"));
    }

    #[test]
    fn short_body_not_truncated() {
        let a = article(None, &["just a few words"]);
        let (kept, truncated) = preview_body(&a);
        assert!(!truncated);
        assert_eq!(kept.len(), 1);
        assert_eq!(preview_text(&a), "just a few words");
    }

    #[test]
    fn exact_budget_not_truncated() {
        let body = words(32);
        let a = article(Some(300), &[&body]);
        assert!(!preview_body(&a).1);
        // A further paragraph after the budget is spent is a cut
        let b = article(Some(300), &[&body, "more"]);
        let (kept, truncated) = preview_body(&b);
        assert!(truncated);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn tall_articles() {
        assert!(is_tall(&article(Some(600), &[])));
        assert!(is_tall(&article(Some(500), &[])));
        assert!(!is_tall(&article(Some(450), &[])));
        assert!(!is_tall(&article(None, &[])));
    }
}
