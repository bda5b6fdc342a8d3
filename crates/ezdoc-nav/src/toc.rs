//! Table of contents extraction.
//!
//! Collects level 2 to 4 ATX headings from raw Markdown, ignoring anything
//! inside fenced code blocks. Level 1 is the document title and is left out.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::TocItem;

/// Heading line with 2 to 4 leading hashes.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{2,4})\s+(.+)$").unwrap());

/// Opening or closing code fence.
const FENCE: &str = "```";

/// Id used when a heading's text yields no id characters.
pub const FALLBACK_ID: &str = "section";

/// Extract TOC entries from raw document text.
///
/// Ids are not deduplicated: two headings with the same text share an id.
/// A heading with no text (`"##   "`) has nothing to link to and is skipped.
#[must_use]
pub fn extract_headings(raw: &str) -> Vec<TocItem> {
    let mut in_fence = false;
    let mut items = Vec::new();

    for line in raw.lines() {
        if line.trim_start().starts_with(FENCE) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let Some(caps) = HEADING_RE.captures(line) else {
            continue;
        };
        let text = caps[2].trim();
        if text.is_empty() {
            continue;
        }

        #[allow(clippy::cast_possible_truncation)]
        let depth = caps[1].len() as u8;
        items.push(TocItem {
            depth,
            text: text.to_owned(),
            id: heading_id(text),
        });
    }

    items
}

/// Anchor id for a heading.
///
/// Lowercases, turns each whitespace run into `-`, then keeps only ASCII
/// letters and digits, `_`, `-` and CJK unified ideographs.
///
/// ```
/// use ezdoc_nav::toc::heading_id;
///
/// assert_eq!(heading_id("Getting Started"), "getting-started");
/// assert_eq!(heading_id("安装 指南"), "安装-指南");
/// assert_eq!(heading_id("!!!"), "section");
/// ```
#[must_use]
pub fn heading_id(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            if !in_space {
                id.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' || is_cjk(c) {
            id.push(c);
        }
    }

    if id.is_empty() {
        FALLBACK_ID.to_owned()
    } else {
        id
    }
}

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}
