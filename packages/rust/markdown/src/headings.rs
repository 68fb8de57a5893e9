//! Heading-level rewriting.
//!
//! A heading line is: start of line, one or more `#`, at least one
//! non-newline whitespace character, then the rest of the line. The rule is
//! purely textual, so `#` lines inside fenced code blocks are shifted too.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, trace};

/// Levels added to every heading of an aggregated file: one for the document
/// title, one for the section heading, one for the file heading.
pub const HEADING_SHIFT: i32 = 3;

static HEADING_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#+)([^\S\n]+.*)$").expect("valid regex"));

static HEADING_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#+)[^\S\n]").expect("valid regex"));

/// Depth of the first heading in `content`, or 0 when there is none.
pub fn heading_level(content: &str) -> usize {
    HEADING_PREFIX_RE
        .captures(content)
        .map(|caps| caps[1].len())
        .unwrap_or(0)
}

/// Number of heading lines in `content`.
pub fn heading_count(content: &str) -> usize {
    HEADING_LINE_RE.find_iter(content).count()
}

/// Lengthen the `#` run of every heading line by `shift`.
///
/// A non-positive shift returns the content unchanged. No upper bound is
/// enforced on the resulting depth.
pub fn adjust_headings(content: &str, shift: i32) -> String {
    if shift <= 0 {
        trace!(shift, "non-positive shift, content unchanged");
        return content.to_string();
    }

    let extra = "#".repeat(shift as usize);
    let mut rewritten = 0usize;
    let result = HEADING_LINE_RE
        .replace_all(content, |caps: &Captures| {
            rewritten += 1;
            format!("{}{extra}{}", &caps[1], &caps[2])
        })
        .into_owned();

    debug!(shift, headings = rewritten, "shifted headings");
    result
}
