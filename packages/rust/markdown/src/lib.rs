//! Heading detection and heading-level rewriting for aggregated Markdown.
//!
//! Only ATX heading lines (`#`-prefixed, followed by whitespace) are touched.
//! Everything else is passed through byte-for-byte.

mod headings;

pub use headings::{HEADING_SHIFT, adjust_headings, heading_count, heading_level};
