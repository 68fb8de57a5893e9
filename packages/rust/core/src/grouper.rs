//! Section grouping.
//!
//! Each file belongs to the section of its immediate parent directory only.
//! Nested directories are separate sections, never merged into ancestors.

use tracing::{debug, instrument};

use mdaggregate_shared::{CandidateFile, Section, SectionMap};

/// Heading text used for the root section.
pub const ROOT_SECTION_LABEL: &str = "Root Files";

/// Separator shown between directory levels in section headings.
const LABEL_SEPARATOR: &str = " > ";

/// Partition scanned files into sections keyed by relative directory.
///
/// Files keep the order they arrive in, which is the scanner's path order.
#[instrument(skip_all, fields(files = files.len()))]
pub fn group(files: Vec<CandidateFile>) -> SectionMap {
    let mut sections = SectionMap::new();

    for file in files {
        sections
            .entry(file.section_key.clone())
            .or_insert_with_key(|key| Section::new(key.as_str()))
            .files
            .push(file);
    }

    debug!(sections = sections.len(), "grouped files into sections");
    sections
}

/// Human-readable heading for a section.
///
/// Two keys can render to the same label (`a > b` literally vs `a/b`); they
/// still remain separate sections.
pub fn section_label(section: &Section) -> String {
    if section.is_root() {
        ROOT_SECTION_LABEL.to_string()
    } else {
        section.key.replace('/', LABEL_SEPARATOR)
    }
}
