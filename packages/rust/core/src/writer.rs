//! Aggregated document writer.
//!
//! Renders sections in key order and files in scan order. A file that
//! cannot be read is replaced by an inline error block; only failures to
//! write the output itself abort the run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use mdaggregate_markdown::{HEADING_SHIFT, adjust_headings, heading_count, heading_level};
use mdaggregate_shared::{CandidateFile, MdAggregateError, Result, SectionMap};

use crate::grouper::section_label;
use crate::pipeline::ProgressReporter;

/// Title of the generated document.
pub const DOCUMENT_TITLE: &str = "Aggregated Markdown Documentation";

/// Trailer written after every file block.
const SEPARATOR: &str = "\n\n---\n\n";

/// Counts produced by a render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub files_written: usize,
    pub sections_written: usize,
    pub unreadable: usize,
}

/// Create (or truncate) `output` and write the aggregated document to it.
#[instrument(skip_all, fields(output = %output.display(), sections = sections.len()))]
pub fn write_document(
    output: &Path,
    sections: &SectionMap,
    progress: &dyn ProgressReporter,
) -> Result<WriteStats> {
    let file = File::create(output).map_err(|e| MdAggregateError::io(output, e))?;
    let mut writer = BufWriter::new(file);

    let output_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stats = render_document(&mut writer, sections, &output_name, progress)
        .map_err(|e| MdAggregateError::io(output, e))?;
    writer.flush().map_err(|e| MdAggregateError::io(output, e))?;

    info!(
        files = stats.files_written,
        sections = stats.sections_written,
        unreadable = stats.unreadable,
        "document written"
    );

    Ok(stats)
}

/// Render the aggregated document into any writer.
///
/// `output_name` is the base name shown in the generation marker.
pub fn render_document<W: Write>(
    out: &mut W,
    sections: &SectionMap,
    output_name: &str,
    progress: &dyn ProgressReporter,
) -> std::io::Result<WriteStats> {
    let total: usize = sections.values().map(|s| s.files.len()).sum();
    let mut stats = WriteStats::default();

    write!(out, "# {DOCUMENT_TITLE}\n\n")?;
    write!(out, "*Generated on: {output_name}*\n\n")?;

    for section in sections.values() {
        write!(out, "## {}\n\n", section_label(section))?;

        for file in &section.files {
            if !write_file_block(out, file)? {
                stats.unreadable += 1;
            }
            stats.files_written += 1;
            progress.file_written(&file.relative, stats.files_written, total);
        }

        stats.sections_written += 1;
    }

    Ok(stats)
}

/// Write one file's block. Returns `false` when the file was unreadable and
/// a placeholder was written instead.
fn write_file_block<W: Write>(out: &mut W, file: &CandidateFile) -> std::io::Result<bool> {
    write!(out, "### File: {}\n\n", file.file_name())?;
    write!(out, "*Path: {}*\n\n", file.relative)?;

    match read_markdown(&file.path) {
        Ok(content) => {
            // Recorded only; the shift is fixed regardless of the starting depth.
            let level = heading_level(&content);
            debug!(
                path = %file.relative,
                first_heading_level = level,
                headings = heading_count(&content),
                "rewriting headings"
            );
            out.write_all(adjust_headings(&content, HEADING_SHIFT).as_bytes())?;
            out.write_all(SEPARATOR.as_bytes())?;
            Ok(true)
        }
        Err(e) => {
            warn!(path = %file.path.display(), error = %e, "failed to read file");
            write!(out, "**Error reading file: {e}**")?;
            out.write_all(SEPARATOR.as_bytes())?;
            Ok(false)
        }
    }
}

/// Read a file as UTF-8 text with line endings normalized to `\n`.
fn read_markdown(path: &Path) -> std::io::Result<String> {
    let content = std::fs::read_to_string(path)?;
    if content.contains('\r') {
        Ok(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mdaggregate_shared::Section;

    use super::*;
    use crate::pipeline::SilentProgress;

    fn section_map(root: &Path, rels: &[&str]) -> SectionMap {
        let files = rels
            .iter()
            .map(|rel| CandidateFile::new(root, root.join(rel)))
            .collect();
        crate::grouper::group(files)
    }

    fn render(sections: &SectionMap) -> (String, WriteStats) {
        let mut buf = Vec::new();
        let stats = render_document(&mut buf, sections, "out.md", &SilentProgress).unwrap();
        (String::from_utf8(buf).unwrap(), stats)
    }

    #[test]
    fn renders_exact_layout() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.md"), "# Title\n\nHello.").unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        std::fs::write(tmp.path().join("sub/b.md"), "## Sub").unwrap();

        let (doc, stats) = render(&section_map(tmp.path(), &["a.md", "sub/b.md"]));

        let expected = "# Aggregated Markdown Documentation\n\n\
                        *Generated on: out.md*\n\n\
                        ## Root Files\n\n\
                        ### File: a.md\n\n\
                        *Path: a.md*\n\n\
                        #### Title\n\nHello.\n\n---\n\n\
                        ## sub\n\n\
                        ### File: b.md\n\n\
                        *Path: sub/b.md*\n\n\
                        ##### Sub\n\n---\n\n";
        assert_eq!(doc, expected);
        assert_eq!(
            stats,
            WriteStats {
                files_written: 2,
                sections_written: 2,
                unreadable: 0
            }
        );
    }

    #[test]
    fn empty_map_renders_header_only() {
        let (doc, stats) = render(&SectionMap::new());
        assert_eq!(
            doc,
            "# Aggregated Markdown Documentation\n\n*Generated on: out.md*\n\n"
        );
        assert_eq!(stats, WriteStats::default());
    }

    #[test]
    fn nested_section_label_uses_hierarchy_marker() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("guide/api")).unwrap();
        std::fs::write(tmp.path().join("guide/api/ref.md"), "text").unwrap();

        let (doc, _) = render(&section_map(tmp.path(), &["guide/api/ref.md"]));
        assert!(doc.contains("## guide > api\n\n"));
        assert!(doc.contains("*Path: guide/api/ref.md*"));
    }

    #[test]
    fn unreadable_file_becomes_placeholder_and_run_continues() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.md"), [0xff, 0xfe, 0x00, 0x41]).unwrap();
        std::fs::write(tmp.path().join("b.md"), "# Fine").unwrap();

        let (doc, stats) = render(&section_map(tmp.path(), &["a.md", "b.md"]));

        assert_eq!(doc.matches("**Error reading file: ").count(), 1);
        assert_eq!(doc.matches("### File: a.md").count(), 1);
        assert!(doc.contains("#### Fine"));
        assert_eq!(doc.matches("\n---\n").count(), 2);
        assert_eq!(stats.files_written, 2);
        assert_eq!(stats.unreadable, 1);
    }

    #[test]
    fn vanished_file_becomes_placeholder() {
        let root = PathBuf::from("/nonexistent-mdaggregate-root");
        let mut sections = SectionMap::new();
        let mut section = Section::new(".");
        section
            .files
            .push(CandidateFile::new(&root, root.join("gone.md")));
        sections.insert(".".into(), section);

        let (doc, stats) = render(&sections);
        assert!(doc.contains("### File: gone.md\n\n*Path: gone.md*\n\n**Error reading file: "));
        assert!(doc.ends_with("**\n\n---\n\n"));
        assert_eq!(stats.unreadable, 1);
    }

    #[test]
    fn crlf_is_normalized_before_rewriting() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("win.md"), "# Win\r\nline\r\n").unwrap();

        let (doc, _) = render(&section_map(tmp.path(), &["win.md"]));
        assert!(doc.contains("#### Win\nline\n\n\n---\n\n"));
        assert!(!doc.contains('\r'));
    }

    #[test]
    fn write_document_overwrites_existing_output() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.md"), "# A").unwrap();
        let output = tmp.path().join("result.md");
        std::fs::write(&output, "stale content that is longer than nothing").unwrap();

        let stats =
            write_document(&output, &section_map(tmp.path(), &["a.md"]), &SilentProgress).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("# Aggregated Markdown Documentation\n\n*Generated on: result.md*"));
        assert!(!written.contains("stale"));
        assert_eq!(stats.files_written, 1);
    }

    #[test]
    fn write_document_fails_for_unwritable_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("missing-dir").join("out.md");

        let err = write_document(&output, &SectionMap::new(), &SilentProgress).unwrap_err();
        assert!(matches!(err, MdAggregateError::Io { .. }));
    }
}
