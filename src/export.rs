//! Plain-text load order export.
//!
//! Format: one mod id per line, each line terminated by `\n`, no header and
//! nothing after the last id. Existing consumers depend on this byte layout.

use anyhow::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Render a load order in the export format.
pub fn format_load_order<S: AsRef<str>>(order: &[S]) -> String {
    let mut out = String::with_capacity(order.iter().map(|id| id.as_ref().len() + 1).sum());
    for id in order {
        out.push_str(id.as_ref());
        out.push('\n');
    }
    out
}

/// Parse an exported load order (or any one-id-per-line selection file).
///
/// Blank lines are skipped and surrounding whitespace trimmed, so files
/// edited by hand or saved with CRLF line endings still load.
pub fn parse_load_order(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Write a load order to disk atomically.
///
/// Uses a temporary file in the same directory as `target_path`, then
/// renames it over the target, so an interrupted export never leaves a
/// partial file.
pub fn write_load_order<S: AsRef<str>>(order: &[S], target_path: &Path) -> Result<()> {
    let content = format_load_order(order);

    let parent = match target_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;
    temp.persist(target_path)?;

    info!("Wrote {} mod ids to {:?}", order.len(), target_path);
    Ok(())
}

/// Read a one-id-per-line file.
pub fn read_load_order(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_load_order(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_is_one_id_per_line_with_trailing_newline() {
        let order = ["2850232250", "123", "abc"];
        assert_eq!(format_load_order(&order), "2850232250\n123\nabc\n");
    }

    #[test]
    fn test_format_empty_order_is_empty() {
        let order: [&str; 0] = [];
        assert_eq!(format_load_order(&order), "");
    }

    #[test]
    fn test_parse_skips_blank_lines_and_crlf() {
        let parsed = parse_load_order("a\r\n\r\n  b  \nc");
        assert_eq!(parsed, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_write_is_byte_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exports").join("load_order.txt");

        write_load_order(&["X", "Y", "Z"], &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, b"X\nY\nZ\n");
        assert_eq!(read_load_order(&path).unwrap(), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("load_order.txt");
        std::fs::write(&path, "old\nentries\nthat\nare\nlonger\n").unwrap();

        write_load_order(&["new"], &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }
}
