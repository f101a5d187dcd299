use std::fs;
use std::path::Path;

use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::contributor::ContributorRecord;

/// Parses newline-delimited JSON. A leading BOM is ignored, blank lines are
/// skipped and each bad line is dropped on its own; only JSON objects become
/// records.
pub fn parse_ndjson(text: &str) -> Vec<ContributorRecord> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut dropped = 0usize;
    let records: Vec<ContributorRecord> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .filter_map(|(index, line)| match parse_line(line) {
            Some(record) => Some(record),
            None => {
                dropped += 1;
                debug!(target: "app::data", line = index + 1, "skipping unparseable contributor line");
                None
            }
        })
        .collect();

    debug!(target: "app::data", loaded = records.len(), dropped, "parsed contributor data");
    records
}

fn parse_line(line: &str) -> Option<ContributorRecord> {
    match serde_json::from_str::<JsonValue>(line).ok()? {
        value @ JsonValue::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

/// Reads the whole data file. A missing or unreadable file is an error; bad
/// lines inside a readable file are not. Invalid UTF-8 is decoded lossily.
pub fn load_contributors(path: &Path) -> AppResult<Vec<ContributorRecord>> {
    let bytes = fs::read(path).map_err(|err| {
        AppError::data_source(format!("failed to read {}: {err}", path.display()))
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let records = parse_ndjson(&text);
    info!(target: "app::data", path = %path.display(), count = records.len(), "contributors loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn malformed_lines_are_dropped_individually() {
        let text = "{\"name\":\"Al\"}\n{not json\n\n   {\"name\":\"Bob\"}   \n";
        let records = parse_ndjson(text);
        let names: Vec<_> = records.iter().map(|r| r.name_or_empty()).collect();
        assert_eq!(names, ["Al", "Bob"]);
    }

    #[test]
    fn non_object_lines_are_dropped() {
        let records = parse_ndjson("42\n\"text\"\nnull\n[1,2]\n{\"username\":\"x\"}");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].username_or_empty(), "x");
    }

    #[test]
    fn windows_line_endings_are_trimmed() {
        let records = parse_ndjson("{\"name\":\"A\"}\r\n{\"name\":\"B\"}\r\n");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn duplicates_are_kept() {
        let line = "{\"username\":\"twin\"}";
        let records = parse_ndjson(&format!("{line}\n{line}"));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn missing_file_is_a_data_source_error() {
        let dir = tempdir().expect("temp dir");
        let result = load_contributors(&dir.path().join("absent.ndjson"));
        assert!(matches!(result, Err(AppError::DataSource { .. })));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("contributors.ndjson");
        fs::write(&path, "{\"name\":\"Al\"}\n{\"name\":\"Bo\"}\n").unwrap();
        assert_eq!(load_contributors(&path).unwrap().len(), 2);
    }

    #[test]
    fn leading_bom_does_not_drop_the_first_record() {
        let records = parse_ndjson("\u{feff}{\"name\":\"Al\"}\n{\"name\":\"Bob\"}\n");
        let names: Vec<_> = records.iter().map(|r| r.name_or_empty()).collect();
        assert_eq!(names, ["Al", "Bob"]);
    }

    #[test]
    fn invalid_utf8_line_does_not_abort_the_load() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("contributors.ndjson");
        let mut bytes = b"{\"name\":\"Al\"}\n{\"name\":\"B".to_vec();
        bytes.push(0xff);
        bytes.extend_from_slice(b"\"}\n{\"name\":\"Cy\"}\n");
        fs::write(&path, bytes).unwrap();

        let records = load_contributors(&path).expect("load despite bad byte");
        let names: Vec<_> = records.iter().map(|r| r.name_or_empty()).collect();
        assert_eq!(names, ["Al", "B\u{fffd}", "Cy"]);
    }
}
