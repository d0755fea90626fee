//! Local text file reader

use super::ToolHandler;
use crate::Result;
use std::io::ErrorKind;
use tracing::debug;

const READ_FILE_PHRASE: &str = "read file";
const TEXT_EXTENSIONS: &[&str] = &[".txt", ".md", ".csv"];

pub struct FileReaderTool;

fn has_text_extension(input: &str) -> bool {
    let trimmed = input.trim_end();
    TEXT_EXTENSIONS.iter().any(|ext| trimmed.ends_with(ext))
}

/// Byte offset of the phrase in `input`, ignoring ASCII case.
fn find_phrase(input: &str) -> Option<usize> {
    let phrase = READ_FILE_PHRASE.as_bytes();
    input.char_indices().map(|(idx, _)| idx).find(|&idx| {
        input
            .as_bytes()
            .get(idx..idx + phrase.len())
            .is_some_and(|window| window.eq_ignore_ascii_case(phrase))
    })
}

fn mentions_read_file(input: &str) -> bool {
    find_phrase(input).is_some()
}

/// "read file notes.txt" -> "notes.txt"; anything else is taken as a path.
fn extract_path(input: &str) -> &str {
    let trimmed = input.trim();
    match find_phrase(trimmed) {
        Some(idx) => trimmed
            .get(idx + READ_FILE_PHRASE.len()..)
            .map(str::trim)
            .unwrap_or(trimmed),
        None => trimmed,
    }
}

#[async_trait::async_trait]
impl ToolHandler for FileReaderTool {
    fn name(&self) -> &str {
        "file_reader"
    }

    fn can_handle(&self, input: &str) -> bool {
        mentions_read_file(input) || has_text_extension(input)
    }

    fn score(&self, input: &str) -> i32 {
        if mentions_read_file(input) {
            10
        } else if has_text_extension(input) {
            8
        } else {
            1
        }
    }

    async fn handle(&self, input: &str) -> Result<String> {
        let path = extract_path(input);
        debug!(path = %path, "Reading file");

        match tokio::fs::read_to_string(path).await {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(format!("File not found: {}", path)),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_handle() {
        let tool = FileReaderTool;
        assert!(tool.can_handle("Read File /tmp/x"));
        assert!(tool.can_handle("notes.md"));
        assert!(tool.can_handle("data.csv "));
        assert!(!tool.can_handle("notes.pdf"));
    }

    #[test]
    fn test_score_tiers() {
        let tool = FileReaderTool;
        assert_eq!(tool.score("read file a.txt"), 10);
        assert_eq!(tool.score("a.txt"), 8);
        assert_eq!(tool.score("a.pdf"), 1);
    }

    #[test]
    fn test_extract_path() {
        assert_eq!(extract_path("read file  ./a.txt "), "./a.txt");
        assert_eq!(extract_path("please READ FILE b.md"), "b.md");
        assert_eq!(extract_path("c.csv"), "c.csv");
    }

    #[test]
    fn test_extract_path_after_non_ascii_prefix() {
        // 'İ' lowercases to a longer byte sequence
        assert_eq!(extract_path("İİİ read file ./ürün.txt"), "./ürün.txt");
        assert_eq!(extract_path("İstanbul: Read File data.csv"), "data.csv");
        assert!(mentions_read_file("İİ READ FILE x"));
        assert!(!mentions_read_file("İİ read fil"));
    }

    #[tokio::test]
    async fn test_missing_file_is_reported_as_text() {
        let out = FileReaderTool
            .handle("read file /definitely/not/here.txt")
            .await
            .unwrap();
        assert_eq!(out, "File not found: /definitely/not/here.txt");
    }
}
