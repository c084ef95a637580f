//! Integration tests for the source registry and file conversion.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use unlines::convert::{LineSource, SourceRegistry};
use unlines::error::{Error, Result};
use unlines::{parse_file, BlockType, JsonFormat, LineInput, PageSelection, Region, Unlines};

/// Source reading `|`-separated lines as one region.
struct PipeSource;

impl LineSource for PipeSource {
    fn supported_extensions(&self) -> &[&str] {
        &["psv"]
    }

    fn name(&self) -> &str {
        "pipe"
    }

    fn read_bytes(&self, bytes: &[u8]) -> Result<Vec<Region>> {
        let text = String::from_utf8_lossy(bytes);
        let lines: Vec<LineInput> = text.split('|').map(LineInput::new).collect();
        Ok(vec![Region::from(lines)])
    }
}

const REPORT_TXT: &str =
    "EXECUTIVE SUMMARY\nThe fund grew in\nthe last year.\n\u{000C}Risk Factors\nMarkets fell.\n";

const REPORT_JSON: &str = r#"[
    {"text": "Risk Factors", "page_idx": 0},
    {"text": "Markets fell.", "page_idx": 0},
    {"text": "Revenue 2019 2020", "page_idx": 1},
    {"text": "Net Debt (685,365,480)$ ...", "page_idx": 1}
]"#;

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ==================== Registry Tests ====================

#[test]
fn test_registry_new_is_empty() {
    let registry = SourceRegistry::new();
    assert!(!registry.supports("txt"));
    assert!(registry.supported_extensions().is_empty());
}

#[test]
fn test_registry_register_custom_source() {
    let mut registry = SourceRegistry::with_defaults();
    registry.register(Arc::new(PipeSource));

    assert!(registry.supports("psv"));
    assert!(registry.supports("PSV"));
    assert_eq!(
        registry.get_by_name("pipe").map(|s| s.name().to_string()),
        Some("pipe".to_string())
    );

    let regions = registry
        .read_bytes(b"EXECUTIVE SUMMARY|The fund grew.", "psv")
        .unwrap();
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].len(), 2);
}

#[test]
fn test_registry_unsupported_extension() {
    let registry = SourceRegistry::with_defaults();
    let result = registry.read_path(Path::new("report.docx"));
    assert!(matches!(result, Err(Error::UnsupportedExtension(ext)) if ext == "docx"));
}

// ==================== File Tests ====================

#[test]
fn test_parse_text_file_with_page_breaks() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "report.txt", REPORT_TXT);

    let doc = parse_file(&path).unwrap();
    assert_eq!(doc.region_count, 2);
    assert_eq!(doc.block_count(), 4);
    assert_eq!(doc.blocks[1].block_text, "The fund grew in the last year.");
    assert_eq!(doc.blocks[3].page_idx, 1);
    assert_eq!(doc.blocks[3].header_text.as_deref(), Some("Risk Factors"));
}

#[test]
fn test_parse_json_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "report.json", REPORT_JSON);

    let doc = parse_file(&path).unwrap();
    assert_eq!(doc.region_count, 2);
    assert_eq!(doc.count_of(BlockType::TableRow), 2);
    assert!(doc.blocks[2..].iter().all(|b| b.page_idx == 1));
    assert!(doc.blocks[2..]
        .iter()
        .all(|b| b.header_text.as_deref() == Some("Risk Factors")));
}

#[test]
fn test_parse_file_without_extension_is_sniffed() {
    let dir = TempDir::new().unwrap();
    let text_path = write_file(&dir, "report", REPORT_TXT);
    let json_path = write_file(&dir, "records", REPORT_JSON);

    assert_eq!(parse_file(&text_path).unwrap().block_count(), 4);
    assert_eq!(parse_file(&json_path).unwrap().region_count, 2);
}

#[test]
fn test_invalid_json_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.json", "[{\"text\": ");
    assert!(matches!(parse_file(&path), Err(Error::Json(_))));

    let path = write_file(&dir, "object.json", "{\"text\": \"a\"}");
    assert!(matches!(parse_file(&path), Err(Error::InvalidInput(_))));
}

// ==================== Conversion Tests ====================

#[test]
fn test_convert_file_to_text_with_page_selection() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "report.txt", REPORT_TXT);

    let result = Unlines::new()
        .with_pages(PageSelection::Pages(vec![2]))
        .parse(&path)
        .unwrap();

    assert_eq!(result.to_text().unwrap(), "Risk Factors\n\nMarkets fell.");
    let stats = result.stats();
    assert_eq!(stats.page_count, 2);
    assert_eq!(stats.header_count, 2);
}

#[test]
fn test_convert_file_to_markdown() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "report.json", REPORT_JSON);

    let markdown = Unlines::new().parse(&path).unwrap().to_markdown().unwrap();
    assert!(markdown.starts_with("## Risk Factors\n\nMarkets fell."));
    assert!(markdown.contains("| Revenue | 2019 | 2020 |"));
}

#[test]
fn test_convert_file_to_json() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "report.txt", REPORT_TXT);

    let json = Unlines::new().parse(&path).unwrap().to_json(JsonFormat::Pretty).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["blocks"][0]["block_type"], "header");
    assert_eq!(value["blocks"][1]["header_block_idx"], 0);
    assert_eq!(value["region_count"], 2);
}

#[test]
fn test_convert_bytes_with_sniffing() {
    let result = Unlines::new()
        .parse_bytes(b"EXECUTIVE SUMMARY\nThe fund grew.\n")
        .unwrap();
    assert!(result.to_markdown().unwrap().starts_with("## EXECUTIVE SUMMARY"));
    assert_eq!(result.stats().header_count, 1);
}
