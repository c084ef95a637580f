//! JSON line record source.
//!
//! Two layouts are accepted:
//!
//! - an array of regions, each an array of line records;
//! - a flat array of line records, split into regions where `page_idx`
//!   changes.
//!
//! A line record is either a string or an object with a `text` field and
//! optional `page_idx`, `bbox` and `continues_cell`. Malformed optional
//! fields fall back to their defaults.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{BBox, LineInput, Region};

use super::LineSource;

/// Reads JSON line records.
#[derive(Debug, Clone, Default)]
pub struct JsonSource {
    _private: (),
}

impl JsonSource {
    /// Registry name of this source.
    pub const NAME: &'static str = "json";

    /// Create a new JSON source.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Read regions from a parsed JSON value.
    pub fn read_value(&self, value: &Value) -> Result<Vec<Region>> {
        let items = value
            .as_array()
            .ok_or_else(|| Error::InvalidInput("expected a JSON array of lines or regions".into()))?;

        if !items.is_empty() && items.iter().all(Value::is_array) {
            return items
                .iter()
                .enumerate()
                .map(|(page_idx, region)| read_region(region, page_idx))
                .collect();
        }

        let lines = items
            .iter()
            .enumerate()
            .map(|(i, item)| read_line(item, i, 0))
            .collect::<Result<Vec<_>>>()?;
        Ok(group_by_page(lines))
    }
}

impl LineSource for JsonSource {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn read_bytes(&self, bytes: &[u8]) -> Result<Vec<Region>> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(bytes);
        let value: Value = serde_json::from_slice(bytes)?;
        self.read_value(&value)
    }
}

fn read_region(value: &Value, page_idx: usize) -> Result<Region> {
    let items = value
        .as_array()
        .ok_or_else(|| Error::InvalidInput("region is not an array".into()))?;
    let lines = items
        .iter()
        .enumerate()
        .map(|(i, item)| read_line(item, i, page_idx))
        .collect::<Result<Vec<_>>>()?;
    Ok(Region::from(lines))
}

/// Decode one line record; `default_page` applies when the record has none.
fn read_line(value: &Value, position: usize, default_page: usize) -> Result<LineInput> {
    let record = match value {
        Value::String(text) => return Ok(LineInput::new(text.as_str()).with_page(default_page)),
        Value::Object(record) => record,
        _ => {
            return Err(Error::InvalidInput(format!(
                "line {} is neither a string nor an object",
                position
            )))
        }
    };

    let text = record
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::InvalidInput(format!("line {} has no text", position)))?;
    let mut line = LineInput::new(text);

    line.page_idx = match record.get("page_idx") {
        None | Some(Value::Null) => default_page,
        Some(v) => match v.as_u64().and_then(|n| usize::try_from(n).ok()) {
            Some(page) => page,
            None => {
                log::debug!("Line {}: ignoring page_idx {}", position, v);
                default_page
            }
        },
    };

    line.bbox = match record.get("bbox") {
        None | Some(Value::Null) => None,
        Some(v) => match serde_json::from_value::<BBox>(v.clone()) {
            Ok(bbox) => Some(bbox),
            Err(e) => {
                log::debug!("Line {}: ignoring bbox {}: {}", position, v, e);
                None
            }
        },
    };

    line.continues_cell = record
        .get("continues_cell")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(line)
}

fn group_by_page(lines: Vec<LineInput>) -> Vec<Region> {
    let mut regions: Vec<Region> = Vec::new();
    let mut current_page = None;
    for line in lines {
        if current_page != Some(line.page_idx) {
            current_page = Some(line.page_idx);
            regions.push(Region::new());
        }
        if let Some(region) = regions.last_mut() {
            region.push(line);
        }
    }
    regions
}
