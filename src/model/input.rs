//! Input-side types: raw lines and the layout regions that hold them.

use serde::{Deserialize, Serialize};

/// Bounding box of a line on its page, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Finite, non-negative coordinates with `x0 <= x1` and `y0 <= y1`.
    pub fn is_valid(&self) -> bool {
        let coords = [self.x0, self.y0, self.x1, self.y1];
        coords.iter().all(|c| c.is_finite() && *c >= 0.0) && self.x0 <= self.x1 && self.y0 <= self.y1
    }
}

/// One raw line as delivered by an upstream layout extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineInput {
    /// Raw text of the line
    pub text: String,

    /// Page the line sits on (0-indexed)
    #[serde(default)]
    pub page_idx: usize,

    /// Position of the line on the page
    #[serde(default)]
    pub bbox: Option<BBox>,

    /// The extractor saw this line as the wrapped tail of a table cell
    #[serde(default)]
    pub continues_cell: bool,
}

impl LineInput {
    /// Create a line on page 0 with no layout metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page_idx: 0,
            bbox: None,
            continues_cell: false,
        }
    }

    /// Set the page index.
    pub fn with_page(mut self, page_idx: usize) -> Self {
        self.page_idx = page_idx;
        self
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Mark the line as the continuation of a table cell.
    pub fn with_continues_cell(mut self, continues_cell: bool) -> Self {
        self.continues_cell = continues_cell;
        self
    }
}

impl From<&str> for LineInput {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for LineInput {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// An ordered run of lines from one layout region (a column, a page, a
/// text box). Regions are classified independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region {
    /// Lines in reading order
    pub lines: Vec<LineInput>,
}

impl Region {
    /// Create an empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a region from raw line texts.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: texts.into_iter().map(LineInput::new).collect(),
        }
    }

    /// Add a line to the region.
    pub fn push(&mut self, line: LineInput) {
        self.lines.push(line);
    }

    /// Number of lines in the region.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the region has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<LineInput>> for Region {
    fn from(lines: Vec<LineInput>) -> Self {
        Self { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_union() {
        let a = BBox::new(10.0, 20.0, 100.0, 30.0);
        let b = BBox::new(5.0, 32.0, 90.0, 42.0);
        assert_eq!(a.union(&b), BBox::new(5.0, 20.0, 100.0, 42.0));
    }

    #[test]
    fn test_bbox_validity() {
        assert!(BBox::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!BBox::new(-1.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!BBox::new(0.0, 0.0, f32::NAN, 1.0).is_valid());
        assert!(!BBox::new(5.0, 0.0, 1.0, 1.0).is_valid());
    }

    #[test]
    fn test_line_input_defaults_from_json() {
        let line: LineInput = serde_json::from_str(r#"{"text": "Hello"}"#).unwrap();
        assert_eq!(line, LineInput::new("Hello"));

        let line: LineInput = serde_json::from_str(
            r#"{"text": "x", "page_idx": 2, "bbox": {"x0": 1, "y0": 2, "x1": 3, "y1": 4}, "continues_cell": true}"#,
        )
        .unwrap();
        assert_eq!(line.page_idx, 2);
        assert!(line.continues_cell);
        assert_eq!(line.bbox, Some(BBox::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_region_is_a_json_array() {
        let region = Region::from_texts(["a", "b"]);
        let json = serde_json::to_string(&region).unwrap();
        assert!(json.starts_with('['));
        let back: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
    }
}
