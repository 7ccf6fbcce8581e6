//! Outline extraction and elaboration.
//!
//! A transcript becomes an ordered sequence of [`OutlinePoint`]s: the
//! extractor drives the gateway once per transcript chunk and parses the
//! semi-structured model output, the elaborator then fills in styled prose
//! for each point.

mod elaborate;
mod extract;
mod markdown;
mod parser;

pub use elaborate::Elaborator;
pub use extract::{split_chunks, OutlineExtractor, DEFAULT_CHUNK_SIZE};
pub use markdown::render_outline;
pub use parser::parse_outline;

use serde::{Deserialize, Serialize};

/// One entry of a two-level outline.
///
/// Identity is positional (its index in the owning sequence). Created by the
/// parser with `content = None`; the elaborator sets `content` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlinePoint {
    /// The main point text.
    pub main_point: String,
    /// Sub-points in order of first appearance in the model output.
    pub sub_points: Vec<String>,
    /// Elaborated prose, filled in after extraction.
    pub content: Option<String>,
}

impl OutlinePoint {
    /// Create a new point with no sub-points and no content.
    pub fn new(main_point: impl Into<String>) -> Self {
        Self {
            main_point: main_point.into(),
            sub_points: Vec::new(),
            content: None,
        }
    }

    /// Sub-points joined for prompt building.
    pub fn sub_points_joined(&self) -> String {
        self.sub_points.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_point_has_no_content() {
        let point = OutlinePoint::new("Start with why");
        assert_eq!(point.main_point, "Start with why");
        assert!(point.sub_points.is_empty());
        assert!(point.content.is_none());
    }

    #[test]
    fn test_sub_points_joined() {
        let mut point = OutlinePoint::new("Trust");
        point.sub_points.push("Safety".to_string());
        point.sub_points.push("Belonging".to_string());
        assert_eq!(point.sub_points_joined(), "Safety, Belonging");
    }
}
