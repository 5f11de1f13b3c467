//! Page metadata records consumed by the document head renderer.

use serde::{Deserialize, Serialize};

/// Title used when a slug does not resolve
pub const NOT_FOUND_TITLE: &str = "Post Not Found";

/// Image reference in a social preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewImage {
    pub url: String,
}

/// Social-preview fields (Open Graph)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,

    /// Zero or one image; never a placeholder
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<PreviewImage>,
}

/// Document head metadata for a single page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,
}

impl Metadata {
    /// Generic metadata for a slug that did not resolve
    pub fn not_found() -> Self {
        Self {
            title: NOT_FOUND_TITLE.to_string(),
            description: None,
            open_graph: None,
        }
    }

    /// Social preview image URL, if any
    pub fn preview_image(&self) -> Option<&str> {
        self.open_graph
            .as_ref()
            .and_then(|og| og.images.first())
            .map(|img| img.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_serializes_title_only() {
        let json = serde_json::to_value(Metadata::not_found()).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "Post Not Found" }));
    }

    #[test]
    fn test_empty_images_are_omitted() {
        let meta = Metadata {
            title: "T".to_string(),
            description: Some("D".to_string()),
            open_graph: Some(OpenGraph {
                title: "T".to_string(),
                description: "D".to_string(),
                images: Vec::new(),
            }),
        };

        let json = serde_json::to_value(&meta).unwrap();
        assert!(json["open_graph"].get("images").is_none());
        assert_eq!(meta.preview_image(), None);
    }
}
