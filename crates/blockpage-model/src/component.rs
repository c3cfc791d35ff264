//! Components placed on the canvas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::style::{null_as_empty, Style};

/// Image shown for new image blocks and in place of images that cannot be loaded.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://docs.commercetools.com/frontend-studio/static/f01928f2c694c4f3372daf8bdb8d3c28/8201f/empty-page-builder-overview-new.png";

/// The kind of content block.
///
/// Unrecognised type tags deserialize to [`ComponentKind::Unknown`], which renders as
/// nothing instead of failing the whole page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Heading,
    Paragraph,
    Button,
    Image,
    #[serde(other)]
    Unknown,
}

impl ComponentKind {
    /// Every kind that can be placed on the canvas.
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Heading,
        ComponentKind::Paragraph,
        ComponentKind::Button,
        ComponentKind::Image,
    ];

    /// Type tag, also used as the CSS class name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Heading => "heading",
            ComponentKind::Paragraph => "paragraph",
            ComponentKind::Button => "button",
            ComponentKind::Image => "image",
            ComponentKind::Unknown => "unknown",
        }
    }

    /// Content given to a freshly placed block.
    pub fn default_content(&self) -> &'static str {
        match self {
            ComponentKind::Heading => "New Heading",
            ComponentKind::Paragraph => "Click to edit this paragraph text.",
            ComponentKind::Button => "Click Me",
            ComponentKind::Image => PLACEHOLDER_IMAGE_URL,
            ComponentKind::Unknown => "",
        }
    }

    /// Default style for the kind.
    ///
    /// Used both when a block is placed on the canvas and as the base declarations of the
    /// exported per-component CSS rule.
    pub fn default_style(&self) -> Style {
        let pairs: &[(&str, &str)] = match self {
            ComponentKind::Heading => &[
                ("fontSize", "2rem"),
                ("fontWeight", "bold"),
                ("color", "#000000"),
                ("marginBottom", "1rem"),
            ],
            ComponentKind::Paragraph => &[
                ("fontSize", "1rem"),
                ("color", "#666666"),
                ("lineHeight", "1.6"),
                ("marginBottom", "1rem"),
            ],
            ComponentKind::Button => &[
                ("padding", "0.5rem 1rem"),
                ("backgroundColor", "#0070f3"),
                ("color", "#ffffff"),
                ("borderRadius", "0.25rem"),
                ("border", "none"),
            ],
            ComponentKind::Image => &[
                ("maxWidth", "100%"),
                ("height", "auto"),
                ("display", "block"),
                ("marginBottom", "1rem"),
            ],
            ComponentKind::Unknown => &[],
        };
        pairs.iter().copied().collect()
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a type tag that is not a placeable kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown component type: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for ComponentKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// A content block placed on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    id: String,

    #[serde(rename = "type")]
    kind: ComponentKind,

    #[serde(default)]
    content: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    style: Style,
}

impl Component {
    /// Create a block of the given kind with a fresh id and the kind's defaults.
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            id: format!("{}-{}", kind, Uuid::new_v4()),
            kind,
            content: kind.default_content().to_string(),
            style: kind.default_style(),
        }
    }

    /// Assemble a component from explicit parts.
    pub fn from_parts(
        id: impl Into<String>,
        kind: ComponentKind,
        content: impl Into<String>,
        style: Style,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            content: content.into(),
            style,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Copy of this component with different content. Identity and kind are kept.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }

    /// Copy of this component with a different style. Identity and kind are kept.
    pub fn with_style(&self, style: Style) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }

    /// Per-instance class name, `<type>-<index>`.
    pub fn instance_class(&self, index: usize) -> String {
        format!("{}-{}", self.kind, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_component_gets_defaults() {
        let heading = Component::new(ComponentKind::Heading);

        assert!(heading.id().starts_with("heading-"));
        assert_eq!(heading.content(), "New Heading");
        assert_eq!(heading.style().get("fontSize"), Some("2rem"));
    }

    #[test]
    fn ids_are_unique() {
        let a = Component::new(ComponentKind::Button);
        let b = Component::new(ComponentKind::Button);

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn deserializes_unknown_type() {
        let json = r#"{"id": "x", "type": "carousel", "content": "?"}"#;
        let component: Component = serde_json::from_str(json).unwrap();

        assert_eq!(component.kind(), ComponentKind::Unknown);
        assert!(component.style().is_empty());
    }

    #[test]
    fn null_style_becomes_empty() {
        let json = r#"{"id": "x", "type": "heading", "content": "Hi", "style": null}"#;
        let component: Component = serde_json::from_str(json).unwrap();

        assert!(component.style().is_empty());
    }

    #[test]
    fn parses_kind_tags() {
        assert_eq!("image".parse::<ComponentKind>(), Ok(ComponentKind::Image));
        assert!("unknown".parse::<ComponentKind>().is_err());
        assert!("Heading".parse::<ComponentKind>().is_err());
    }

    #[test]
    fn with_content_keeps_identity() {
        let image = Component::new(ComponentKind::Image);
        let resolved = image.with_content("images/image-1.png");

        assert_eq!(resolved.id(), image.id());
        assert_eq!(resolved.kind(), ComponentKind::Image);
        assert_eq!(resolved.content(), "images/image-1.png");
        assert_eq!(image.content(), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn instance_class_uses_position() {
        let p = Component::new(ComponentKind::Paragraph);
        assert_eq!(p.instance_class(3), "paragraph-3");
    }
}
