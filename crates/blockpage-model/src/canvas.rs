//! Canvas editing state.
//!
//! Every edit returns a new [`Canvas`] and leaves the original untouched, so the editor can
//! keep previous states around and transitions are easy to test.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind};
use crate::style::Style;

/// The ordered list of components that make up a page.
///
/// List order is rendering and export order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Canvas {
    components: Vec<Component>,
}

/// An edit to a single component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComponentUpdate {
    /// Replacement content
    #[serde(default)]
    pub content: Option<String>,

    /// Style edits, merged over the existing style
    #[serde(default)]
    pub style: Option<Style>,
}

/// A single editing operation, as sent by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CanvasEdit {
    Insert {
        kind: ComponentKind,
        index: usize,
    },
    Move {
        from: usize,
        to: usize,
    },
    Remove {
        index: usize,
    },
    Update {
        index: usize,
        #[serde(default)]
        content: Option<String>,
        #[serde(default)]
        style: Option<Style>,
    },
}

/// Errors that can occur when editing the canvas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("Index {index} out of range for canvas of {len} components")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Duplicate component id: {0}")]
    DuplicateId(String),

    #[error("Cannot place a component of unknown type")]
    UnknownKind,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a canvas from an existing list, rejecting duplicate ids.
    pub fn from_components(components: Vec<Component>) -> Result<Self, CanvasError> {
        let mut seen = HashSet::new();
        for component in &components {
            if !seen.insert(component.id()) {
                return Err(CanvasError::DuplicateId(component.id().to_string()));
            }
        }
        Ok(Self { components })
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Place a new block of `kind` at `index`. `index == len` appends.
    pub fn insert(&self, kind: ComponentKind, index: usize) -> Result<Canvas, CanvasError> {
        if kind == ComponentKind::Unknown {
            return Err(CanvasError::UnknownKind);
        }
        if index > self.len() {
            return Err(self.out_of_range(index));
        }
        let mut components = self.components.clone();
        components.insert(index, Component::new(kind));
        Ok(Canvas { components })
    }

    /// Move the component at `from` so it ends up at `to`.
    pub fn move_component(&self, from: usize, to: usize) -> Result<Canvas, CanvasError> {
        if from >= self.len() {
            return Err(self.out_of_range(from));
        }
        if to >= self.len() {
            return Err(self.out_of_range(to));
        }
        let mut components = self.components.clone();
        let moved = components.remove(from);
        components.insert(to, moved);
        Ok(Canvas { components })
    }

    /// Remove the component at `index`.
    pub fn remove(&self, index: usize) -> Result<Canvas, CanvasError> {
        if index >= self.len() {
            return Err(self.out_of_range(index));
        }
        let mut components = self.components.clone();
        components.remove(index);
        Ok(Canvas { components })
    }

    /// Edit the component at `index`, keeping its id and kind.
    pub fn update(&self, index: usize, update: &ComponentUpdate) -> Result<Canvas, CanvasError> {
        let current = self
            .components
            .get(index)
            .ok_or_else(|| self.out_of_range(index))?;

        let mut edited = current.clone();
        if let Some(content) = &update.content {
            edited = edited.with_content(content.clone());
        }
        if let Some(style) = &update.style {
            edited = edited.with_style(current.style().merged(style));
        }

        let mut components = self.components.clone();
        components[index] = edited;
        Ok(Canvas { components })
    }

    /// Apply one editing operation.
    pub fn apply(&self, edit: &CanvasEdit) -> Result<Canvas, CanvasError> {
        match edit {
            CanvasEdit::Insert { kind, index } => self.insert(*kind, *index),
            CanvasEdit::Move { from, to } => self.move_component(*from, *to),
            CanvasEdit::Remove { index } => self.remove(*index),
            CanvasEdit::Update {
                index,
                content,
                style,
            } => self.update(
                *index,
                &ComponentUpdate {
                    content: content.clone(),
                    style: style.clone(),
                },
            ),
        }
    }

    fn out_of_range(&self, index: usize) -> CanvasError {
        CanvasError::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }
}

impl From<Canvas> for Vec<Component> {
    fn from(canvas: Canvas) -> Self {
        canvas.components
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(canvas: &Canvas) -> Vec<ComponentKind> {
        canvas.components().iter().map(|c| c.kind()).collect()
    }

    fn sample() -> Canvas {
        Canvas::new()
            .insert(ComponentKind::Heading, 0)
            .and_then(|c| c.insert(ComponentKind::Paragraph, 1))
            .and_then(|c| c.insert(ComponentKind::Image, 2))
            .unwrap()
    }

    #[test]
    fn inserts_at_position() {
        let canvas = sample().insert(ComponentKind::Button, 1).unwrap();

        assert_eq!(
            kinds(&canvas),
            vec![
                ComponentKind::Heading,
                ComponentKind::Button,
                ComponentKind::Paragraph,
                ComponentKind::Image,
            ]
        );
    }

    #[test]
    fn insert_leaves_original_untouched() {
        let original = sample();
        let _ = original.insert(ComponentKind::Button, 0).unwrap();

        assert_eq!(original.len(), 3);
    }

    #[test]
    fn insert_past_end_fails() {
        let err = sample().insert(ComponentKind::Button, 4).unwrap_err();

        assert_eq!(err, CanvasError::IndexOutOfRange { index: 4, len: 3 });
    }

    #[test]
    fn moves_component() {
        let canvas = sample();
        let image_id = canvas.components()[2].id().to_string();

        let moved = canvas.move_component(2, 0).unwrap();

        assert_eq!(moved.components()[0].id(), image_id);
        assert_eq!(
            kinds(&moved),
            vec![
                ComponentKind::Image,
                ComponentKind::Heading,
                ComponentKind::Paragraph,
            ]
        );
    }

    #[test]
    fn removes_component() {
        let canvas = sample().remove(1).unwrap();

        assert_eq!(
            kinds(&canvas),
            vec![ComponentKind::Heading, ComponentKind::Image]
        );
    }

    #[test]
    fn update_merges_style_and_keeps_identity() {
        let canvas = sample();
        let id = canvas.components()[0].id().to_string();

        let update = ComponentUpdate {
            content: Some("Hello".to_string()),
            style: Some([("color", "#ff0000")].into_iter().collect()),
        };
        let updated = canvas.update(0, &update).unwrap();
        let heading = &updated.components()[0];

        assert_eq!(heading.id(), id);
        assert_eq!(heading.kind(), ComponentKind::Heading);
        assert_eq!(heading.content(), "Hello");
        assert_eq!(heading.style().get("color"), Some("#ff0000"));
        assert_eq!(heading.style().get("fontSize"), Some("2rem"));
    }

    #[test]
    fn update_without_content_keeps_content() {
        let update = ComponentUpdate {
            content: None,
            style: Some([("fontSize", "3rem")].into_iter().collect()),
        };
        let updated = sample().update(1, &update).unwrap();

        assert_eq!(
            updated.components()[1].content(),
            "Click to edit this paragraph text."
        );
    }

    #[test]
    fn cannot_insert_unknown_kind() {
        let err = Canvas::new().insert(ComponentKind::Unknown, 0).unwrap_err();

        assert_eq!(err, CanvasError::UnknownKind);
    }

    #[test]
    fn applies_edits_from_json() {
        let edits: Vec<CanvasEdit> = serde_json::from_str(
            r##"[
                {"op": "insert", "kind": "button", "index": 0},
                {"op": "insert", "kind": "heading", "index": 1},
                {"op": "move", "from": 1, "to": 0},
                {"op": "update", "index": 1, "content": "Buy now", "style": {"color": "#222222"}},
                {"op": "remove", "index": 0}
            ]"##,
        )
        .unwrap();

        let canvas = edits
            .iter()
            .try_fold(Canvas::new(), |canvas, edit| canvas.apply(edit))
            .unwrap();

        assert_eq!(canvas.len(), 1);
        let button = &canvas.components()[0];
        assert_eq!(button.kind(), ComponentKind::Button);
        assert_eq!(button.content(), "Buy now");
        assert_eq!(button.style().get("color"), Some("#222222"));
        assert_eq!(button.style().get("backgroundColor"), Some("#0070f3"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let a = Component::from_parts("a", ComponentKind::Heading, "x", Style::new());
        let b = Component::from_parts("a", ComponentKind::Button, "y", Style::new());

        let err = Canvas::from_components(vec![a, b]).unwrap_err();

        assert_eq!(err, CanvasError::DuplicateId("a".to_string()));
    }
}
