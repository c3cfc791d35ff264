//! Component model for the blockpage page builder.
//!
//! A page under construction is a [`Canvas`]: an ordered list of [`Component`]s, each one a
//! heading, paragraph, button or image carrying its content and a [`Style`] mapping. The
//! default content and style for each kind live here so the editor and the exporter agree.

pub mod canvas;
pub mod component;
pub mod document;
pub mod style;

pub use canvas::{Canvas, CanvasEdit, CanvasError, ComponentUpdate};
pub use component::{Component, ComponentKind, UnknownKind, PLACEHOLDER_IMAGE_URL};
pub use document::{load_canvas, parse_canvas, DocumentFormat, LoadError};
pub use style::{to_css_property, Style};
