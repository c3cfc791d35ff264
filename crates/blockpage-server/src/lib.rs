//! HTTP surface for the blockpage editor.
//!
//! Accepts a component list from the browser editor and answers with the exported site
//! archive as a file download. Also exposes the shared per-kind defaults and stateless
//! canvas edits so the editor never keeps its own copy of them.

pub mod server;

pub use server::{
    router, ApiError, AppState, ExportServer, ServerConfig, ServerError, EXPORT_BODY_LIMIT,
};
