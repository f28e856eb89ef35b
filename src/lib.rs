//! Headless editing core for the visual certificate-template editor.
//!
//! This crate owns the document state of one open template: the element
//! list, selection, clipboard, and undo history, plus the pure flattening
//! pass that projects grouped elements into the absolute-coordinate layout
//! document sent to persistence and consumed by the renderer. The host
//! interaction layer is responsible only for translating pointer/keyboard
//! events into calls on [`store::EditorStore`] and for moving documents
//! over HTTP.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | [`store::EditorStore`] — canonical state and every mutation |
//! | [`doc`] | Element model, backgrounds, canvas config, sparse patches |
//! | [`history`] | Bounded linear undo/redo snapshot buffer |
//! | [`flatten`] | Group-transform flattening for save/render |
//! | [`wire`] | Persisted layout document and JSON codec |
//! | [`consts`] | Shared numeric constants (paste offset, page sizes, etc.) |

pub mod consts;
pub mod doc;
pub mod flatten;
pub mod history;
pub mod store;
pub mod wire;
