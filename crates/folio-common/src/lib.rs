pub mod api;
pub mod content;
pub mod content_store;
pub mod editor;
pub mod error;
pub mod ids;
pub mod kv;
pub mod media;
pub mod router;
pub mod section;
pub mod state;
pub mod theme;
