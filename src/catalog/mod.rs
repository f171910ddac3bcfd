//! Message catalog documents.
//!
//! - `entry`: the extracted message triple and quoting helpers
//! - `definitions`: the per-component definitions document (parse/render)
//! - `dictionary`: the shared locale dictionary JSON
//! - `commit`: the staged both-or-neither file commit

pub mod commit;
pub mod definitions;
pub mod dictionary;
pub mod entry;
