// src/site/mod.rs
// =============================================================================
// The website as a tree of directories, pages and assets.
//
// Submodules:
// - entity: the tree itself and registration of files and pages
// - resolve: path walking, `..` traversal and directory index fallback
// =============================================================================

mod entity;
mod resolve;

pub use entity::{Entity, EntityId, EntityKind, PageLinks, Website};
pub use resolve::{split_path, INDEX_FILES};
