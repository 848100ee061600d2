// src/site/resolve.rs
// =============================================================================
// Walks the site tree along a sequence of path segments.
//
// The same walk serves absolute and relative links; only the start differs:
// - absolute ("/blog/post.html"): start at the root
// - relative ("../post.html"): start at the linking page's directory
//
// A walk that ends on a directory lands on its index page, if it has one.
// =============================================================================

use super::entity::{EntityId, Website};

/// Index pages a directory link falls back to, in priority order.
pub const INDEX_FILES: [&str; 3] = ["index.html", "index.htm", "index.tmpl"];

/// Splits a `/`-separated path, dropping empty segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

impl Website {
    /// Follows `components` from `start`.
    ///
    /// `..` moves to the parent (and fails at the root). Any other segment
    /// must name an existing child. Once the segments run out, a leaf is
    /// the answer; a directory resolves to its first index page.
    pub fn resolve(&self, start: EntityId, components: &[&str]) -> Option<EntityId> {
        let mut current = start;
        for &component in components {
            let entity = self.entity(current);
            current = if component == ".." {
                entity.parent()?
            } else {
                entity.child(component)?
            };
        }

        let entity = self.entity(current);
        if !entity.is_directory() {
            return Some(current);
        }
        INDEX_FILES.iter().find_map(|index| entity.child(index))
    }

    /// Resolves a `/`-separated path against the root.
    pub fn resolve_path(&self, path: &str) -> Option<EntityId> {
        self.resolve(self.root(), &split_path(path))
    }
}
