// src/site/entity.rs
// =============================================================================
// The website's virtual address tree.
//
// Every file and page the caller registers becomes a leaf; directories are
// created on demand for the segments in between. Entities live in a single
// arena owned by `Website` and refer to each other by `EntityId`:
// - children: owned, keyed by segment name
// - parent: a plain back-reference, used for `..` and full path building
//
// Nothing is removed or mutated once registration is done, so ids stay
// valid for the lifetime of the `Website`.
// =============================================================================

use std::collections::BTreeMap;

use tracing::debug;

use super::resolve::split_path;
use crate::error::RegisterError;

/// Index of an entity inside its `Website`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

/// References and ids pulled out of a single HTML page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// Raw reference strings in document order.
    pub references: Vec<String>,
    /// How many times each `id` value was declared on the page.
    pub ids: BTreeMap<String, usize>,
}

impl PageLinks {
    pub fn add_reference(&mut self, reference: impl Into<String>) {
        self.references.push(reference.into());
    }

    pub fn add_id(&mut self, id: impl Into<String>) {
        *self.ids.entry(id.into()).or_insert(0) += 1;
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Ids declared more than once, with their counts.
    pub fn duplicate_ids(&self) -> impl Iterator<Item = (&str, usize)> {
        self.ids
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(id, &count)| (id.as_str(), count))
    }
}

#[derive(Debug, Clone)]
pub enum EntityKind {
    Directory { children: BTreeMap<String, EntityId> },
    /// A non-page asset (image, stylesheet, font...).
    File,
    Page(PageLinks),
}

#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    full_path: String,
    parent: Option<EntityId>,
    kind: EntityKind,
}

impl Entity {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slash-joined path from the root, excluding the root itself.
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntityKind::Directory { .. })
    }

    pub fn child(&self, name: &str) -> Option<EntityId> {
        match &self.kind {
            EntityKind::Directory { children } => children.get(name).copied(),
            _ => None,
        }
    }

    /// Children in name order; empty for leaves.
    pub fn children(&self) -> impl Iterator<Item = EntityId> + '_ {
        let children = match &self.kind {
            EntityKind::Directory { children } => Some(children.values().copied()),
            _ => None,
        };
        children.into_iter().flatten()
    }

    /// Extracted links, only present on pages.
    pub fn links(&self) -> Option<&PageLinks> {
        match &self.kind {
            EntityKind::Page(links) => Some(links),
            _ => None,
        }
    }

    /// True if this entity declares the given `id`. Only pages declare ids.
    pub fn has_id(&self, id: &str) -> bool {
        self.links().is_some_and(|links| links.has_id(id))
    }
}

/// A set of related pages and assets living under one domain.
#[derive(Debug, Clone)]
pub struct Website {
    entities: Vec<Entity>,
}

const ROOT: EntityId = EntityId(0);

impl Default for Website {
    fn default() -> Self {
        Self::new()
    }
}

impl Website {
    /// Creates a website containing only the root directory.
    pub fn new() -> Self {
        let root = Entity {
            name: "/".to_string(),
            full_path: String::new(),
            parent: None,
            kind: EntityKind::Directory {
                children: BTreeMap::new(),
            },
        };
        Self {
            entities: vec![root],
        }
    }

    pub fn root(&self) -> EntityId {
        ROOT
    }

    /// Looks up an entity by id.
    ///
    /// Ids are only handed out by this website, so an id from another
    /// `Website` is a caller bug and panics.
    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    /// Number of entities, the root included.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.len() == 1
    }

    /// Registers a non-page asset (image, font, stylesheet...).
    pub fn register_file(&mut self, path: &str) -> Result<EntityId, RegisterError> {
        self.insert(path, EntityKind::File)
    }

    /// Registers a page along with the links already extracted from it.
    pub fn register_document(
        &mut self,
        path: &str,
        links: PageLinks,
    ) -> Result<EntityId, RegisterError> {
        self.insert(path, EntityKind::Page(links))
    }

    /// Parses raw HTML and registers it as a page.
    pub fn register_html(&mut self, path: &str, html: &str) -> Result<EntityId, RegisterError> {
        let links = crate::checker::extract_page_links(html);
        self.register_document(path, links)
    }

    /// Depth-first walk of the whole tree, root first, children in name
    /// order. Yields each entity with its depth (root = 0).
    pub fn walk(&self) -> impl Iterator<Item = (usize, EntityId)> + '_ {
        let mut stack = vec![(0, ROOT)];
        std::iter::from_fn(move || {
            let (depth, id) = stack.pop()?;
            let children: Vec<_> = self.entity(id).children().collect();
            stack.extend(children.into_iter().rev().map(|child| (depth + 1, child)));
            Some((depth, id))
        })
    }

    /// All page entities, in walk order.
    pub fn pages(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.walk()
            .map(|(_, id)| id)
            .filter(|&id| self.entity(id).links().is_some())
    }

    fn insert(&mut self, path: &str, kind: EntityKind) -> Result<EntityId, RegisterError> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let duplicate = || RegisterError::DuplicateEntity {
            path: path.to_string(),
        };

        // An empty path names the root, which always exists.
        let segments = split_path(path);
        let Some((leaf, dirs)) = segments.split_last() else {
            return Err(duplicate());
        };

        // Failures can only happen while walking existing entities; once a
        // directory has been created, nothing below it can collide.
        let mut current = ROOT;
        for segment in dirs {
            current = match self.entity(current).child(segment) {
                Some(child) if self.entity(child).is_directory() => child,
                Some(_) => return Err(duplicate()),
                None => self.add_child(
                    current,
                    segment,
                    EntityKind::Directory {
                        children: BTreeMap::new(),
                    },
                ),
            };
        }

        if self.entity(current).child(leaf).is_some() {
            return Err(duplicate());
        }

        let id = self.add_child(current, leaf, kind);
        debug!(path = %self.entity(id).full_path, "registered entity");
        Ok(id)
    }

    fn add_child(&mut self, parent: EntityId, name: &str, kind: EntityKind) -> EntityId {
        let id = EntityId(self.entities.len());
        let parent_path = &self.entity(parent).full_path;
        let full_path = if parent_path.is_empty() {
            name.to_string()
        } else {
            format!("{parent_path}/{name}")
        };

        self.entities.push(Entity {
            name: name.to_string(),
            full_path,
            parent: Some(parent),
            kind,
        });

        if let EntityKind::Directory { children } = &mut self.entities[parent.0].kind {
            children.insert(name.to_string(), id);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_website_has_directory_root() {
        let site = Website::new();
        let root = site.entity(site.root());
        assert!(root.is_directory());
        assert_eq!(root.parent(), None);
        assert!(site.is_empty());
    }

    #[test]
    fn test_register_creates_intermediate_directories() {
        let mut site = Website::new();
        let id = site.register_file("assets/img/logo.png").unwrap();

        let logo = site.entity(id);
        assert_eq!(logo.name(), "logo.png");
        assert_eq!(logo.full_path(), "assets/img/logo.png");
        assert!(!logo.is_directory());

        let img = site.entity(logo.parent().unwrap());
        assert!(img.is_directory());
        assert_eq!(img.full_path(), "assets/img");
        assert_eq!(site.len(), 4);
    }

    #[test]
    fn test_leading_slash_and_empty_segments_are_ignored() {
        let mut site = Website::new();
        let id = site.register_file("/blog//post.html").unwrap();
        assert_eq!(site.entity(id).full_path(), "blog/post.html");
    }

    #[test]
    fn test_register_same_path_twice_fails() {
        let mut site = Website::new();
        site.register_file("blog/index.html").unwrap();
        let before = site.len();

        let err = site.register_file("blog/index.html").unwrap_err();
        assert_eq!(
            err,
            RegisterError::DuplicateEntity {
                path: "blog/index.html".to_string()
            }
        );
        assert_eq!(site.len(), before);
    }

    #[test]
    fn test_cannot_register_through_a_file() {
        let mut site = Website::new();
        site.register_file("about.html").unwrap();
        let before = site.len();

        assert!(site.register_file("about.html/team/index.html").is_err());
        assert_eq!(site.len(), before);
    }

    #[test]
    fn test_cannot_register_over_a_directory() {
        let mut site = Website::new();
        site.register_file("blog/index.html").unwrap();
        assert!(site.register_file("blog").is_err());
        assert!(site.register_file("/").is_err());
    }

    #[test]
    fn test_register_document_keeps_links() {
        let mut site = Website::new();
        let mut links = PageLinks::default();
        links.add_reference("style.css");
        links.add_id("top");
        links.add_id("top");

        let id = site.register_document("index.html", links).unwrap();
        let page = site.entity(id).links().unwrap();
        assert_eq!(page.references, vec!["style.css"]);
        assert_eq!(page.duplicate_ids().collect::<Vec<_>>(), vec![("top", 2)]);
        assert!(site.entity(id).has_id("top"));
    }

    #[test]
    fn test_walk_is_depth_first_in_name_order() {
        let mut site = Website::new();
        site.register_file("b.html").unwrap();
        site.register_file("a/z.png").unwrap();
        site.register_file("a/y.png").unwrap();

        let walked: Vec<_> = site
            .walk()
            .map(|(depth, id)| (depth, site.entity(id).full_path().to_string()))
            .collect();
        assert_eq!(
            walked,
            vec![
                (0, "".to_string()),
                (1, "a".to_string()),
                (2, "a/y.png".to_string()),
                (2, "a/z.png".to_string()),
                (1, "b.html".to_string()),
            ]
        );
    }

    #[test]
    fn test_pages_skips_plain_files() {
        let mut site = Website::new();
        site.register_file("logo.png").unwrap();
        site.register_document("index.html", PageLinks::default()).unwrap();

        let pages: Vec<_> = site
            .pages()
            .map(|id| site.entity(id).full_path().to_string())
            .collect();
        assert_eq!(pages, vec!["index.html"]);
    }
}
