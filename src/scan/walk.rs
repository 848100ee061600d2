// src/scan/walk.rs
// =============================================================================
// Walks a site directory and registers what it finds.
//
// Files are visited in sorted order, hidden ones included, so repeated runs
// register (and report) things the same way. Symlinked files are registered
// under the link's own name.
// =============================================================================

use std::fs;
use std::path::{Component, Path};

use anyhow::{Context, Result};
use jwalk::WalkDir;
use tracing::{debug, info, warn};

use crate::site::Website;

/// Extensions of files that get parsed as HTML pages.
pub const DOCUMENT_EXTENSIONS: [&str; 3] = ["html", "htm", "tmpl"];

/// Builds a `Website` from every file under `root`.
pub fn load_website(root: &Path) -> Result<Website> {
    let metadata =
        fs::metadata(root).with_context(|| format!("cannot read '{}'", root.display()))?;
    anyhow::ensure!(metadata.is_dir(), "'{}' is not a directory", root.display());

    let mut site = Website::new();
    let mut pages = 0;
    let mut files = 0;

    for entry in WalkDir::new(root).sort(true).skip_hidden(false) {
        let entry = entry.with_context(|| format!("failed to walk '{}'", root.display()))?;
        let path = entry.path();
        if !is_site_file(entry.file_type(), &path) {
            continue;
        }

        let name = site_path(root, &path)?;

        if is_document(&path) {
            let bytes = fs::read(&path)
                .with_context(|| format!("failed to read '{}'", path.display()))?;
            let html = String::from_utf8_lossy(&bytes);
            site.register_html(&name, &html)
                .with_context(|| format!("failed to register page '{name}'"))?;
            pages += 1;
        } else {
            site.register_file(&name)
                .with_context(|| format!("failed to register file '{name}'"))?;
            files += 1;
        }
        debug!(entity = %name, "loaded");
    }

    info!(root = %root.display(), pages, files, "website loaded");
    Ok(site)
}

// Regular files count, and so do symlinks whose target is a file. Linked
// directories are not descended into.
fn is_site_file(file_type: fs::FileType, path: &Path) -> bool {
    if file_type.is_file() {
        return true;
    }
    if !file_type.is_symlink() {
        return false;
    }
    match fs::metadata(path) {
        Ok(target) => target.is_file(),
        Err(error) => {
            warn!(path = %path.display(), %error, "skipping dangling symlink");
            false
        }
    }
}

/// Whether `path` should be parsed as an HTML page.
pub fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
}

/// The `/`-separated name of `path` relative to `root`.
pub fn site_path(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).with_context(|| {
        format!("'{}' is not under '{}'", path.display(), root.display())
    })?;

    let segments: Vec<_> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect();
    Ok(segments.join("/"))
}
