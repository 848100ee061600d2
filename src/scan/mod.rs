// src/scan/mod.rs
// =============================================================================
// This module loads a website from a directory on disk.
//
// The directory is treated as the root of the domain. Every file under it is
// registered by its `/`-separated path relative to that root:
// - .html, .htm, .tmpl files are parsed and registered as pages
// - everything else (images, styles, fonts...) is registered as a plain file
// =============================================================================

mod walk;

pub use walk::{is_document, load_website, site_path, DOCUMENT_EXTENSIONS};
