// src/lib.rs
// =============================================================================
// linkup catches broken links in a static website.
//
// The site is modeled as a tree of directories, pages and assets. Every
// reference a page makes (href, src, srcset, same-page anchors) is checked
// against that tree; external URLs are pinged.
//
// Modules:
// - site: the address tree and path resolution
// - checker: link extraction, classification, validation and pinging
// - scan: loading a site from a directory on disk
// - error: registration and link error types
// =============================================================================

pub mod checker;
pub mod error;
pub mod scan;
pub mod site;

pub use checker::{HttpPinger, Pinger, ValidateOptions};
pub use error::{LinkError, RegisterError};
pub use site::Website;
