// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - html: Extracts references and ids from HTML pages
// - classify: Decides what kind of target a reference string names
// - validate: Walks the site and checks every reference on every page
// - http: Pings external URLs
// =============================================================================

mod classify;
mod html;
mod http;
mod validate;

pub use classify::{is_absolute, sanitize, Reference};
pub use html::{extract_document_links, extract_page_links};
pub use http::{HttpPinger, PingError, Pinger, DEFAULT_TIMEOUT};
pub use validate::{probe_all, ExternalLink, ValidateOptions, DEFAULT_CONCURRENCY};
