// src/checker/validate.rs
// =============================================================================
// Checks every reference on every page of a `Website`.
//
// How it works:
// 1. Walk the tree; for each page report duplicate ids
// 2. Classify each reference and check the internal ones against the tree
// 3. Collect external URLs and ping them concurrently at the end
//
// Errors are plain data. One broken reference never stops the others from
// being checked, and the full list is returned once everything is done.
// =============================================================================

use futures::future;
use futures::stream::{self, StreamExt};
use tracing::{debug, trace};

use super::classify::{is_absolute, sanitize, Reference};
use super::http::{PingError, Pinger};
use crate::error::LinkError;
use crate::site::{split_path, EntityId, Website};

/// How many external probes may be in flight at once by default.
pub const DEFAULT_CONCURRENCY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Ping external URLs. When false they are skipped entirely.
    pub check_external: bool,
    /// Upper bound on concurrent probes.
    pub concurrency: usize,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            check_external: true,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// An external URL waiting to be pinged, and the page it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    pub page: String,
    pub url: String,
}

impl Website {
    /// Validates every page. All files must be registered first.
    pub async fn validate<P: Pinger>(&self, pinger: &P, options: &ValidateOptions) -> Vec<LinkError> {
        let (mut errors, external) = self.check_internal();

        if options.check_external {
            debug!(count = external.len(), "pinging external links");
            errors.extend(probe_all(pinger, external, options.concurrency).await);
        } else {
            debug!(count = external.len(), "skipping external links");
        }

        errors
    }

    /// Runs every check that does not need the network.
    ///
    /// Returns the errors found so far plus the external links still to be
    /// pinged.
    pub fn check_internal(&self) -> (Vec<LinkError>, Vec<ExternalLink>) {
        let mut errors = Vec::new();
        let mut external = Vec::new();

        for page in self.pages() {
            let before = errors.len();
            self.check_page(page, &mut errors, &mut external);
            trace!(
                page = self.entity(page).full_path(),
                errors = errors.len() - before,
                "checked page"
            );
        }

        (errors, external)
    }

    fn check_page(&self, page: EntityId, errors: &mut Vec<LinkError>, external: &mut Vec<ExternalLink>) {
        let entity = self.entity(page);
        let Some(links) = entity.links() else {
            return;
        };
        let page_path = entity.full_path();

        for (id, count) in links.duplicate_ids() {
            errors.push(LinkError::DuplicateIdentifier {
                page: page_path.to_string(),
                id: id.to_string(),
                count,
            });
        }

        for raw in &links.references {
            let reference = sanitize(raw);
            match Reference::classify(&reference) {
                Reference::External(url) => external.push(ExternalLink {
                    page: page_path.to_string(),
                    url: url.to_string(),
                }),
                Reference::EmptyFragment => errors.push(LinkError::IncompleteFragment {
                    page: page_path.to_string(),
                }),
                Reference::Root => {}
                Reference::SamePage { fragment } => {
                    if !links.has_id(fragment) {
                        errors.push(LinkError::BrokenSamePageLink {
                            page: page_path.to_string(),
                            reference: reference.clone(),
                        });
                    }
                }
                Reference::Path { path, fragment } => {
                    if let Some(error) = self.check_path(page, path, fragment) {
                        errors.push(error);
                    }
                }
            }
        }
    }

    // Resolves `path` from the root or from the page's directory, then looks
    // for `fragment` among the target's ids.
    fn check_path(&self, page: EntityId, path: &str, fragment: Option<&str>) -> Option<LinkError> {
        let entity = self.entity(page);
        let absolute = is_absolute(path);
        let start = if absolute {
            self.root()
        } else {
            entity.parent().unwrap_or(self.root())
        };

        let Some(target) = self.resolve(start, &split_path(path)) else {
            let page = entity.full_path().to_string();
            let path = path.to_string();
            return Some(if absolute {
                LinkError::BrokenAbsoluteLink { page, path }
            } else {
                LinkError::BrokenRelativeLink { page, path }
            });
        };

        let fragment = fragment?;
        if self.entity(target).has_id(fragment) {
            return None;
        }
        Some(LinkError::BrokenFragmentTarget {
            page: entity.full_path().to_string(),
            path: path.to_string(),
            fragment: fragment.to_string(),
        })
    }
}

/// Pings every link, at most `concurrency` at a time, and returns the
/// failures. Results come back in completion order.
pub async fn probe_all<P: Pinger>(
    pinger: &P,
    links: Vec<ExternalLink>,
    concurrency: usize,
) -> Vec<LinkError> {
    stream::iter(links)
        .map(|link| async move {
            let result = pinger.ping(&link.url).await;
            probe_outcome(link, result)
        })
        .buffer_unordered(concurrency.max(1))
        .filter_map(future::ready)
        .collect()
        .await
}

fn probe_outcome(link: ExternalLink, result: Result<u16, PingError>) -> Option<LinkError> {
    match result {
        Ok(200) => None,
        Ok(status) => Some(LinkError::ExternalStatusError {
            page: link.page,
            url: link.url,
            status,
        }),
        Err(error) => {
            debug!(url = %link.url, %error, "ping failed");
            Some(LinkError::ExternalProbeFailed {
                page: link.page,
                url: link.url,
                reason: error.to_string(),
            })
        }
    }
}
