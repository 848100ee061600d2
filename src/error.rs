// src/error.rs
// =============================================================================
// Error types shared by the library.
//
// - RegisterError: returned immediately by a single registration call
// - LinkError: one record per broken link, accumulated during validation
//
// Validation never aborts on a LinkError; they are data, collected into one
// flat Vec and handed back to the caller.
// =============================================================================

use serde::Serialize;
use thiserror::Error;

/// Failure to place a file or document into the site tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// Something already lives at this path, or a parent segment is a file.
    #[error("file already registered with name '{path}'")]
    DuplicateEntity { path: String },
}

/// A broken reference found on a page.
///
/// Every variant carries the full path of the page the reference came from.
/// The `Display` output is the one-line report printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkError {
    #[error("{page}: id '{id}' appears {count} times on the page (it should only appear once)")]
    DuplicateIdentifier {
        page: String,
        id: String,
        count: usize,
    },

    #[error("{page}: incomplete target '#'")]
    IncompleteFragment { page: String },

    #[error("{page}: broken same page link '{reference}'")]
    BrokenSamePageLink { page: String, reference: String },

    #[error("{page}: broken target link '{path}#{fragment}'")]
    BrokenFragmentTarget {
        page: String,
        path: String,
        fragment: String,
    },

    #[error("{page}: broken link '{path}'")]
    BrokenAbsoluteLink { page: String, path: String },

    #[error("{page}: broken relative link '{path}'")]
    BrokenRelativeLink { page: String, path: String },

    /// Transport-level failure; `reason` is kept for the JSON report only.
    #[error("{page}: encountered error when pinging '{url}'")]
    ExternalProbeFailed {
        page: String,
        url: String,
        reason: String,
    },

    #[error("{page}: encountered status code {status} when pinging '{url}'")]
    ExternalStatusError {
        page: String,
        url: String,
        status: u16,
    },
}

impl LinkError {
    /// Full path of the page the broken reference was found on.
    pub fn page(&self) -> &str {
        match self {
            LinkError::DuplicateIdentifier { page, .. }
            | LinkError::IncompleteFragment { page }
            | LinkError::BrokenSamePageLink { page, .. }
            | LinkError::BrokenFragmentTarget { page, .. }
            | LinkError::BrokenAbsoluteLink { page, .. }
            | LinkError::BrokenRelativeLink { page, .. }
            | LinkError::ExternalProbeFailed { page, .. }
            | LinkError::ExternalStatusError { page, .. } => page,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(
            self,
            LinkError::ExternalProbeFailed { .. } | LinkError::ExternalStatusError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_identifier_message() {
        let err = LinkError::DuplicateIdentifier {
            page: "index.html".to_string(),
            id: "x".to_string(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "index.html: id 'x' appears 2 times on the page (it should only appear once)"
        );
    }

    #[test]
    fn test_fragment_target_message() {
        let err = LinkError::BrokenFragmentTarget {
            page: "blog/index.html".to_string(),
            path: "../".to_string(),
            fragment: "razzle".to_string(),
        };
        assert_eq!(err.to_string(), "blog/index.html: broken target link '../#razzle'");
    }

    #[test]
    fn test_probe_failure_hides_reason() {
        let err = LinkError::ExternalProbeFailed {
            page: "index.html".to_string(),
            url: "https://nowhere.invalid/".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "index.html: encountered error when pinging 'https://nowhere.invalid/'"
        );
        assert!(err.is_external());
        assert_eq!(err.page(), "index.html");
    }

    #[test]
    fn test_json_is_tagged_by_kind() {
        let err = LinkError::ExternalStatusError {
            page: "index.html".to_string(),
            url: "https://example.com/gone".to_string(),
            status: 404,
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "external_status_error");
        assert_eq!(json["status"], 404);
    }

    #[test]
    fn test_register_error_message() {
        let err = RegisterError::DuplicateEntity {
            path: "blog/index.html".to_string(),
        };
        assert_eq!(err.to_string(), "file already registered with name 'blog/index.html'");
    }
}
