// src/checker/classify.rs
// =============================================================================
// Sorts a raw reference string into the shape that decides how it gets
// checked:
//
//   "https://example.com"   -> External       (pinged)
//   "#"                     -> EmptyFragment  (always an error)
//   "/"                     -> Root           (always fine)
//   "#intro"                -> SamePage       (id on this page)
//   "/docs/a.html#intro"    -> Path           (resolved, then id on target)
//   "../img/logo.png"       -> Path           (resolved)
// =============================================================================

/// What a reference points at, borrowed from the cleaned-up string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    External(&'a str),
    EmptyFragment,
    Root,
    SamePage { fragment: &'a str },
    Path {
        path: &'a str,
        fragment: Option<&'a str>,
    },
}

impl<'a> Reference<'a> {
    /// Classifies an already sanitized reference (see [`sanitize`]).
    pub fn classify(reference: &'a str) -> Self {
        // Anything merely starting with "http" counts as external.
        if reference.starts_with("http") {
            return Reference::External(reference);
        }
        match reference {
            "#" => return Reference::EmptyFragment,
            "/" => return Reference::Root,
            _ => {}
        }

        match reference.rfind('#') {
            Some(0) => Reference::SamePage {
                fragment: &reference[1..],
            },
            Some(index) => Reference::Path {
                path: reference[..index].trim(),
                fragment: Some(reference[index + 1..].trim()),
            },
            None => Reference::Path {
                path: reference,
                fragment: None,
            },
        }
    }
}

/// Trims surrounding whitespace and turns backslashes into slashes.
pub fn sanitize(raw: &str) -> String {
    raw.trim().replace('\\', "/")
}

/// Whether a path is resolved from the site root rather than the page.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}
