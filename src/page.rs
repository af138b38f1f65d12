//! Host page checks
//!
//! Decides whether the current page should get a carousel and defines the
//! errors that abort mounting.

use thiserror::Error;

/// Errors that stop the widget from mounting
#[derive(Debug, Error)]
pub enum MountError {
    /// The current path is not the homepage
    #[error("wrong page: {0}")]
    NotHomepage(String),

    /// None of the anchor selectors matched
    #[error("Hero banner element not found, carousel not loaded")]
    AnchorNotFound,

    /// A DOM call failed
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// Whether `path` is one of the configured homepage paths
pub fn is_homepage(path: &str, homepage_paths: &[String]) -> bool {
    homepage_paths.iter().any(|home| home == path)
}

/// Result of the first selector `query` resolves, trying `selectors` in order
///
/// Later selectors are never queried once one matches.
pub fn find_anchor<T>(selectors: &[String], mut query: impl FnMut(&str) -> Option<T>) -> Option<T> {
    selectors.iter().find_map(|selector| query(selector))
}
