//! Error types for glide_core

use thiserror::Error;

/// Errors raised while resolving nodes in the host tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Selector syntax this tree does not understand
    #[error("unsupported selector `{0}`: only `#id` selectors are recognized")]
    UnsupportedSelector(String),

    /// Selector was well-formed but matched nothing
    #[error("no node matches selector `{0}`")]
    NoMatch(String),

    /// A node id that is no longer (or never was) part of the tree
    #[error("node is not part of the host tree")]
    NodeMissing,
}
