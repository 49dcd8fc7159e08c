//! Errors raised while parsing markup into the tree.

use arbor_dom::{DomError, NodeId};
use thiserror::Error;

use crate::fragment::ParseIssue;

/// Errors that can occur while parsing a fragment.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Strict mode saw at least one parse error. The tree builder would have
    /// recovered, but the caller asked for markup that parses cleanly.
    #[error("markup rejected in <{context}> context: {} parse error(s)", .issues.len())]
    Rejected {
        /// Tag name of the context element.
        context: String,
        /// Every parse error the tree builder reported, in order.
        issues: Vec<ParseIssue>,
    },

    /// Fragments can only be parsed in the context of an element.
    #[error("fragment context {0:?} is not an element")]
    InvalidContext(NodeId),

    /// Moving the parsed nodes into place failed.
    #[error(transparent)]
    Dom(#[from] DomError),
}
