//! Placement errors.

use arbor_dom::DomError;
use thiserror::Error;

use crate::place::Position;

/// Errors that can occur while placing a node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceError {
    /// A sibling-relative position was requested against a reference node
    /// that has no parent, so there is no slot to anchor to.
    #[error("ReferenceError: cannot place {position}: reference node has no parent")]
    NoParent {
        /// The position that was requested.
        position: Position,
    },

    /// The tree refused the insertion, for example a node placed inside
    /// its own descendant.
    #[error(transparent)]
    Dom(#[from] DomError),
}
