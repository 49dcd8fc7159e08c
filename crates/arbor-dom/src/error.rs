//! Errors raised by the checked tree mutators.

use thiserror::Error;

use crate::NodeId;

/// [§ 2.1 Exceptions](https://webidl.spec.whatwg.org/#idl-DOMException-error-names)
///
/// The subset of `DOMException` names the mutation algorithms can throw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// "`HierarchyRequestError`: The operation would yield an incorrect node tree."
    #[error("HierarchyRequestError: {0}")]
    HierarchyRequest(&'static str),

    /// "`NotFoundError`: The object can not be found here."
    #[error("NotFoundError: {0}")]
    NotFound(&'static str),

    /// The id was never allocated by this tree.
    #[error("node {0:?} does not belong to this tree")]
    InvalidNode(NodeId),
}
