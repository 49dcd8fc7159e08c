//! HTML fragment parsing for Arbor.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tree sink** - an html5ever `TreeSink` that builds nodes directly into an
//!   [`arbor_dom::DomTree`], so parsed nodes can be moved without copying
//! - **Fragment parsing** ([WHATWG § 13.4](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments))
//!   scoped to a context element, plus the `innerHTML` setter built on it
//! - **Parse issues** - recovered parse errors are collected, reported through
//!   the shared warning system, or turned into errors in strict mode
//!
//! Tokenization and tree construction themselves are html5ever's.
//!
//! # Not Yet Implemented
//!
//! - Template contents as a separate fragment (they parse as children)
//! - Namespaces on elements (SVG and `MathML` names are kept, namespaces dropped)

/// Tree dumps.
pub mod debug;
mod error;
/// Context-scoped fragment parsing.
pub mod fragment;
mod sink;

pub use debug::{format_tree, print_tree};
pub use error::HtmlError;
pub use fragment::{FragmentParser, ParseIssue};
