//! Core DOM helpers for Arbor.
//!
//! # Scope
//!
//! This crate provides five small operations over an [`arbor_dom::DomTree`]:
//! - **Lookup** - [`by_id`] finds an element in the document by its id
//! - **Ancestry** - [`contains`] tests inclusive ancestry for any node type
//! - **Fragment construction** - [`from_string`] parses markup into a detached
//!   fragment, wrapping table parts, list items and similar tags in the
//!   context they need to parse at all
//! - **Placement** - [`place`] inserts a node at one of five [`Position`]s
//!   relative to a reference node
//! - **Removal** - [`remove`] detaches a node if it is attached
//!
//! Every operation borrows the tree explicitly, so the one-mutator rule is
//! enforced by the borrow checker rather than by locking.

pub use arbor_dom as dom;
pub use arbor_html as html;

mod construct;
mod error;
mod lookup;
mod place;

pub use construct::{TAG_WRAP, from_string, from_string_with, leading_tag, wrapper_chain};
pub use error::PlaceError;
pub use lookup::{by_id, contains};
pub use place::{Position, place, remove};
