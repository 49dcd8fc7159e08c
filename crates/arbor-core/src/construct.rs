//! Building detached fragments from markup.
//!
//! The `innerHTML` setter parses in the context of the element it is called
//! on. With a plain `div` as the context, table parts, `option`, `legend`
//! and a few other tags have no valid place and the tree builder drops them.
//! [`from_string`] sniffs the first tag and, when it is one of those, builds
//! a detached chain of wrapper elements and parses with the innermost one as
//! the context instead. The parsed nodes go straight into the returned
//! fragment.

use arbor_dom::{DomTree, NodeId};
use arbor_html::{FragmentParser, HtmlError};

/// Tags that only parse inside a structural ancestor, each with the chain of
/// wrapper tags (outermost first) that supplies it.
pub const TAG_WRAP: &[(&str, &[&str])] = &[
    ("option", &["select"]),
    ("tbody", &["table"]),
    ("thead", &["table"]),
    ("tfoot", &["table"]),
    ("tr", &["table", "tbody"]),
    ("td", &["table", "tbody", "tr"]),
    ("th", &["table", "thead", "tr"]),
    ("legend", &["fieldset"]),
    ("caption", &["table"]),
    ("colgroup", &["table"]),
    ("col", &["table", "colgroup"]),
    ("li", &["ul"]),
];

/// The wrapper chain for `tag`, outermost first, if it needs one.
///
/// `tag` is expected in lowercase, as returned by [`leading_tag`].
#[must_use]
pub fn wrapper_chain(tag: &str) -> Option<&'static [&'static str]> {
    TAG_WRAP
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|&(_, chain)| chain)
}

/// The lowercased name of the first tag-like token in `markup`.
///
/// A token is `<`, optional whitespace, then one or more ASCII letters,
/// digits, `_` or `:`. The search is not anchored: leading text, comments
/// and end tags are skipped until something matches, so both `"x</b><td>"`
/// and `"<!-- c --><td>"` yield `td`.
#[must_use]
pub fn leading_tag(markup: &str) -> Option<String> {
    markup.match_indices('<').find_map(|(index, _)| {
        let rest = markup[index + 1..].trim_start();
        let end = rest.find(|c: char| !is_tag_char(c)).unwrap_or(rest.len());
        (end > 0).then(|| rest[..end].to_ascii_lowercase())
    })
}

const fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':'
}

/// Parse `markup` into a new, parentless document fragment.
///
/// Parse errors are recovered from the way a browser would and reported once
/// each as warnings. See [`from_string_with`] to choose a different parser.
///
/// # Errors
///
/// Returns an [`HtmlError`] if the parsed nodes could not be moved into the
/// fragment. The default parser never rejects markup.
pub fn from_string(tree: &mut DomTree, markup: &str) -> Result<NodeId, HtmlError> {
    from_string_with(tree, markup, &FragmentParser::new())
}

/// Parse `markup` into a new, parentless document fragment using `parser`.
///
/// The fragment's children are exactly the top-level nodes of `markup`, in
/// source order. No wrapper element survives in the result, and empty markup
/// gives an empty fragment.
///
/// # Errors
///
/// Returns [`HtmlError::Rejected`] when `parser` is strict and the markup has
/// parse errors, or any other error the parser reports.
pub fn from_string_with(
    tree: &mut DomTree,
    markup: &str,
    parser: &FragmentParser,
) -> Result<NodeId, HtmlError> {
    let chain = leading_tag(markup)
        .and_then(|tag| wrapper_chain(&tag))
        .unwrap_or_default();

    // Detached scratch elements; the parsed nodes never enter them.
    let mut innermost = None;
    for tag in chain {
        let wrapper = tree.create_element(tag);
        if let Some(parent) = innermost {
            tree.append_child(parent, wrapper)?;
        }
        innermost = Some(wrapper);
    }
    let context = innermost.unwrap_or_else(|| tree.create_element("div"));

    parser.parse(tree, context, markup)
}
