//! [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
//!
//! "The following steps form the HTML fragment parsing algorithm. The
//! algorithm takes as input an Element node, referred to as the context
//! element, which gives the context for the parser, as well as input, a
//! string to parse, and returns a list of zero or more nodes."
//!
//! The context element decides which insertion mode the tree builder starts
//! in. Parsing `<td>` with a `div` context drops the cell, because "in body"
//! ignores table-part start tags; parsing it with a `tr` context keeps it.

use html5ever::driver::{ParseOpts, parse_fragment_for_element};
use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, QualName};

use arbor_common::warning::warn_once;
use arbor_dom::{DomTree, NodeId};

use crate::error::HtmlError;
use crate::sink::{DomSink, SinkHandle};

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// "This specification defines the parsing rules for HTML documents...
/// The handling of parse errors is well-defined."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Description of the parse error as reported by the tree builder.
    pub message: String,
    /// Tag name of the context element the fragment was parsed in.
    pub context: String,
}

/// Parses markup in the context of an element, the way the `innerHTML`
/// setter does.
///
/// Lenient by default: parse errors are recovered from, reported once each
/// through the warning system, and returned alongside the result. In strict
/// mode any parse error rejects the input instead.
#[derive(Debug, Clone, Copy)]
pub struct FragmentParser {
    strict_mode: bool,
    report_warnings: bool,
}

impl Default for FragmentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentParser {
    /// Create a lenient parser that reports parse errors as warnings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strict_mode: false,
            report_warnings: true,
        }
    }

    /// Enable strict mode - any parse error rejects the markup.
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    /// Stop reporting recovered parse errors through the warning system.
    #[must_use]
    pub const fn without_warnings(mut self) -> Self {
        self.report_warnings = false;
        self
    }

    /// Whether parse errors reject the markup.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict_mode
    }

    /// Parse `markup` with `context` as the context element and return a new
    /// document fragment holding the resulting nodes. `context` itself is not
    /// modified.
    ///
    /// # Errors
    ///
    /// See [`Self::parse_with_issues`].
    pub fn parse(&self, tree: &mut DomTree, context: NodeId, markup: &str) -> Result<NodeId, HtmlError> {
        self.parse_with_issues(tree, context, markup)
            .map(|(fragment, _)| fragment)
    }

    /// Like [`Self::parse`], also returning the parse errors that were
    /// recovered from.
    ///
    /// # Errors
    ///
    /// - [`HtmlError::InvalidContext`] if `context` is not an element.
    /// - [`HtmlError::Rejected`] in strict mode when the markup has parse errors.
    /// - [`HtmlError::Dom`] if the parsed nodes could not be moved into the fragment.
    pub fn parse_with_issues(
        &self,
        tree: &mut DomTree,
        context: NodeId,
        markup: &str,
    ) -> Result<(NodeId, Vec<ParseIssue>), HtmlError> {
        let context_tag = tree
            .as_element(context)
            .map(|e| e.tag_name.clone())
            .ok_or(HtmlError::InvalidContext(context))?;

        // STEP 1-4: "Create a new Document node... Create a new HTML parser...
        //            Let root be the result of creating an element given document
        //            and html... Append the element root to the Document node."
        // STEP 5-10: the context element selects the tokenizer state and the
        //            insertion mode; html5ever handles both from its name.
        let name = QualName::new(None, html5ever::ns!(html), LocalName::from(context_tag.as_str()));
        let sink = DomSink::new(tree);
        let sink = parse_fragment_for_element(
            sink,
            ParseOpts::default(),
            SinkHandle::element(context, name),
            false,
            None,
        )
        .from_utf8()
        .one(markup.as_bytes());
        let (document, errors) = sink.into_parts();

        let issues: Vec<ParseIssue> = errors
            .into_iter()
            .map(|message| ParseIssue {
                message: message.into_owned(),
                context: context_tag.clone(),
            })
            .collect();

        if self.strict_mode && !issues.is_empty() {
            return Err(HtmlError::Rejected {
                context: context_tag,
                issues,
            });
        }
        if self.report_warnings {
            for issue in &issues {
                warn_once("HTML Parser", &issue.message);
            }
        }

        // STEP 11: "Start the parser and let it run until it has consumed all
        //           the characters just inserted into the input stream."
        // STEP 12: "Return root's children, in tree order."
        let fragment = tree.create_document_fragment();
        if let Some(root) = tree.first_child(document) {
            tree.move_children(root, fragment)?;
        }
        Ok((fragment, issues))
    }

    /// [§ 3.5.1 innerHTML setter](https://html.spec.whatwg.org/multipage/dynamic-markup-insertion.html#dom-element-innerhtml)
    ///
    /// STEP 1: "Let fragment be the result of invoking the fragment parsing
    ///          algorithm steps with context and compliantString."
    /// STEP 2: "Replace all with fragment within context."
    ///
    /// # Errors
    ///
    /// See [`Self::parse_with_issues`]. On error the existing children of
    /// `context` are left in place.
    pub fn set_inner_html(&self, tree: &mut DomTree, context: NodeId, markup: &str) -> Result<(), HtmlError> {
        let fragment = self.parse(tree, context, markup)?;
        tree.replace_all(context, Some(fragment))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leaves_context_untouched() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let fragment = FragmentParser::new()
            .without_warnings()
            .parse(&mut tree, div, "<b>x</b>")
            .unwrap();
        assert!(tree.children(div).is_empty());
        assert_eq!(tree.inner_html(fragment), "<b>x</b>");
    }

    #[test]
    fn test_text_context_is_invalid() {
        let mut tree = DomTree::new();
        let text = tree.create_text("x");
        let result = FragmentParser::new().parse(&mut tree, text, "<p></p>");
        assert!(matches!(result, Err(HtmlError::InvalidContext(id)) if id == text));
    }
}
