//! Arbor CLI
//!
//! Builds a document fragment from markup and prints it, or places it into a
//! host document.

mod snapshot;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;

use arbor_common::warning::{clear_warnings, warning_count};
use arbor_core::{Position, TAG_WRAP, by_id, from_string_with, place};
use arbor_dom::{DomTree, NodeId};
use arbor_html::{FragmentParser, print_tree};

use snapshot::NodeSnapshot;

/// Arbor - build DOM fragments from markup and place them in a document
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Dump the fragment tree for a table row
    arbor '<tr><td>a</td><td>b</td></tr>'

    # Print top-level nodes as HTML, or the whole forest as JSON
    arbor --html '<li>one</li><li>two</li>'
    arbor --json --file snippet.html

    # Place a fragment after the element with id "anchor"
    arbor --into '<p id="anchor">x</p>' --at after --ref anchor '<hr>'

    # Show which tags get parsed inside wrapper elements
    arbor --wrap-table
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Markup to build the fragment from
    #[arg(
        value_name = "MARKUP",
        conflicts_with = "file",
        required_unless_present_any = ["file", "wrap_table"]
    )]
    markup: Option<String>,

    /// Read the markup from a file instead
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Print each top-level node's outer HTML, one per line
    #[arg(long, conflicts_with = "json")]
    html: bool,

    /// Print the fragment as JSON
    #[arg(long)]
    json: bool,

    /// Reject markup with parse errors instead of recovering
    #[arg(long)]
    strict: bool,

    /// Print the wrap table and exit
    #[arg(long)]
    wrap_table: bool,

    /// Host markup to parse into a document body and place the fragment in
    #[arg(long, value_name = "HOST", requires_all = ["at", "reference"])]
    into: Option<String>,

    /// Position relative to the reference element (before, after, replace,
    /// firstin, lastin)
    #[arg(long, value_name = "POSITION")]
    at: Option<Position>,

    /// Id of the reference element in the host markup
    #[arg(long = "ref", value_name = "ID")]
    reference: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.wrap_table {
        print_wrap_table();
        return Ok(());
    }

    let markup = load_markup(&cli)?;
    let parser = if cli.strict {
        FragmentParser::new().with_strict_mode()
    } else {
        FragmentParser::new()
    };

    let mut tally = WarningTally::default();
    let mut tree = DomTree::new();
    let fragment = from_string_with(&mut tree, &markup, &parser)?;

    // Placement mode
    if let Some(ref host) = cli.into {
        let (Some(position), Some(id)) = (cli.at, cli.reference.as_deref()) else {
            bail!("--into requires --at and --ref");
        };
        let count = tree.children(fragment).len();
        // Host markup gets its own round of parse warnings.
        tally.start_new_round();
        let body = place_into_host(&mut tree, &parser, host, fragment, position, id)?;

        heading(&format!("Placed {count} node(s) {position} #{id}"));
        println!("{}", tree.inner_html(body));
        report_warnings(&tally);
        return Ok(());
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&NodeSnapshot::capture(&tree, fragment))?;
        println!("{json}");
    } else if cli.html {
        for &child in tree.children(fragment) {
            println!("{}", tree.outer_html(child));
        }
    } else {
        heading("Fragment");
        print_tree(&tree, fragment, 0);
    }

    report_warnings(&tally);
    Ok(())
}

/// Load markup from the positional argument or `--file`
fn load_markup(cli: &Cli) -> Result<String> {
    if let Some(ref markup) = cli.markup {
        Ok(markup.clone())
    } else if let Some(ref path) = cli.file {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    } else {
        bail!("no markup given: pass MARKUP or --file")
    }
}

/// Build `<html><body>HOST</body></html>` as the document and place the
/// fragment relative to the element with id `id`. Returns the body.
fn place_into_host(
    tree: &mut DomTree,
    parser: &FragmentParser,
    host: &str,
    fragment: NodeId,
    position: Position,
    id: &str,
) -> Result<NodeId> {
    let html = tree.create_element("html");
    let body = tree.create_element("body");
    tree.append_child(NodeId::ROOT, html)?;
    tree.append_child(html, body)?;
    parser.set_inner_html(tree, body, host)?;

    let reference = by_id(tree, id).with_context(|| format!("no element with id {id:?}"))?;
    place(tree, fragment, position, reference)?;
    Ok(body)
}

fn print_wrap_table() {
    heading("Wrap table");
    for (tag, chain) in TAG_WRAP {
        let wrappers: Vec<String> = chain.iter().map(|w| format!("<{w}>")).collect();
        println!("{:<12} {}", format!("<{tag}>").green(), wrappers.join(" > "));
    }
}

/// Parse warnings counted across rounds that each start with
/// [`clear_warnings`].
#[derive(Debug, Default)]
struct WarningTally {
    earlier: usize,
}

impl WarningTally {
    /// Bank the current count and reset deduplication for the next parse.
    fn start_new_round(&mut self) {
        self.earlier += warning_count();
        clear_warnings();
    }

    fn total(&self) -> usize {
        self.earlier + warning_count()
    }
}

fn report_warnings(tally: &WarningTally) {
    let count = tally.total();
    if count > 0 {
        eprintln!("{}", format!("{count} parse warning(s)").yellow());
    }
}

fn heading(title: &str) {
    println!("{}", format!("=== {title} ===").bold().cyan());
}
