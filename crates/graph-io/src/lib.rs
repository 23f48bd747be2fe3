//! Edge-list import and export for graphkit graphs.
//!
//! An edge list holds one edge per line: `source SEP target`, followed by
//! `SEP weight` when the graph is weighted. Blank lines and lines starting
//! with the comment character are ignored. Isolated nodes have no line of
//! their own and are therefore not preserved by an export.
//!
//! # Example
//!
//! ```rust
//! use graphkit::GraphConfig;
//! use graphkit_io::{EdgeListFormat, read_edge_list, write_edge_list};
//!
//! let input = "# roads\na b 2.5\nb c 1\n";
//! let format = EdgeListFormat::default();
//! let config = GraphConfig::undirected().weighted(true);
//!
//! let graph = read_edge_list::<String, _>(input.as_bytes(), &format, config)?;
//! assert_eq!(graph.edge_count(), 2);
//!
//! let mut output = Vec::new();
//! write_edge_list(&graph, &mut output, &format)?;
//! assert_eq!(String::from_utf8_lossy(&output), "a b 2.5\nb c 1\n");
//! # Ok::<(), graphkit_io::Error>(())
//! ```

mod error;

pub use error::{Error, Result};

use graphkit::{Graph, GraphConfig, NodeId};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, trace};

/// Line layout of an edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeListFormat {
    /// Field separator. Any whitespace character makes runs of whitespace
    /// count as a single separator.
    pub separator: char,
    /// Lines whose first non-blank character is this are skipped.
    pub comment: Option<char>,
}

impl Default for EdgeListFormat {
    fn default() -> Self {
        Self {
            separator: ' ',
            comment: Some('#'),
        }
    }
}

impl EdgeListFormat {
    /// Format with the given separator and `#` comments.
    #[must_use]
    pub const fn new(separator: char) -> Self {
        Self {
            separator,
            comment: Some('#'),
        }
    }

    /// Replace the comment character, or disable comments with `None`.
    #[must_use]
    pub const fn with_comment(mut self, comment: Option<char>) -> Self {
        self.comment = comment;
        self
    }

    fn fields<'a>(&self, line: &'a str) -> Vec<&'a str> {
        if self.separator.is_whitespace() {
            line.split_whitespace().collect()
        } else {
            line.split(self.separator).map(str::trim).collect()
        }
    }

    fn is_skipped(&self, line: &str) -> bool {
        line.is_empty() || self.comment.is_some_and(|c| line.starts_with(c))
    }
}

/// Build a graph from an edge list.
///
/// The graph always has the requested configuration. A weighted graph
/// requires a weight on every line; an unweighted graph rejects one.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails and [`Error::Parse`] with the
/// 1-based line number for a malformed line.
pub fn read_edge_list<V, R>(
    reader: R,
    format: &EdgeListFormat,
    config: GraphConfig,
) -> Result<Graph<V>>
where
    V: NodeId + FromStr,
    V::Err: Display,
    R: BufRead,
{
    let mut graph = Graph::new(config);

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| Error::io_no_path(e, "read"))?;
        let line = line.trim();
        if format.is_skipped(line) {
            continue;
        }

        match (format.fields(line).as_slice(), config.weighted) {
            ([source, target], false) => {
                graph.add_edge(parse_node(line_no, source)?, parse_node(line_no, target)?);
            }
            ([source, target, weight], true) => {
                let weight: f64 = weight.parse().map_err(|e| {
                    Error::parse(line_no, format!("invalid weight '{weight}': {e}"))
                })?;
                graph.add_weighted_edge(
                    parse_node(line_no, source)?,
                    parse_node(line_no, target)?,
                    weight,
                )?;
            }
            ([_, _], true) => {
                return Err(Error::parse(line_no, "missing weight for weighted graph"));
            }
            ([_, _, _], false) => {
                return Err(Error::parse(line_no, "unexpected weight for unweighted graph"));
            }
            (fields, weighted) => {
                let expected = if weighted { 3 } else { 2 };
                return Err(Error::parse(
                    line_no,
                    format!("expected {expected} fields, found {}", fields.len()),
                ));
            }
        }
        trace!(line = line_no, "Read edge");
    }

    debug!("Read edge list with {} edges", graph.edge_count());
    Ok(graph)
}

fn parse_node<V>(line: usize, field: &str) -> Result<V>
where
    V: FromStr,
    V::Err: Display,
{
    if field.is_empty() {
        return Err(Error::parse(line, "empty node field"));
    }
    field
        .parse()
        .map_err(|e| Error::parse(line, format!("invalid node '{field}': {e}")))
}

/// Write a graph's edges, one per line in edge order.
///
/// Weights use the shortest representation that parses back to the same
/// value, so reading the output and writing it again is byte-identical.
///
/// # Errors
///
/// Returns [`Error::Unrepresentable`] if a node renders empty or contains
/// the separator, the comment character or a line break, or if a weight's
/// rendering contains the separator (a `'-'` or `'.'` separator with a
/// negative or fractional weight), and [`Error::Io`] if writing fails.
pub fn write_edge_list<V, W>(
    graph: &Graph<V>,
    mut writer: W,
    format: &EdgeListFormat,
) -> Result<()>
where
    V: NodeId + Display,
    W: Write,
{
    let sep = format.separator;
    for (source, target) in graph.edges() {
        let source_text = render_node(&source, format)?;
        let target_text = render_node(&target, format)?;
        let written = if graph.is_weighted() {
            let weight = render_weight(graph.weight(&source, &target)?, format)?;
            writeln!(writer, "{source_text}{sep}{target_text}{sep}{weight}")
        } else {
            writeln!(writer, "{source_text}{sep}{target_text}")
        };
        written.map_err(|e| Error::io_no_path(e, "write"))?;
    }
    writer.flush().map_err(|e| Error::io_no_path(e, "write"))?;

    debug!("Wrote edge list with {} edges", graph.edge_count());
    Ok(())
}

fn render_node<V: Display>(node: &V, format: &EdgeListFormat) -> Result<String> {
    let text = node.to_string();
    let unrepresentable = |reason| Error::Unrepresentable {
        value: text.clone(),
        reason,
    };

    if text.trim().is_empty() {
        return Err(unrepresentable("renders as blank"));
    }
    if text.contains(['\n', '\r']) {
        return Err(unrepresentable("contains a line break"));
    }
    let splits = if format.separator.is_whitespace() {
        text.contains(char::is_whitespace)
    } else {
        text.contains(format.separator) || text.trim() != text
    };
    if splits {
        return Err(unrepresentable("contains the separator"));
    }
    if format.comment.is_some_and(|c| text.starts_with(c)) {
        return Err(unrepresentable("starts with the comment character"));
    }
    Ok(text)
}

fn render_weight(weight: f64, format: &EdgeListFormat) -> Result<String> {
    let text = weight.to_string();
    if text.contains(format.separator) {
        return Err(Error::Unrepresentable {
            value: text,
            reason: "weight contains the separator",
        });
    }
    Ok(text)
}

/// Read an edge-list file into a graph with the requested configuration.
///
/// # Errors
///
/// Returns [`Error::Io`] with the path if the file cannot be read, and
/// [`Error::Parse`] for a malformed line.
pub fn import_graph<V>(
    path: impl AsRef<Path>,
    format: &EdgeListFormat,
    config: GraphConfig,
) -> Result<Graph<V>>
where
    V: NodeId + FromStr,
    V::Err: Display,
{
    let path = path.as_ref();
    debug!(path = %path.display(), "Importing edge list");
    let file = File::open(path).map_err(|e| Error::io(e, path, "read"))?;
    read_edge_list(BufReader::new(file), format, config).map_err(|e| e.with_path(path))
}

/// Write a graph's edges to a file, replacing any existing content.
///
/// # Errors
///
/// Returns [`Error::Io`] with the path if the file cannot be written, and
/// [`Error::Unrepresentable`] for a node or weight that cannot be written.
pub fn export_graph<V>(
    graph: &Graph<V>,
    path: impl AsRef<Path>,
    format: &EdgeListFormat,
) -> Result<()>
where
    V: NodeId + Display,
{
    let path = path.as_ref();
    debug!(path = %path.display(), "Exporting edge list");
    let file = File::create(path).map_err(|e| Error::io(e, path, "write"))?;
    write_edge_list(graph, BufWriter::new(file), format).map_err(|e| e.with_path(path))
}
