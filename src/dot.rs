//! Traversal graph to DOT (Graphviz) conversion.
//!
//! [`Dot`] is a [`GraphSink`] producing a directed graph that can be
//! rendered with Graphviz tools like `dot`, or pasted into online viewers.
//!
//! # DOT Format
//!
//! The generated DOT output follows these conventions:
//! - **Nodes** are filled boxes labelled with the state rendering, left-justified
//!   in a monospace font so that boards keep their shape
//! - **Colors** distinguish solution-path nodes from the other visited nodes
//! - **Descriptions**, when present, become node tooltips
//! - **Edges** go from a node to each node it created, labelled with the element
//!
//! # Examples
//!
//! ```
//! use backtrack::dot::Dot;
//! use backtrack::graph::{Color, GraphSink};
//!
//! let mut dot = Dot::new(Vec::new());
//! dot.open("G").unwrap();
//! dot.write_node("N1", "0 .\n", None, Color::SOLUTION).unwrap();
//! dot.close().unwrap();
//!
//! let text = String::from_utf8(dot.into_inner()).unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! assert!(text.starts_with("digraph G {"));
//! ```

use std::io::{self, Write};

use crate::graph::{Color, GraphSink};

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings.
///
/// # Examples
///
/// ```
/// use backtrack::dot::{Dot, DotConfig};
///
/// let config = DotConfig {
///     rank_dir: "LR",
///     ..DotConfig::default()
/// };
/// let dot = Dot::with_config(Vec::new(), config);
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for nodes (default: "box")
    pub node_shape: &'static str,
    /// Font for node and edge labels (default: "Courier New")
    pub font_name: &'static str,
    /// Layout direction (default: "TB")
    pub rank_dir: &'static str,
    /// Style for edges (default: "solid")
    pub edge_style: &'static str,
    /// Whether to emit descriptions as tooltips (default: true)
    pub use_tooltips: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "box",
            font_name: "Courier New",
            rank_dir: "TB",
            edge_style: "solid",
            use_tooltips: true,
        }
    }
}

/// Escapes text for a double-quoted DOT string. Line breaks become `\l`
/// (left-justified line ends).
fn escape_dot(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\l"),
            _ => out.push(c),
        }
    }
    out
}

/// DOT writer.
pub struct Dot<W: Write> {
    writer: W,
    config: DotConfig,
}

impl<W: Write> Dot<W> {
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, DotConfig::default())
    }

    pub fn with_config(writer: W, config: DotConfig) -> Self {
        Self { writer, config }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> GraphSink for Dot<W> {
    type Error = io::Error;

    fn open(&mut self, name: &str) -> io::Result<()> {
        let config = &self.config;
        writeln!(self.writer, "digraph {} {{", name)?;
        writeln!(self.writer, "rankdir={};", config.rank_dir)?;
        writeln!(
            self.writer,
            "node [shape={}, style=filled, fontname=\"{}\"];",
            config.node_shape, config.font_name
        )?;
        writeln!(
            self.writer,
            "edge [style={}, fontname=\"{}\"];",
            config.edge_style, config.font_name
        )
    }

    fn write_node(&mut self, id: &str, label: &str, description: Option<&str>, color: Color) -> io::Result<()> {
        write!(
            self.writer,
            "{} [label=\"{}\", fillcolor=\"{}\"",
            id,
            escape_dot(label),
            color
        )?;
        if let Some(description) = description.filter(|_| self.config.use_tooltips) {
            write!(self.writer, ", tooltip=\"{}\"", escape_dot(description))?;
        }
        writeln!(self.writer, "];")
    }

    fn write_edge(&mut self, from: &str, to: &str, label: Option<&str>) -> io::Result<()> {
        match label {
            Some(label) => writeln!(self.writer, "{} -> {} [label=\"{}\"];", from, to, escape_dot(label)),
            None => writeln!(self.writer, "{} -> {};", from, to),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        writeln!(self.writer, "}}")?;
        self.writer.flush()
    }
}
