//! Traversal graph output.
//!
//! The engine can describe the part of the search graph it explored to a
//! [`GraphSink`]: one node per visited state and one edge from each visited
//! state to the node that created it. The lifecycle is always
//! `open`, then any number of `write_node`/`write_edge`, then `close`.
//!
//! Two sinks are provided:
//!
//! - [`GraphMl`] writes yEd-flavoured GraphML;
//! - [`Dot`][crate::dot::Dot] writes Graphviz DOT.
//!
//! # Examples
//!
//! ```
//! use backtrack::graph::{Color, GraphMl, GraphSink};
//!
//! let mut sink = GraphMl::new(Vec::new());
//! sink.open("G").unwrap();
//! sink.write_node("N1", "0 .", None, Color::NODE).unwrap();
//! sink.write_node("N2", ". 0", None, Color::SOLUTION).unwrap();
//! sink.write_edge("N1", "N2", Some("M0:R1")).unwrap();
//! sink.close().unwrap();
//!
//! let xml = String::from_utf8(sink.into_inner()).unwrap();
//! assert!(xml.starts_with("<graphml"));
//! assert!(xml.contains("<edge id=\"EN1-N2\" source=\"N1\" target=\"N2\">"));
//! ```

use std::fmt;
use std::io::{self, Write};

/// RGB fill color of a graph node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Color(u32);

impl Color {
    /// Regular visited node.
    pub const NODE: Color = Color(0xCCCCFF);
    /// Node on the solution path.
    pub const SOLUTION: Color = Color(0xFFCC00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }
}

/// Formats as an HTML color, e.g. `#ffcc00`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xFFFFFF)
    }
}

/// Consumer of a traversal graph.
pub trait GraphSink {
    type Error;

    fn open(&mut self, name: &str) -> Result<(), Self::Error>;
    fn write_node(&mut self, id: &str, label: &str, description: Option<&str>, color: Color) -> Result<(), Self::Error>;
    fn write_edge(&mut self, from: &str, to: &str, label: Option<&str>) -> Result<(), Self::Error>;
    fn close(&mut self) -> Result<(), Self::Error>;
}

impl<S: GraphSink + ?Sized> GraphSink for &mut S {
    type Error = S::Error;

    fn open(&mut self, name: &str) -> Result<(), Self::Error> {
        (**self).open(name)
    }
    fn write_node(&mut self, id: &str, label: &str, description: Option<&str>, color: Color) -> Result<(), Self::Error> {
        (**self).write_node(id, label, description, color)
    }
    fn write_edge(&mut self, from: &str, to: &str, label: Option<&str>) -> Result<(), Self::Error> {
        (**self).write_edge(from, to, label)
    }
    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}

/// Escapes text for XML character data and attribute values.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// GraphML writer in the dialect of the yEd graph editor.
///
/// Nodes are shape nodes filled with their color and labelled in a
/// monospace font, so that board renderings stay aligned. Descriptions are
/// stored in a `description` data key. In yEd, use *Tools > Fit Node to
/// Label* and a hierarchical layout to get a readable picture.
pub struct GraphMl<W: Write> {
    writer: W,
}

impl<W: Write> GraphMl<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> GraphSink for GraphMl<W> {
    type Error = io::Error;

    fn open(&mut self, name: &str) -> io::Result<()> {
        let w = &mut self.writer;
        writeln!(w, "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\"")?;
        writeln!(w, " xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"")?;
        writeln!(w, " xmlns:y=\"http://www.yworks.com/xml/graphml\"")?;
        writeln!(w, " xsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns")?;
        writeln!(w, "   http://www.yworks.com/xml/schema/graphml/1.1/ygraphml.xsd\">")?;
        writeln!(w)?;
        writeln!(w, "  <key for=\"node\" id=\"key0\" yfiles.type=\"nodegraphics\"/>")?;
        writeln!(w, "  <key for=\"node\" id=\"key1\" attr.name=\"description\" attr.type=\"string\"/>")?;
        writeln!(w, "  <key for=\"edge\" id=\"edge1\" yfiles.type=\"edgegraphics\"/>")?;
        writeln!(w)?;
        writeln!(w, "  <graph id=\"{}\" edgedefault=\"directed\">", escape_xml(name))
    }

    fn write_node(&mut self, id: &str, label: &str, description: Option<&str>, color: Color) -> io::Result<()> {
        let w = &mut self.writer;
        writeln!(w, "    <node id=\"{}\">", escape_xml(id))?;
        writeln!(w, "      <data key=\"key0\">")?;
        writeln!(w, "        <y:ShapeNode>")?;
        writeln!(w, "          <y:Fill color=\"{}\" transparent=\"false\"/>", color)?;
        writeln!(
            w,
            "          <y:NodeLabel alignment=\"center\" fontFamily=\"Courier New\" fontSize=\"12\" fontStyle=\"plain\">{}</y:NodeLabel>",
            escape_xml(label)
        )?;
        writeln!(w, "        </y:ShapeNode>")?;
        writeln!(w, "      </data>")?;
        if let Some(description) = description {
            // `]]>` cannot appear inside a CDATA section.
            let description = description.replace("]]>", "]]]]><![CDATA[>");
            writeln!(w, "      <data key=\"key1\"><![CDATA[{}]]></data>", description)?;
        }
        writeln!(w, "    </node>")
    }

    fn write_edge(&mut self, from: &str, to: &str, label: Option<&str>) -> io::Result<()> {
        let w = &mut self.writer;
        let (from, to) = (escape_xml(from), escape_xml(to));
        writeln!(w, "    <edge id=\"E{}-{}\" source=\"{}\" target=\"{}\">", from, to, from, to)?;
        if let Some(label) = label {
            writeln!(w, "      <data key=\"edge1\">")?;
            writeln!(w, "        <y:PolyLineEdge>")?;
            writeln!(w, "        <y:EdgeLabel>{}</y:EdgeLabel>", escape_xml(label))?;
            writeln!(w, "        </y:PolyLineEdge>")?;
            writeln!(w, "      </data>")?;
        }
        writeln!(w, "    </edge>")
    }

    fn close(&mut self) -> io::Result<()> {
        writeln!(self.writer, "  </graph>")?;
        writeln!(self.writer, "</graphml>")?;
        self.writer.flush()
    }
}
