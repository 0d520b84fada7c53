// Page structure and its HTML rendering.

use std::borrow::Cow;
use std::fmt::{self, Write};

use footnotes::{CitationIndex, RenderedFootnotes};

/// A piece of text inside a paragraph.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Inline {
    Text(String),
    Bold(String),
    /// Colored text, with the CSS class that sets the color.
    Span { class: String, text: String },
    /// The marker pointing to a footnote at the bottom of the page.
    Citation(CitationIndex),
}

impl Inline {
    pub fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    pub fn bold(s: &str) -> Inline {
        Inline::Bold(s.to_string())
    }

    pub fn span(class: &str, s: &str) -> Inline {
        Inline::Span {
            class: class.to_string(),
            text: s.to_string(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Block {
    Paragraph(Vec<Inline>),
    OrderedList(Vec<String>),
    Row { class: String, columns: Vec<Column> },
    Table(TallyTable),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Column {
    pub class: String,
    pub blocks: Vec<Block>,
}

/// A value in the tally table.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TallyValue {
    Count(u64),
    /// A transfer of votes between two rounds. Shown with its sign.
    Change(i64),
}

impl fmt::Display for TallyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TallyValue::Count(c) => write!(f, "{}", c),
            TallyValue::Change(0) => write!(f, "0"),
            TallyValue::Change(c) => write!(f, "{:+}", c),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallyRow {
    pub candidate: String,
    pub values: Vec<TallyValue>,
    /// Position of the value shown in bold, if any.
    pub highlighted: Option<usize>,
    pub winner: bool,
}

/// A static table of vote counts, one row per candidate.
/// The last column names the winner.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallyTable {
    pub caption: String,
    pub headers: Vec<String>,
    pub rows: Vec<TallyRow>,
}

/// The layout wrapper: a titled section container.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PageSection {
    pub class: String,
    pub title: String,
    pub blocks: Vec<Block>,
}

impl PageSection {
    pub fn write_html<W: Write>(&self, w: &mut W) -> fmt::Result {
        writeln!(w, "<section class=\"page-section {}\">", escape(&self.class))?;
        writeln!(w, "<h1>{}</h1>", escape(&self.title))?;
        for block in self.blocks.iter() {
            write_block(block, w)?;
        }
        writeln!(w, "</section>")
    }

    /// All the citation markers of the section, in document order.
    pub fn citations(&self) -> Vec<CitationIndex> {
        let mut res: Vec<CitationIndex> = Vec::new();
        collect_citations(&self.blocks, &mut res);
        res
    }
}

fn collect_citations(blocks: &[Block], res: &mut Vec<CitationIndex>) {
    for block in blocks {
        match block {
            Block::Paragraph(inlines) => {
                res.extend(inlines.iter().filter_map(|i| match i {
                    Inline::Citation(idx) => Some(*idx),
                    _ => None,
                }));
            }
            Block::Row { columns, .. } => {
                for c in columns {
                    collect_citations(&c.blocks, res);
                }
            }
            Block::OrderedList(_) | Block::Table(_) => {}
        }
    }
}

fn write_block<W: Write>(block: &Block, w: &mut W) -> fmt::Result {
    match block {
        Block::Paragraph(inlines) => {
            write!(w, "<p>")?;
            for (idx, inline) in inlines.iter().enumerate() {
                if idx > 0 && needs_space(inline) {
                    write!(w, " ")?;
                }
                write_inline(inline, w)?;
            }
            writeln!(w, "</p>")
        }
        Block::OrderedList(items) => {
            writeln!(w, "<ol>")?;
            for item in items {
                writeln!(w, "<li>{}</li>", escape(item))?;
            }
            writeln!(w, "</ol>")
        }
        Block::Row { class, columns } => {
            writeln!(w, "<div class=\"{}\">", escape(class))?;
            for column in columns {
                writeln!(w, "<div class=\"{}\">", escape(&column.class))?;
                for b in column.blocks.iter() {
                    write_block(b, w)?;
                }
                writeln!(w, "</div>")?;
            }
            writeln!(w, "</div>")
        }
        Block::Table(table) => write_table(table, w),
    }
}

// Citation markers and punctuation stick to the preceding text.
fn needs_space(inline: &Inline) -> bool {
    match inline {
        Inline::Citation(_) => false,
        Inline::Text(s) => !s.starts_with([',', '.', ';', ':', ')']),
        _ => true,
    }
}

fn write_inline<W: Write>(inline: &Inline, w: &mut W) -> fmt::Result {
    match inline {
        Inline::Text(s) => write!(w, "{}", escape(s)),
        Inline::Bold(s) => write!(w, "<b>{}</b>", escape(s)),
        Inline::Span { class, text } => write!(
            w,
            "<span class=\"{}\">{}</span>",
            escape(class),
            escape(text)
        ),
        Inline::Citation(idx) => write!(
            w,
            "<sup class=\"footnote-ref\"><a href=\"#footnote-{0}\" id=\"footnote-ref-{0}\">[{0}]</a></sup>",
            idx
        ),
    }
}

fn write_table<W: Write>(table: &TallyTable, w: &mut W) -> fmt::Result {
    writeln!(w, "<table class=\"table table-striped table-responsive-lg\">")?;
    writeln!(w, "<caption>{}</caption>", escape(&table.caption))?;
    writeln!(w, "<thead class=\"thead-dark\">")?;
    write!(w, "<tr>")?;
    for h in table.headers.iter() {
        write!(w, "<th>{}</th>", escape(h))?;
    }
    writeln!(w, "</tr>")?;
    writeln!(w, "</thead>")?;
    writeln!(w, "<tbody>")?;
    for row in table.rows.iter() {
        write!(w, "<tr><th scope=\"row\">{}</th>", escape(&row.candidate))?;
        for (idx, v) in row.values.iter().enumerate() {
            if row.highlighted == Some(idx) {
                write!(w, "<td class=\"font-weight-bold\">{}</td>", v)?;
            } else {
                write!(w, "<td>{}</td>", v)?;
            }
        }
        if row.winner {
            write!(w, "<td class=\"font-weight-bold\">{}</td>", escape(&row.candidate))?;
        } else {
            write!(w, "<td></td>")?;
        }
        writeln!(w, "</tr>")?;
    }
    writeln!(w, "</tbody>")?;
    writeln!(w, "</table>")
}

/// Renders the footnote list placed after the page section.
/// Nothing is written when the page has no footnotes.
pub fn write_footnotes<W: Write>(
    footnotes: RenderedFootnotes<'_>,
    heading: &str,
    w: &mut W,
) -> fmt::Result {
    if footnotes.len() == 0 {
        return Ok(());
    }
    writeln!(w, "<aside class=\"footnotes\">")?;
    writeln!(w, "<h2>{}</h2>", escape(heading))?;
    writeln!(w, "<ol class=\"footnotes\">")?;
    for entry in footnotes {
        writeln!(
            w,
            "<li id=\"footnote-{0}\" value=\"{0}\">{1} <a href=\"{2}\">{2}</a> <a href=\"#footnote-ref-{0}\">&#8617;</a></li>",
            entry.index,
            escape(&entry.description),
            escape(&entry.link)
        )?;
    }
    writeln!(w, "</ol>")?;
    writeln!(w, "</aside>")
}

pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut res = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&#39;"),
            c => res.push(c),
        }
    }
    Cow::Owned(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use footnotes::{render_footnotes, FootnoteRegistry};

    #[test]
    fn changes_are_signed() {
        assert_eq!(TallyValue::Change(8).to_string(), "+8");
        assert_eq!(TallyValue::Change(-15).to_string(), "-15");
        assert_eq!(TallyValue::Change(0).to_string(), "0");
        assert_eq!(TallyValue::Count(31).to_string(), "31");
    }

    #[test]
    fn escaping() {
        assert_eq!(escape("Kemeny–Young"), Cow::Borrowed("Kemeny–Young"));
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape("Copeland's"), "Copeland&#39;s");
    }

    #[test]
    fn citation_marker_follows_text() {
        let p = Block::Paragraph(vec![
            Inline::bold("\"Copeland's method\""),
            Inline::text(","),
            Inline::Citation(CitationIndex(1)),
            Inline::text("for example"),
        ]);
        let mut out = String::new();
        write_block(&p, &mut out).unwrap();
        assert_eq!(
            out,
            "<p><b>&quot;Copeland&#39;s method&quot;</b>,<sup class=\"footnote-ref\"><a href=\"#footnote-1\" id=\"footnote-ref-1\">[1]</a></sup> for example</p>\n"
        );
    }

    #[test]
    fn no_footnotes_no_list() {
        let registry = FootnoteRegistry::new();
        let mut out = String::new();
        write_footnotes(render_footnotes(&registry), "Footnotes", &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn footnote_list_keeps_indices() {
        let mut registry = FootnoteRegistry::new();
        registry.register("first", "https://example.org/1").unwrap();
        registry.register("second", "https://example.org/2").unwrap();
        let mut out = String::new();
        write_footnotes(render_footnotes(&registry), "Notes", &mut out).unwrap();
        let first = out.find("id=\"footnote-1\"").unwrap();
        let second = out.find("id=\"footnote-2\"").unwrap();
        assert!(first < second);
        assert!(out.contains("<h2>Notes</h2>"));
    }

    #[test]
    fn citations_are_collected_from_columns() {
        let section = PageSection {
            class: "text-left".to_string(),
            title: "t".to_string(),
            blocks: vec![
                Block::Paragraph(vec![Inline::Citation(CitationIndex(1))]),
                Block::Row {
                    class: "row".to_string(),
                    columns: vec![Column {
                        class: "col".to_string(),
                        blocks: vec![Block::Paragraph(vec![
                            Inline::text("x"),
                            Inline::Citation(CitationIndex(2)),
                        ])],
                    }],
                },
            ],
        };
        assert_eq!(section.citations(), vec![CitationIndex(1), CitationIndex(2)]);
    }
}
