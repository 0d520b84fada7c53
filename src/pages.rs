use log::{debug, info, warn};

use footnotes::builder::FootnoteGenerator;
use footnotes::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::{diff, Difference};

use crate::pages::config_reader::*;
use crate::pages::layout::{write_footnotes, PageSection};

pub mod layout;
pub mod ranked_systems;

#[derive(Debug, Snafu)]
pub enum PageError {
    #[snafu(display("Unknown page {name:?} (try --list)"))]
    UnknownPage { name: String },
    #[snafu(display("Unknown output format {format:?}: expected html or json"))]
    UnknownFormat { format: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error serializing the JSON summary"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Invalid footnote in page content"))]
    Footnote { source: FootnoteError },
    #[snafu(display("Error formatting the page"))]
    Formatting { source: std::fmt::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PageResult<T> = Result<T, PageError>;

pub mod config_reader {
    use crate::pages::*;

    pub const DEFAULT_SECTION_CLASS: &str = "text-left";
    pub const DEFAULT_FOOTNOTES_HEADING: &str = "Footnotes";

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
    pub struct OutputSettings {
        #[serde(rename = "sectionClass")]
        pub section_class: Option<String>,
        #[serde(rename = "footnotesHeading")]
        pub footnotes_heading: Option<String>,
        #[serde(rename = "outputPath")]
        pub output_path: Option<String>,
    }

    impl OutputSettings {
        pub fn section_class(&self) -> &str {
            self.section_class
                .as_deref()
                .unwrap_or(DEFAULT_SECTION_CLASS)
        }

        pub fn footnotes_heading(&self) -> &str {
            self.footnotes_heading
                .as_deref()
                .unwrap_or(DEFAULT_FOOTNOTES_HEADING)
        }
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
    pub struct SiteConfig {
        #[serde(rename = "outputSettings", default)]
        pub output_settings: OutputSettings,
    }

    pub fn read_config(path: &str) -> PageResult<SiteConfig> {
        let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
        debug!("read config: {:?}", contents);
        let config: SiteConfig =
            serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
        Ok(config)
    }
}

/// The pages that can be rendered.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Page {
    RankedSystems,
}

impl Page {
    pub const ALL: [Page; 1] = [Page::RankedSystems];

    pub fn name(&self) -> &'static str {
        match self {
            Page::RankedSystems => "ranked-systems",
        }
    }

    pub fn from_name(name: &str) -> PageResult<Page> {
        Page::ALL
            .iter()
            .find(|p| p.name() == name)
            .copied()
            .context(UnknownPageSnafu { name })
    }

    fn build(&self, gen: &mut FootnoteGenerator<'_>, settings: &OutputSettings) -> PageResult<PageSection> {
        match self {
            Page::RankedSystems => ranked_systems::page(gen, settings.section_class()),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum OutputFormat {
    Html,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> PageResult<OutputFormat> {
        match name {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            x => UnknownFormatSnafu { format: x }.fail(),
        }
    }
}

/// A page after one render pass, with the footnotes it registered.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page: Page,
    pub section: PageSection,
    pub footnotes: FootnoteRegistry,
    /// The distinct links cited on the page, in the order of their first citation.
    /// Collected by the parent callback.
    pub sources: Vec<String>,
}

/// Renders a page from scratch. Every call starts with a new registry,
/// so the numbering of the footnotes starts again at 1.
pub fn render_page(page: Page, settings: &OutputSettings) -> PageResult<RenderedPage> {
    info!("Rendering page {}", page.name());
    let mut registry = FootnoteRegistry::new();
    let mut sources: Vec<String> = Vec::new();
    let section = {
        let mut gen = FootnoteGenerator::new(&mut registry).set_footnote(|e: &FootnoteEntry| {
            debug!("render_page: footnote [{}] {}", e.index, e.link);
            if !sources.contains(&e.link) {
                sources.push(e.link.clone());
            }
        });
        page.build(&mut gen, settings)?
    };
    check_citations(&section, &registry)?;
    info!(
        "Page {}: {} footnotes, {} distinct sources",
        page.name(),
        registry.len(),
        sources.len()
    );
    Ok(RenderedPage {
        page,
        section,
        footnotes: registry,
        sources,
    })
}

/// The markers of the section must be exactly the registered footnotes, in order.
fn check_citations(section: &PageSection, registry: &FootnoteRegistry) -> PageResult<()> {
    let markers = section.citations();
    let registered: Vec<CitationIndex> = render_footnotes(registry).map(|e| e.index).collect();
    if markers != registered {
        whatever!(
            "Citation markers {:?} do not match the registered footnotes {:?}",
            markers,
            registered
        )
    }
    Ok(())
}

pub fn to_html(rendered: &RenderedPage, settings: &OutputSettings) -> PageResult<String> {
    let mut out = String::new();
    rendered
        .section
        .write_html(&mut out)
        .context(FormattingSnafu {})?;
    write_footnotes(
        render_footnotes(&rendered.footnotes),
        settings.footnotes_heading(),
        &mut out,
    )
    .context(FormattingSnafu {})?;
    Ok(out)
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FootnoteSummary {
    pub index: u32,
    pub description: String,
    pub link: String,
}

pub fn build_summary_js(rendered: &RenderedPage) -> JSValue {
    let footnotes: Vec<FootnoteSummary> = render_footnotes(&rendered.footnotes)
        .map(|e| FootnoteSummary {
            index: e.index.0,
            description: e.description.clone(),
            link: e.link.clone(),
        })
        .collect();
    json!({
        "page": rendered.page.name(),
        "title": rendered.section.title,
        "footnotes": footnotes,
        "sources": rendered.sources,
    })
}

/// Everything needed to produce one page, as requested on the command line.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RenderRequest {
    pub page: String,
    pub format: Option<String>,
    pub config: Option<String>,
    pub out: Option<String>,
    pub reference: Option<String>,
}

pub fn render_output(request: &RenderRequest) -> PageResult<(String, Option<String>)> {
    let config: SiteConfig = match request.config.as_deref() {
        Some(p) => read_config(p)?,
        None => SiteConfig::default(),
    };
    info!("config: {:?}", config);
    let settings = config.output_settings;

    let page = Page::from_name(request.page.as_str())?;
    let format = OutputFormat::from_name(request.format.as_deref().unwrap_or("html"))?;
    let rendered = render_page(page, &settings)?;

    let output = match format {
        OutputFormat::Html => to_html(&rendered, &settings)?,
        OutputFormat::Json => {
            let js = build_summary_js(&rendered);
            let mut s = serde_json::to_string_pretty(&js).context(SerializingJsonSnafu {})?;
            s.push('\n');
            s
        }
    };
    let out_path = request.out.clone().or(settings.output_path);
    Ok((output, out_path))
}

pub fn run_page(request: &RenderRequest) -> PageResult<()> {
    let (output, out_path) = render_output(request)?;

    match out_path.as_deref() {
        None | Some("stdout") => print!("{}", output),
        Some(p) => {
            info!("Writing page to {}", p);
            fs::write(p, output.as_bytes()).context(WritingFileSnafu { path: p })?;
        }
    }

    // The reference output, if provided for comparison
    if let Some(ref_p) = request.reference.as_deref() {
        check_reference(&output, ref_p)?;
    }
    Ok(())
}

fn check_reference(output: &str, reference_path: &str) -> PageResult<()> {
    let reference = fs::read_to_string(reference_path).context(OpeningFileSnafu {
        path: reference_path,
    })?;
    if reference != output {
        // The page may be going to stdout: the diff goes to the log.
        warn!(
            "Found differences with the reference {}:\n{}",
            reference_path,
            format_diff(reference.as_str(), output)
        );
        whatever!("Difference detected between the rendered page and {}", reference_path)
    }
    info!("Rendered page matches {}", reference_path);
    Ok(())
}

/// A line diff: removed lines start with '-', added lines with '+'.
fn format_diff(orig: &str, edit: &str) -> String {
    let (_, changes) = diff(orig, edit, "\n");
    let mut res = String::new();
    for change in changes {
        let (prefix, text) = match change {
            Difference::Same(t) => (' ', t),
            Difference::Rem(t) => ('-', t),
            Difference::Add(t) => ('+', t),
        };
        for line in text.lines() {
            res.push(prefix);
            res.push_str(line);
            res.push('\n');
        }
    }
    res
}
