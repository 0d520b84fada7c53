use clap::Parser;

/// Renders the static pages about ranked voting systems, with their footnotes.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (default ranked-systems) The name of the page to render. Use --list to see all the pages.
    #[clap(short, long, value_parser)]
    pub page: Option<String>,

    /// (html or json, default html) The output format. The JSON output only summarizes the title and the
    /// footnotes of the page.
    #[clap(short, long, value_parser)]
    pub format: Option<String>,

    /// (file path, optional) A JSON file with the site settings (CSS class of the page section,
    /// heading of the footnotes, output path).
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the page will be written to the given location.
    /// Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing an expected rendering of the page. If provided, the
    /// rendered output is compared with it and the differences are printed.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// Lists the names of the pages that can be rendered.
    #[clap(long, takes_value = false)]
    pub list: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
