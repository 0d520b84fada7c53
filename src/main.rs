mod args;
mod pages;

use clap::Parser;
use log::{info, LevelFilter};
use snafu::ErrorCompat;

use crate::args::Args;
use crate::pages::{Page, RenderRequest};

const DEFAULT_PAGE: &str = "ranked-systems";

fn main() {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    info!("args: {:?}", args);

    if args.list {
        for p in Page::ALL.iter() {
            println!("{}", p.name());
        }
        return;
    }

    let request = RenderRequest {
        page: args.page.unwrap_or_else(|| DEFAULT_PAGE.to_string()),
        format: args.format,
        config: args.config,
        out: args.out,
        reference: args.reference,
    };

    if let Err(e) = pages::run_page(&request) {
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
