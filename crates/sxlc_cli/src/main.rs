use crate::args::Args;
use clap::Parser;
use std::io::stderr;
use sxl_ast_parsing::parse_file;
use tracing::metadata::LevelFilter;
use tracing::{debug, trace};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

mod args;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.log_level_filter())?;
    trace!("starting sxlc with args: {args:?}");
    debug!("sxlc version: {}", env!("CARGO_PKG_VERSION"));

    let program = parse_file(&args.file)?;
    print!("{}", sxl_ast::render(&program));

    Ok(())
}

fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    // logs go to stderr so the rendered tree on stdout stays clean
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(stderr)
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}
