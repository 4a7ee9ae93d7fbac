use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use herodex::field::Field;
use herodex::pipeline::{PageSize, QueryPipeline};
use herodex::record::load_records_or_empty;
use herodex::{detail, render, urlstate};

#[derive(Parser)]
#[command(name = "herodex", about = "Sort, search, and page through a character dataset", version)]
struct Cli {
    /// Path to the dataset (JSON array of character records)
    dataset: PathBuf,

    /// Restore the view from an encoded query string
    #[arg(long)]
    state: Option<String>,

    /// Search term; may start with an operator (+ - = != > < ~)
    #[arg(long, requires = "field")]
    search: Option<String>,

    /// Field key to search (name, full_name, strength, height, ...)
    #[arg(long)]
    field: Option<String>,

    /// Column path to sort by (e.g. powerstats.strength, name)
    #[arg(long)]
    sort: Option<String>,

    /// Sort direction: asc or desc
    #[arg(long)]
    order: Option<String>,

    /// Page number (1-based)
    #[arg(long)]
    page: Option<usize>,

    /// Records per page: 10, 20, 50, 100, or all
    #[arg(long = "page-size")]
    page_size: Option<String>,

    /// Show the detail view for one character instead of the table
    #[arg(long)]
    slug: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let records = load_records_or_empty(&cli.dataset);

    let stdout = io::stdout().lock();
    let mut out = BufWriter::new(stdout);

    if let Some(slug) = &cli.slug {
        detail::render_detail(&mut out, &records, slug)?;
        out.flush()?;
        return Ok(());
    }

    // The restored state first, then each flag as a user interaction on
    // top of it.
    let mut state = cli.state.as_deref().map(urlstate::decode).unwrap_or_default();
    if let (Some(term), Some(key)) = (&cli.search, &cli.field) {
        state.search_term = term.clone();
        state.search_field = key.clone();
    }
    if let Some(sort) = &cli.sort {
        // An unknown column leaves the view unsorted rather than erroring.
        state.sort_column = Field::from_path(sort);
        if state.sort_column.is_none() {
            tracing::warn!("unknown sort column: {sort}");
        }
    }
    if let Some(order) = &cli.order {
        state.sort_order = herodex::coerce::SortOrder::from_param(order);
    }
    if let Some(page) = cli.page {
        state.page_index = page.max(1);
    }
    if let Some(size) = &cli.page_size {
        state.page_size = PageSize::from_param(size).unwrap_or_default();
    }

    let mut pipeline = QueryPipeline::with_state(records, state);
    let page = pipeline.current_page();
    render::render_page(&mut out, &page)?;
    drop(page);

    // The shareable address for this exact view.
    writeln!(out, "state: {}", urlstate::encode(pipeline.state()))?;
    out.flush()?;
    Ok(())
}
