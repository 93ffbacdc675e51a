use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::debug;

use eatout_cli::export::{write_markers_csv, write_markers_json};
use eatout_cli::session::{Session, build_filter};
use eatout_cli::summary::{
    cities_sections, countries_section, cuisines_sections, markers_section,
    overview_sections, render_sections, source_section,
};
use eatout_cli::views::{cities_view, cuisines_view, overview_view};
use eatout_transform::{EnrichedListings, map_markers};

use crate::cli::{FilterArgs, MarkerArgs, SourceArgs, ViewArgs};

#[derive(Clone, Copy)]
pub enum View {
    Overview,
    Cities,
    Cuisines,
}

/// Load, filter and print one or more views. Later views reuse the
/// snapshot the first one loaded.
pub fn run_views(session: &Session, args: &ViewArgs, views: &[View]) -> Result<()> {
    for (index, view) in views.iter().enumerate() {
        let (listings, filtered) = load_filtered(session, &args.source, &args.filter)?;
        let currency = listings.reporting_currency.as_str();
        let mut sections = Vec::new();
        if index == 0 {
            sections.push(source_section(&listings, filtered.height()));
        }
        match view {
            View::Overview => {
                let view = overview_view(&filtered, args.top).context("compute overview")?;
                sections.extend(overview_sections(&view));
            }
            View::Cities => {
                let view = cities_view(&filtered, args.top).context("compute city rankings")?;
                sections.extend(cities_sections(&view, currency));
            }
            View::Cuisines => {
                let view =
                    cuisines_view(&filtered, args.top).context("compute cuisine rankings")?;
                sections.extend(cuisines_sections(&view, currency));
            }
        }
        println!("{}", render_sections(&sections));
        println!();
    }
    let stats = session.cache_stats();
    debug!(hits = stats.hits, misses = stats.misses, "dataset cache");
    Ok(())
}

pub fn run_markers(session: &Session, args: &MarkerArgs) -> Result<()> {
    let (listings, filtered) = load_filtered(session, &args.source, &args.filter)?;
    let map = map_markers(&filtered).context("project markers")?;

    if let Some(path) = &args.csv {
        let file =
            File::create(path).with_context(|| format!("create {}", path.display()))?;
        write_markers_csv(&map, BufWriter::new(file))?;
        println!("Wrote {} markers to {}", map.markers.len(), path.display());
    } else if args.json {
        write_markers_json(&map, io::stdout().lock())?;
    } else {
        let sections = [markers_section(&map, &listings.reporting_currency)];
        println!("{}", render_sections(&sections));
    }
    Ok(())
}

pub fn run_countries(session: &Session) -> Result<()> {
    let section = countries_section(&session.pipeline().directories().countries);
    println!("{section}");
    Ok(())
}

fn load_filtered(
    session: &Session,
    source: &SourceArgs,
    filter: &FilterArgs,
) -> Result<(EnrichedListings, DataFrame)> {
    let listings = session.load(&source.listings, &source.rates)?;
    let filter = build_filter(
        &filter.countries,
        (filter.min_rating, filter.max_rating),
        (filter.min_price, filter.max_price),
    );
    let filtered = filter.apply(&listings.frame).context("apply filters")?;
    Ok((listings, filtered))
}
