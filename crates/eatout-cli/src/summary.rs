//! Table rendering for the dashboard views.

use std::fmt;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use eatout_model::CountryDirectory;
use eatout_transform::{
    EnrichedListings, MarkerMap, RankedCount, RankedMean, RestaurantHighlight,
};

use crate::views::{CitiesView, CuisinesView, OverviewView};

/// A titled table.
pub struct Section {
    pub title: String,
    pub table: Table,
}

impl Section {
    fn new(title: impl Into<String>, table: Table) -> Self {
        Self {
            title: title.into(),
            table,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        write!(f, "{}", self.table)
    }
}

/// Join sections with a blank line between them.
pub fn render_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Snapshot, row counts and data-quality counters.
pub fn source_section(listings: &EnrichedListings, filtered_rows: usize) -> Section {
    let cleaning = &listings.report.cleaning;
    let enrichment = &listings.report.enrichment;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Source"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Snapshot"), Cell::new(listings.snapshot.short())]);
    table.add_row(vec![Cell::new("Rows read"), Cell::new(cleaning.rows_in)]);
    table.add_row(vec![
        Cell::new("Dropped (missing values)"),
        count_cell(cleaning.dropped_incomplete, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Dropped (duplicates)"),
        count_cell(cleaning.dropped_duplicates, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Currency fallbacks"),
        count_cell(enrichment.currency_fallbacks, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Country fallbacks"),
        count_cell(enrichment.country_fallbacks, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Prices without rate"),
        count_cell(enrichment.missing_rates, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Prices over bound"),
        count_cell(enrichment.prices_over_bound, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Listings shown")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(filtered_rows).add_attribute(Attribute::Bold),
    ]);
    Section::new(
        format!("Listings (prices in {})", listings.reporting_currency),
        table,
    )
}

pub fn overview_sections(view: &OverviewView) -> Vec<Section> {
    let metrics = &view.metrics;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Countries"),
        header_cell("Restaurants"),
        header_cell("Cities"),
        header_cell("Cuisines"),
        header_cell("Votes"),
    ]);
    apply_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(metrics.countries),
        Cell::new(metrics.restaurants),
        Cell::new(metrics.cities),
        Cell::new(metrics.cuisines),
        Cell::new(metrics.votes),
    ]);
    vec![
        Section::new("Overview", table),
        Section::new(
            "Countries with most restaurants",
            count_table("Country", "Restaurants", &view.restaurants_per_country),
        ),
        Section::new(
            "Countries with most cuisines",
            count_table("Country", "Cuisines", &view.cuisines_per_country),
        ),
        Section::new(
            "Cities per country",
            count_table("Country", "Cities", &view.cities_per_country),
        ),
    ]
}

pub fn cities_sections(view: &CitiesView, currency: &str) -> Vec<Section> {
    let price = format!("Mean price for two ({currency})");
    vec![
        Section::new(
            "Cities with most cuisines",
            count_table("City", "Cuisines", &view.cuisines_per_city),
        ),
        Section::new(
            "Cities with most restaurants rated above 4",
            count_table("City", "Restaurants", &view.excellent_cities),
        ),
        Section::new(
            "Cities with most restaurants rated below 2.5",
            count_table("City", "Restaurants", &view.poor_cities),
        ),
        Section::new(
            "Most expensive cities",
            mean_table(&["City", "Country"], &price, &view.most_expensive_cities),
        ),
        Section::new(
            "Cheapest cities",
            mean_table(&["City", "Country"], &price, &view.cheapest_cities),
        ),
    ]
}

pub fn cuisines_sections(view: &CuisinesView, currency: &str) -> Vec<Section> {
    let mut highlights = Table::new();
    highlights.set_header(vec![
        header_cell(""),
        header_cell("Restaurant"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut highlights);
    align_column(&mut highlights, 2, CellAlignment::Right);
    highlights.add_row(rating_row("Best rated", view.top_rated.as_ref()));
    highlights.add_row(rating_row("Worst rated", view.lowest_rated.as_ref()));
    highlights.add_row(price_row("Highest mean price", view.most_expensive.as_ref(), currency));
    highlights.add_row(price_row("Lowest mean price", view.cheapest.as_ref(), currency));

    let price = format!("Mean price for two ({currency})");
    vec![
        Section::new("Restaurants", highlights),
        Section::new(
            "Best cuisines by mean rating",
            mean_table(&["Cuisine"], "Mean rating", &view.best_cuisines),
        ),
        Section::new(
            "Worst cuisines by mean rating",
            mean_table(&["Cuisine"], "Mean rating", &view.worst_cuisines),
        ),
        Section::new(
            "Most expensive cuisines",
            mean_table(&["Cuisine"], &price, &view.expensive_cuisines),
        ),
        Section::new(
            "Cuisines with most online delivery",
            count_table("Cuisine", "Restaurants", &view.delivering_cuisines),
        ),
    ]
}

pub fn markers_section(map: &MarkerMap, currency: &str) -> Section {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Restaurant"),
        header_cell("Cuisine"),
        header_cell(&format!("Price ({currency})")),
        header_cell("Rating"),
        header_cell("Color"),
        header_cell("Latitude"),
        header_cell("Longitude"),
    ]);
    apply_wide_table_style(&mut table);
    for index in [2, 3, 5, 6] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for marker in &map.markers {
        table.add_row(vec![
            Cell::new(&marker.restaurant_name),
            Cell::new(&marker.cuisine),
            optional_number_cell(marker.price_brl),
            optional_number_cell(marker.aggregate_rating),
            Cell::new(&marker.rating_color),
            Cell::new(format!("{:.4}", marker.latitude)),
            Cell::new(format!("{:.4}", marker.longitude)),
        ]);
    }
    let title = match map.center {
        Some((lat, lon)) => format!(
            "{} markers, centered at {lat:.4}, {lon:.4}",
            map.markers.len()
        ),
        None => "No markers".to_string(),
    };
    Section::new(title, table)
}

pub fn countries_section(countries: &CountryDirectory) -> Section {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Country")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (code, name) in countries.iter() {
        table.add_row(vec![Cell::new(code), Cell::new(name)]);
    }
    Section::new(format!("{} countries", countries.len()), table)
}

fn count_table(key: &str, value: &str, rows: &[RankedCount]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell(key), header_cell(value)]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    if rows.is_empty() {
        table.add_row(vec![dim_cell("-"), dim_cell("no data"), dim_cell("-")]);
    }
    for (rank, row) in rows.iter().enumerate() {
        table.add_row(vec![
            dim_cell(rank + 1),
            Cell::new(&row.key),
            Cell::new(row.count),
        ]);
    }
    table
}

fn mean_table(keys: &[&str], value: &str, rows: &[RankedMean]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(keys.iter().map(|key| header_cell(key)));
    header.push(header_cell(value));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, keys.len() + 1, CellAlignment::Right);
    if rows.is_empty() {
        let mut row = vec![dim_cell("-"), dim_cell("no data")];
        row.extend((1..keys.len()).map(|_| dim_cell("-")));
        row.push(dim_cell("-"));
        table.add_row(row);
    }
    for (rank, row) in rows.iter().enumerate() {
        let mut cells = vec![dim_cell(rank + 1)];
        cells.extend(row.keys.iter().map(Cell::new));
        cells.push(Cell::new(format!("{:.2}", row.mean)));
        table.add_row(cells);
    }
    table
}

fn rating_row(label: &str, highlight: Option<&RestaurantHighlight>) -> Vec<Cell> {
    match highlight {
        Some(h) => vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(&h.restaurant_name),
            Cell::new(format!("{:.1}/5.0 ({} votes)", h.aggregate_rating, h.votes)),
        ],
        None => vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            dim_cell("-"),
            dim_cell("-"),
        ],
    }
}

fn price_row(label: &str, highlight: Option<&RankedMean>, currency: &str) -> Vec<Cell> {
    let name = highlight.and_then(|h| h.keys.first());
    match (highlight, name) {
        (Some(h), Some(name)) => vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(name),
            Cell::new(format!("{currency} {:.2}", h.mean)),
        ],
        _ => vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            dim_cell("-"),
            dim_cell("-"),
        ],
    }
}

fn optional_number_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format!("{value:.2}")),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Wide style for the marker listing.
fn apply_wide_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
