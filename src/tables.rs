use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::{Itertools, MinMaxResult};

use crate::pricing::{PriceTable, Quote, Ranking};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

#[must_use]
pub fn build_quote_table(quote: &Quote) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Start", "End", "Duration", "Price", "Energy", "Cost"]);
    for segment in &quote.segments {
        table.add_row(vec![
            Cell::new(segment.interval.start).set_alignment(CellAlignment::Right),
            Cell::new(segment.interval.end)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(segment.interval.len()).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", segment.price)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", segment.energy)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", segment.cost)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(quote.coverage()).set_alignment(CellAlignment::Right),
        Cell::new(""),
        Cell::new(format!("{:.3}", quote.energy())).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.2}", quote.total))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

#[must_use]
pub fn build_ranking_table(ranking: &Ranking) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Start", "End", "Cost"]);
    for (rank, (window, cost)) in ranking.priced.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(window.start).set_alignment(CellAlignment::Right),
            Cell::new(window.end).set_alignment(CellAlignment::Right),
            Cell::new(format!("{cost:.2}"))
                .set_alignment(CellAlignment::Right)
                .fg(if rank == 0 { Color::Green } else { Color::Reset }),
        ]);
    }
    for (window, reason) in &ranking.unavailable {
        table.add_row(vec![
            Cell::new("-").add_attribute(Attribute::Dim),
            Cell::new(window.start).set_alignment(CellAlignment::Right),
            Cell::new(window.end).set_alignment(CellAlignment::Right),
            Cell::new(reason).fg(Color::DarkYellow),
        ]);
    }
    table
}

#[must_use]
pub fn build_stations_table(prices: &PriceTable) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Station", "Intervals", "From", "Until", "Min price", "Max price"]);
    for (station_id, intervals) in prices.stations() {
        let from = intervals.iter().map(|interval| interval.range.start).min();
        let until = intervals.iter().map(|interval| interval.range.end).max();
        let (min_price, max_price) =
            match intervals.iter().map(|interval| interval.price).minmax() {
                MinMaxResult::NoElements => (None, None),
                MinMaxResult::OneElement(price) => (Some(price), Some(price)),
                MinMaxResult::MinMax(min, max) => (Some(min), Some(max)),
            };
        let optional = |value: Option<String>| Cell::new(value.unwrap_or_default());
        table.add_row(vec![
            Cell::new(station_id),
            Cell::new(intervals.len()).set_alignment(CellAlignment::Right),
            optional(from.as_ref().map(ToString::to_string)).set_alignment(CellAlignment::Right),
            optional(until.as_ref().map(ToString::to_string)).set_alignment(CellAlignment::Right),
            optional(min_price.map(|price| format!("{price:.3}")))
                .set_alignment(CellAlignment::Right)
                .fg(Color::Green),
            optional(max_price.map(|price| format!("{price:.3}")))
                .set_alignment(CellAlignment::Right)
                .fg(Color::Red),
        ]);
    }
    table
}
