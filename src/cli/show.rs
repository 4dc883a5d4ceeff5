use tabled::{Table, builder::Builder};

use crate::{config::Config, info, types::Record, utils};

pub const DEFAULT_CELL_WIDTH: usize = 24;

/// API fields that are too noisy to be worth a column.
const HIDDEN_FIELDS: &[&str] = &[
    "is_local",
    "is_playable",
    "available_markets",
    "disc_number",
    "explicit",
    "external_ids",
    "external_urls",
    "href",
    "uri",
    "linked_from",
    "preview_url",
    "context",
    "type",
    "followers",
    "images",
    "release_date",
    "release_date_precision",
];

pub async fn show(
    config: &Config,
    collection: &str,
    order_by: Option<String>,
    limit: Option<usize>,
    width: usize,
) {
    let store = super::open_store(config).await;
    let records = store.all(collection);

    match render_collection(records, order_by.as_deref(), limit, width) {
        Some((table, rows)) => {
            println!("================= {} ==============", collection);
            println!("{}", table);
            println!("======== Returned {} rows =========\n", rows);
        }
        None => info!("No records returned"),
    }
}

/// Sorts, windows and tabulates records. Columns follow the first record's
/// keys minus [`HIDDEN_FIELDS`]; cells are cut to `width` characters.
///
/// Returns the table and its row count, or `None` for an empty window.
pub fn render_collection(
    records: &[Record],
    order_by: Option<&str>,
    limit: Option<usize>,
    width: usize,
) -> Option<(Table, usize)> {
    let mut window: Vec<&Record> = records.iter().collect();
    if let Some(order_by) = order_by {
        let (keys, descending) = utils::parse_order_by(order_by);
        utils::sort_records(&mut window, &keys, descending);
    }
    if let Some(limit) = limit {
        window.truncate(limit);
    }

    let first = window.first()?;
    let columns: Vec<&String> = first
        .keys()
        .filter(|k| !HIDDEN_FIELDS.contains(&k.as_str()))
        .collect();

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.to_string()));
    for record in &window {
        builder.push_record(columns.iter().map(|c| {
            record
                .get(c.as_str())
                .map(|v| utils::truncate(&utils::display_value(v), width))
                .unwrap_or_default()
        }));
    }

    Some((builder.build(), window.len()))
}
