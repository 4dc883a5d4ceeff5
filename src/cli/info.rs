use tabled::Table;

use crate::{config::Config, info, types::CollectionCountRow};

pub async fn info(config: &Config) {
    let store = super::open_store(config).await;

    let rows: Vec<CollectionCountRow> = store
        .collections()
        .map(|(name, collection)| CollectionCountRow {
            collection: name.to_string(),
            records: collection.len(),
        })
        .collect();

    if rows.is_empty() {
        info!("Store at {} is empty", config.db_path.display());
        return;
    }

    println!("{}", Table::new(rows));
}
