use crate::{config::Config, success};

pub async fn purge(config: &Config) {
    let mut store = super::open_store(config).await;
    store.purge();
    super::persist(&store).await;
    success!("All tables purged");
}
