use crate::{config::Config, error, info, success, sync, warning};

pub async fn recommend(config: &Config) {
    let (api, mut store) = super::session(config).await;

    let pb = super::spinner("Gathering recommendations...");
    let result = sync::update_recommendations(&api, &mut store, &config.playlist_name).await;
    pb.finish_and_clear();

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => error!("Cannot update recommendations. Err: {}", e),
    };

    if summary.created {
        info!(
            "Created playlist {} ({})",
            config.playlist_name, summary.playlist_id
        );
    }

    if summary.added == 0 {
        warning!("No recommendations came back. Try spotbrainz fetch first.");
    } else {
        success!(
            "Added {} recommended tracks to {}",
            summary.added,
            config.playlist_name
        );
    }
}
