use crate::{config::Config, error, success, sync};

pub async fn fetch(config: &Config) {
    let (api, mut store) = super::session(config).await;

    let pb = super::spinner("Fetching listening history...");
    let summary = match sync::fetch(&api, &mut store).await {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            error!("Fetch failed, nothing was written. Err: {}", e);
        }
    };
    pb.finish_and_clear();

    super::persist(&store).await;

    success!("Updated or created {} artists", summary.artists);
    success!("Updated or created {} albums", summary.albums);
    success!("Updated or created {} tracks", summary.tracks);
}
