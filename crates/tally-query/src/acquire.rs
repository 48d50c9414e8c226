//! Acquisition façade: both item kinds in, one record collection out.

use tally_core::{ItemKind, Record, normalize};

use crate::error::QueryError;
use crate::{MarkCountFilter, MediaSource};

/// Records from one successful acquisition, with the server-side totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquisition {
    /// Scenes first, then images, each in server order.
    pub records: Vec<Record>,
    pub scene_count: u64,
    pub image_count: u64,
}

/// Fetch scenes and images with a positive mark count and merge them.
///
/// Both requests run concurrently; the first failure aborts the whole
/// acquisition and nothing partial is returned.
///
/// # Errors
///
/// Returns the first [`QueryError`] raised by either fetch.
pub async fn fetch_all<S: MediaSource>(source: &S) -> Result<Acquisition, QueryError> {
    let filter = MarkCountFilter::positive();
    tracing::info!("fetching scenes and images with mark count > 0");

    let (scenes, images) = tokio::try_join!(
        source.find_items(ItemKind::Scene, &filter),
        source.find_items(ItemKind::Image, &filter),
    )?;
    tracing::info!(scenes = scenes.count, images = images.count, "fetched items");

    let records = scenes
        .items
        .into_iter()
        .map(|raw| normalize(raw, ItemKind::Scene))
        .chain(
            images
                .items
                .into_iter()
                .map(|raw| normalize(raw, ItemKind::Image)),
        )
        .collect();

    Ok(Acquisition {
        records,
        scene_count: scenes.count,
        image_count: images.count,
    })
}
