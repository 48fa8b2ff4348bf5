use dt_core::{ArticleDetail, ArticleSource, ArticleSummary};
use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::logging::Logger;

/// Fetches every summary's detail with at most `concurrency` requests in
/// flight and waits for all of them to settle.
///
/// The result has one slot per summary, in input order. A failed request
/// is logged and leaves its slot as `None`.
pub async fn fetch_details<S>(
    source: &S,
    username: &str,
    summaries: &[ArticleSummary],
    concurrency: usize,
) -> Vec<Option<ArticleDetail>>
where
    S: ArticleSource + ?Sized,
{
    let semaphore = Semaphore::new(concurrency.max(1));

    let detail_futures: Vec<_> = summaries
        .iter()
        .map(|summary| {
            let semaphore = &semaphore;
            let logger = Logger::new().with_prefix(format!("[{}]", summary.slug));
            async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        logger.error(&format!("could not acquire fetch slot: {}", e));
                        return None;
                    }
                };

                logger.debug("fetching article");
                match source.fetch_article(username, &summary.slug).await {
                    Ok(detail) => {
                        logger.debug("fetched");
                        Some(detail)
                    }
                    Err(e) => {
                        logger.warn(&format!("⚠️ skipping \"{}\": {}", summary.title, e));
                        None
                    }
                }
            }
        })
        .collect();

    join_all(detail_futures).await
}
