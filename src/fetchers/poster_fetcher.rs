use std::collections::{HashMap, HashSet};

use crate::{
    clients::http_client::HttpClient, extractors::poster_extractor::PosterExtractor,
    model::record::CanonicalRecord,
};

/// Looks up poster images for the rows on screen.
///
/// The cache is keyed by the IMDb title id (`tt…`) read from each record's
/// URL, not by `external_id`. For IMDb exports the two carry the same value
/// (the `Const` column); records whose URL holds no title id are skipped.
/// Each title id is requested at most once per session; misses are cached
/// too, so a failing title is not retried.
#[derive(Debug)]
pub struct PosterFetcher {
    client: HttpClient,
    title_base_url: String,
    cache: HashMap<String, Option<String>>,
}

impl PosterFetcher {
    pub fn new(client: HttpClient, title_base_url: &str) -> Self {
        PosterFetcher {
            client,
            title_base_url: title_base_url.trim_end_matches('/').to_string(),
            cache: HashMap::new(),
        }
    }

    /// Poster URL per record `external_id`, for the records that have one.
    pub async fn posters_for_page(
        &mut self,
        records: &[CanonicalRecord],
    ) -> HashMap<String, String> {
        let title_ids: Vec<(String, String)> = records
            .iter()
            .filter_map(|r| {
                let title_id = PosterExtractor::extract_title_id(r.url.as_deref()?)?;
                Some((r.external_id.clone(), title_id))
            })
            .collect();

        let missing: HashSet<&String> = title_ids
            .iter()
            .map(|(_, title_id)| title_id)
            .filter(|title_id| !self.cache.contains_key(*title_id))
            .collect();

        let mut children = vec![];
        for title_id in missing {
            let client = self.client.clone();
            let page_url = format!("{}/{}/", self.title_base_url, title_id);
            let title_id = title_id.clone();

            children.push(tokio::spawn(async move {
                match client.get_text(&page_url).await {
                    Ok(html) => {
                        let poster = PosterExtractor::extract_poster_url(&html);
                        if poster.is_none() {
                            log::debug!("No poster found on {}", page_url);
                        }
                        (title_id, poster)
                    }
                    Err(e) => {
                        log::debug!("Poster lookup for {} failed: {}", title_id, e);
                        (title_id, None)
                    }
                }
            }));
        }

        for child in children {
            match child.await {
                Ok((title_id, poster)) => {
                    self.cache.insert(title_id, poster);
                }
                Err(e) => log::debug!("Poster task did not finish: {}", e),
            }
        }

        title_ids
            .into_iter()
            .filter_map(|(external_id, title_id)| {
                let poster = self.cache.get(&title_id)?.clone()?;
                Some((external_id, poster))
            })
            .collect()
    }

    #[cfg(test)]
    fn cached(&self, title_id: &str) -> Option<&Option<String>> {
        self.cache.get(title_id)
    }

    #[cfg(test)]
    fn remember(&mut self, title_id: &str, poster: Option<&str>) {
        self.cache
            .insert(title_id.to_string(), poster.map(String::from));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::model::record::fixtures::record;

    fn fetcher() -> PosterFetcher {
        let client = HttpClient::new("test-agent", Duration::from_millis(50)).unwrap();
        // Rejected by the client before any connection is opened.
        PosterFetcher::new(client, "unsupported://posters/title/")
    }

    fn linked(id: &str, title_id: &str) -> CanonicalRecord {
        CanonicalRecord {
            url: Some(format!("https://www.imdb.com/title/{}/", title_id)),
            ..record(id)
        }
    }

    #[tokio::test]
    async fn cached_titles_are_served_without_requests() {
        let mut fetcher = fetcher();
        fetcher.remember("tt0000001", Some("https://img/1.jpg"));
        fetcher.remember("tt0000002", None);

        let posters = fetcher
            .posters_for_page(&[
                linked("a", "tt0000001"),
                linked("b", "tt0000002"),
                record("no url"),
            ])
            .await;

        assert_eq!(posters.len(), 1);
        assert_eq!(posters.get("a").map(String::as_str), Some("https://img/1.jpg"));
    }

    #[tokio::test]
    async fn failed_lookups_are_cached_as_misses() {
        let mut fetcher = fetcher();

        let posters = fetcher.posters_for_page(&[linked("a", "tt0000003")]).await;

        assert!(posters.is_empty());
        assert_eq!(fetcher.cached("tt0000003"), Some(&None));
    }

    #[tokio::test]
    async fn posters_are_returned_under_external_id_not_title_id() {
        let mut fetcher = fetcher();
        fetcher.remember("tt0000004", Some("https://img/4.jpg"));

        let posters = fetcher
            .posters_for_page(&[linked("row-7", "tt0000004"), linked("row-8", "tt0000004")])
            .await;

        assert_eq!(posters.len(), 2);
        assert_eq!(posters.get("row-7").map(String::as_str), Some("https://img/4.jpg"));
        assert_eq!(posters.get("row-8").map(String::as_str), Some("https://img/4.jpg"));
        assert!(!posters.contains_key("tt0000004"));
    }
}
