use crate::{
    browse::RemoteQuery,
    config::SearchLimits,
    models::{Agent, Artwork},
    Result,
};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Trait for artwork sources - makes testing easier and keeps things flexible
///
/// The real implementation talks to the collection API; tests use a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ArtworkSource: Send + Sync {
    /// Raw artwork hits, including ones without an image
    async fn search_artworks(&self, query: &str, limit: u32, page: Option<u32>) -> Result<Vec<Artwork>>;
    async fn search_agents(&self, query: &str, limit: u32) -> Result<Vec<Agent>>;
    async fn get_artwork(&self, id: u64) -> Result<Artwork>;
}

/// Which artists a search matched, for the "Found artists" banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistBanner {
    pub artists: Vec<String>,
    /// Artworks gathered before de-duplication and truncation
    pub total_results: usize,
}

/// What a fetch hands back to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    pub artworks: Vec<Artwork>,
    pub banner: Option<ArtistBanner>,
}

/// Runs style browsing and the artwork + artist search on top of a source
#[derive(Clone)]
pub struct SearchEngine {
    source: Arc<dyn ArtworkSource>,
    limits: SearchLimits,
}

impl SearchEngine {
    pub fn new(source: Arc<dyn ArtworkSource>) -> Self {
        Self::with_limits(source, SearchLimits::default())
    }

    pub fn with_limits(source: Arc<dyn ArtworkSource>, limits: SearchLimits) -> Self {
        Self { source, limits }
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Dispatch a remote fetch issued by the browse controller
    pub async fn fetch(&self, query: &RemoteQuery) -> Result<FetchOutcome> {
        match query {
            RemoteQuery::Style { style, page } => {
                let artworks = self.browse_style(style, *page).await?;
                Ok(FetchOutcome {
                    artworks,
                    banner: None,
                })
            }
            RemoteQuery::Search { query } => self.search(query).await,
        }
    }

    /// One page of artworks for an art style
    pub async fn browse_style(&self, style: &str, page: u32) -> Result<Vec<Artwork>> {
        debug!("Browsing {} page {}", style, page);
        let found = self
            .source
            .search_artworks(style, self.limits.browse_limit, Some(page))
            .await?;

        let artworks = dedupe_by_id(with_images(found));
        info!("{} page {}: {} artworks", style, page, artworks.len());
        Ok(artworks)
    }

    /// Search artworks directly and through matching artists.
    ///
    /// Direct matches come first, then each matched artist's works in the
    /// order the API ranked the artists. Only the direct artwork search is
    /// allowed to fail the whole operation; anything on the artist side
    /// just means fewer results.
    pub async fn search(&self, query: &str) -> Result<FetchOutcome> {
        let (artworks, agents) = futures::join!(
            self.source
                .search_artworks(query, self.limits.artwork_limit, None),
            self.source.search_agents(query, self.limits.agent_limit),
        );

        let mut aggregate = with_images(artworks?);
        let mut banner = None;

        match agents {
            Ok(agents) if !agents.is_empty() => {
                let agents: Vec<Agent> = agents
                    .into_iter()
                    .take(self.limits.agent_limit as usize)
                    .collect();

                let lookups = agents.iter().map(|agent| {
                    self.source
                        .search_artworks(&agent.title, self.limits.artist_artwork_limit, None)
                });
                let batches = join_all(lookups).await;

                for (agent, batch) in agents.iter().zip(batches) {
                    match batch {
                        Ok(found) => aggregate.extend(with_images(found)),
                        Err(e) => debug!("Skipping works by {}: {}", agent.title, e),
                    }
                }

                banner = Some(ArtistBanner {
                    artists: agents.into_iter().map(|a| a.title).collect(),
                    total_results: aggregate.len(),
                });
            }
            Ok(_) => debug!("No artists matched {:?}", query),
            Err(e) => debug!("Artist search failed for {:?}: {}", query, e),
        }

        let mut artworks = dedupe_by_id(aggregate);
        artworks.truncate(self.limits.result_cap);

        info!("Search {:?}: {} artworks", query, artworks.len());
        Ok(FetchOutcome { artworks, banner })
    }

    /// Look up one artwork by id
    pub async fn artwork(&self, id: u64) -> Result<Artwork> {
        self.source.get_artwork(id).await
    }
}

fn with_images(artworks: Vec<Artwork>) -> Vec<Artwork> {
    artworks.into_iter().filter(|a| a.has_image()).collect()
}

/// Drop repeated ids, keeping the first occurrence and the original order
pub fn dedupe_by_id(artworks: Vec<Artwork>) -> Vec<Artwork> {
    let mut seen = HashSet::new();
    artworks
        .into_iter()
        .filter(|a| seen.insert(a.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn art(id: u64, title: &str, with_image: bool) -> Artwork {
        Artwork {
            id,
            title: title.to_string(),
            artist_display: Some("Claude Monet".to_string()),
            date_display: None,
            medium_display: None,
            image_id: with_image.then(|| format!("img-{}", id)),
        }
    }

    fn agent(id: u64, title: &str) -> Agent {
        Agent {
            id,
            title: title.to_string(),
        }
    }

    fn assert_presentable(artworks: &[Artwork]) {
        let mut ids = HashSet::new();
        for artwork in artworks {
            assert!(ids.insert(artwork.id), "duplicate id {}", artwork.id);
            assert!(artwork.has_image(), "artwork {} has no image", artwork.id);
        }
        assert!(artworks.len() <= 24);
    }

    #[tokio::test]
    async fn test_monet_merges_artist_works() {
        let mut source = MockArtworkSource::new();
        source
            .expect_search_artworks()
            .times(2)
            .returning(|query, limit, page| {
                assert!(page.is_none());
                match query {
                    "Monet" => {
                        assert_eq!(limit, 12);
                        Ok(vec![
                            art(1, "Water Lilies", true),
                            art(2, "Sketch", false),
                            art(3, "Haystacks", true),
                        ])
                    }
                    "Claude Monet" => {
                        assert_eq!(limit, 4);
                        Ok(vec![
                            art(3, "Haystacks (again)", true),
                            art(4, "Cliff Walk", true),
                            art(5, "Untitled study", false),
                            art(6, "Poplars", true),
                        ])
                    }
                    other => panic!("unexpected query {}", other),
                }
            });
        source
            .expect_search_agents()
            .withf(|query, limit| query == "Monet" && *limit == 5)
            .times(1)
            .returning(|_, _| Ok(vec![agent(35809, "Claude Monet")]));

        let engine = SearchEngine::new(Arc::new(source));
        let outcome = engine.search("Monet").await.unwrap();

        let ids: Vec<u64> = outcome.artworks.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 6]);
        // Direct match wins over the artist batch copy
        assert_eq!(outcome.artworks[1].title, "Haystacks");
        assert_presentable(&outcome.artworks);

        let banner = outcome.banner.unwrap();
        assert_eq!(banner.artists, vec!["Claude Monet".to_string()]);
        assert_eq!(banner.total_results, 5);
    }

    #[tokio::test]
    async fn test_primary_failure_is_fatal() {
        let mut source = MockArtworkSource::new();
        source
            .expect_search_artworks()
            .times(1)
            .returning(|_, _, _| {
                Err(Error::HttpError {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                })
            });
        source
            .expect_search_agents()
            .returning(|_, _| Ok(vec![agent(1, "Pablo Picasso")]));

        let engine = SearchEngine::new(Arc::new(source));
        let result = engine.search("cubism").await;

        assert!(matches!(result, Err(Error::HttpError { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_artist_failure_degrades_to_artworks_only() {
        let mut source = MockArtworkSource::new();
        source
            .expect_search_artworks()
            .times(1)
            .returning(|_, _, _| Ok(vec![art(10, "Nighthawks", true), art(11, "Draft", false)]));
        source
            .expect_search_agents()
            .returning(|_, _| Err(Error::NetworkError("connection reset".to_string())));

        let engine = SearchEngine::new(Arc::new(source));
        let outcome = engine.search("Hopper").await.unwrap();

        assert_eq!(outcome.artworks.len(), 1);
        assert_eq!(outcome.artworks[0].id, 10);
        assert!(outcome.banner.is_none());
    }

    #[tokio::test]
    async fn test_no_artists_means_no_banner() {
        let mut source = MockArtworkSource::new();
        source
            .expect_search_artworks()
            .times(1)
            .returning(|_, _, _| Ok(vec![art(10, "Nighthawks", true)]));
        source.expect_search_agents().returning(|_, _| Ok(vec![]));

        let engine = SearchEngine::new(Arc::new(source));
        let outcome = engine.search("nighthawks").await.unwrap();

        assert_eq!(outcome.artworks.len(), 1);
        assert!(outcome.banner.is_none());
    }

    #[tokio::test]
    async fn test_failed_artist_batch_is_skipped() {
        let mut source = MockArtworkSource::new();
        source
            .expect_search_artworks()
            .times(3)
            .returning(|query, _, _| match query {
                "flowers" => Ok(vec![art(1, "Irises", true)]),
                "Vincent van Gogh" => Err(Error::HttpError {
                    status: 503,
                    message: "busy".to_string(),
                }),
                "Georgia O'Keeffe" => Ok(vec![art(2, "Red Hills", true)]),
                other => panic!("unexpected query {}", other),
            });
        source.expect_search_agents().returning(|_, _| {
            Ok(vec![agent(1, "Vincent van Gogh"), agent(2, "Georgia O'Keeffe")])
        });

        let engine = SearchEngine::new(Arc::new(source));
        let outcome = engine.search("flowers").await.unwrap();

        let ids: Vec<u64> = outcome.artworks.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(outcome.banner.unwrap().artists.len(), 2);
    }

    #[tokio::test]
    async fn test_result_cap() {
        let mut source = MockArtworkSource::new();
        source
            .expect_search_artworks()
            .returning(|query, limit, _| {
                // Give every query its own id range so nothing collapses
                let offset = match query {
                    "portrait" => 0,
                    name => 100 * name.trim_start_matches("Artist ").parse::<u64>().unwrap(),
                };
                Ok((0..limit as u64).map(|i| art(offset + i, "Work", true)).collect())
            });
        source.expect_search_agents().returning(|_, limit| {
            Ok((1..=limit as u64)
                .map(|i| agent(i, &format!("Artist {}", i)))
                .collect())
        });

        let engine = SearchEngine::new(Arc::new(source));
        let outcome = engine.search("portrait").await.unwrap();

        assert_eq!(outcome.artworks.len(), 24);
        assert_presentable(&outcome.artworks);
        assert_eq!(outcome.banner.unwrap().total_results, 12 + 5 * 4);
        // Direct matches keep the front of the list
        assert_eq!(outcome.artworks[0].id, 0);
        assert_eq!(outcome.artworks[12].id, 100);
    }

    #[tokio::test]
    async fn test_extra_agents_are_ignored() {
        let mut source = MockArtworkSource::new();
        source
            .expect_search_artworks()
            .times(1 + 2)
            .returning(|_, _, _| Ok(vec![]));
        source.expect_search_agents().returning(|_, _| {
            Ok(vec![agent(1, "A"), agent(2, "B"), agent(3, "C")])
        });

        let limits = SearchLimits {
            agent_limit: 2,
            ..SearchLimits::default()
        };
        let engine = SearchEngine::with_limits(Arc::new(source), limits);
        let outcome = engine.search("anything").await.unwrap();

        assert!(outcome.artworks.is_empty());
        assert_eq!(outcome.banner.unwrap().artists, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_browse_style_uses_page() {
        let mut source = MockArtworkSource::new();
        source
            .expect_search_artworks()
            .withf(|query, limit, page| query == "Baroque" && *limit == 12 && *page == Some(1))
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![
                    art(1, "Still Life", true),
                    art(2, "Lost", false),
                    art(1, "Still Life", true),
                ])
            });

        let engine = SearchEngine::new(Arc::new(source));
        let outcome = engine
            .fetch(&RemoteQuery::Style {
                style: "Baroque".to_string(),
                page: 1,
            })
            .await
            .unwrap();

        assert_eq!(outcome.artworks.len(), 1);
        assert!(outcome.banner.is_none());
    }

    #[tokio::test]
    async fn test_browse_failure_propagates() {
        let mut source = MockArtworkSource::new();
        source
            .expect_search_artworks()
            .returning(|_, _, _| Err(Error::NetworkError("offline".to_string())));

        let engine = SearchEngine::new(Arc::new(source));
        assert!(matches!(
            engine.browse_style("Cubism", 2).await,
            Err(Error::NetworkError(_))
        ));
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let artworks = vec![art(1, "first", true), art(2, "b", true), art(1, "second", true)];
        let deduped = dedupe_by_id(artworks);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "first");
    }
}
