// Art Institute of Chicago provider - bridges the API client with ArtworkSource
use async_trait::async_trait;
use artscout_api::ArticClient;

use crate::{
    models::{Agent, Artwork},
    search::ArtworkSource,
    Result,
};

/// Wrapper around ArticClient that implements ArtworkSource
pub struct ArticProvider {
    client: ArticClient,
}

impl ArticProvider {
    pub fn new(client: ArticClient) -> Self {
        Self { client }
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self::new(ArticClient::with_base_url(base_url.to_string())?))
    }
}

#[async_trait]
impl ArtworkSource for ArticProvider {
    async fn search_artworks(&self, query: &str, limit: u32, page: Option<u32>) -> Result<Vec<Artwork>> {
        let artworks = self.client.search_artworks(query, limit, page).await?;
        Ok(artworks.into_iter().map(Artwork::from).collect())
    }

    async fn search_agents(&self, query: &str, limit: u32) -> Result<Vec<Agent>> {
        let agents = self.client.search_agents(query, limit).await?;
        Ok(agents.into_iter().map(Agent::from).collect())
    }

    async fn get_artwork(&self, id: u64) -> Result<Artwork> {
        let artwork = self.client.get_artwork(id).await?;
        Ok(Artwork::from(artwork))
    }
}
