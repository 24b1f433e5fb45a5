use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const ARTIC_API_BASE: &str = "https://api.artic.edu/api/v1";

/// Fields requested for every artwork lookup. Anything else the API knows
/// about an artwork is ignored.
const ARTWORK_FIELDS: &str = "id,title,artist_display,date_display,medium_display,image_id";
const AGENT_FIELDS: &str = "id,title";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("JSON parsing failed: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Thin client over the artwork and agent search endpoints.
///
/// Every call is exactly one GET. No retries, no timeouts: a failed request
/// is reported straight back to the caller.
#[derive(Clone)]
pub struct ArticClient {
    client: reqwest::Client,
    base_url: String,
}

impl ArticClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(ARTIC_API_BASE.to_string())
    }

    /// Point the client somewhere else (a mirror, or a local server in tests)
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("ArtScout/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full-text artwork search, restricted to public domain works.
    ///
    /// Records come back exactly as the API sent them, including ones
    /// without an `image_id`. Filtering is the caller's job.
    pub async fn search_artworks(
        &self,
        query: &str,
        limit: u32,
        page: Option<u32>,
    ) -> Result<Vec<ArticArtwork>> {
        let url = format!("{}/artworks/search", self.base_url);

        let mut params = vec![
            ("q", query.to_string()),
            ("fields", ARTWORK_FIELDS.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(page) = page {
            params.push(("page", page.to_string()));
        }
        params.push(("is_public_domain", "true".to_string()));

        let envelope: ListEnvelope<ArticArtwork> = self.get_json(&url, &params).await?;
        Ok(envelope.data)
    }

    /// Search agents (artists, makers, studios) by name
    pub async fn search_agents(&self, query: &str, limit: u32) -> Result<Vec<ArticAgent>> {
        let url = format!("{}/agents/search", self.base_url);
        let params = [
            ("q", query.to_string()),
            ("fields", AGENT_FIELDS.to_string()),
            ("limit", limit.to_string()),
        ];

        let envelope: ListEnvelope<ArticAgent> = self.get_json(&url, &params).await?;
        Ok(envelope.data)
    }

    /// Fetch a single artwork by id
    pub async fn get_artwork(&self, id: u64) -> Result<ArticArtwork> {
        let url = format!("{}/artworks/{}", self.base_url, id);
        let params = [("fields", ARTWORK_FIELDS.to_string())];

        let envelope: ItemEnvelope<ArticArtwork> = self.get_json(&url, &params).await?;
        Ok(envelope.data)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, params: &[(&str, String)]) -> Result<T> {
        debug!("GET {} {:?}", url, params);

        let response = self.client.get(url).query(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("GET {} failed with {}", url, status);
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        // Read the body first so a bad payload shows up as a parse error,
        // not as a transport error
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Search endpoints wrap their hits in `{ "data": [...] }`
#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    data: Vec<T>,
}

/// Single-item endpoints wrap the record in `{ "data": {...} }`
#[derive(Debug, Deserialize)]
struct ItemEnvelope<T> {
    data: T,
}

/// Artwork as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticArtwork {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub date_display: Option<String>,
    #[serde(default)]
    pub medium_display: Option<String>,
    #[serde(default)]
    pub image_id: Option<String>,
}

/// Agent search hit. `title` is the agent's display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticAgent {
    pub id: u64,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve exactly one canned HTTP response and hand back the raw request
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string());

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        (format!("http://{}", addr), rx)
    }

    #[test]
    fn test_client_creation() {
        let client = ArticClient::new().unwrap();
        assert_eq!(client.base_url(), ARTIC_API_BASE);

        let client = ArticClient::with_base_url("http://localhost:9999/".to_string()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    #[test]
    fn test_artwork_missing_optional_fields() {
        let json = r#"{"id": 27992, "title": "A Sunday on La Grande Jatte"}"#;
        let artwork: ArticArtwork = serde_json::from_str(json).unwrap();
        assert_eq!(artwork.id, 27992);
        assert!(artwork.image_id.is_none());
        assert!(artwork.artist_display.is_none());
    }

    #[test]
    fn test_artwork_null_fields_and_extras() {
        let json = r#"{"id": 1, "title": null, "image_id": null, "_score": 12.5}"#;
        let artwork: ArticArtwork = serde_json::from_str(json).unwrap();
        assert!(artwork.title.is_none());
        assert!(artwork.image_id.is_none());
    }

    #[test]
    fn test_artwork_without_id_is_rejected() {
        let json = r#"{"title": "No id"}"#;
        assert!(serde_json::from_str::<ArticArtwork>(json).is_err());
    }

    #[tokio::test]
    async fn test_search_artworks_sends_expected_query() {
        let (base, request) = serve_once(
            "200 OK",
            r#"{"data": [{"id": 1, "title": "Water Lilies", "image_id": "abc"}, {"id": 2, "title": "Sketch"}]}"#,
        )
        .await;
        let client = ArticClient::with_base_url(base).unwrap();

        let artworks = client.search_artworks("Monet", 12, Some(2)).await.unwrap();
        assert_eq!(artworks.len(), 2);
        assert_eq!(artworks[0].image_id.as_deref(), Some("abc"));
        assert!(artworks[1].image_id.is_none());

        let raw = request.await.unwrap();
        let request_line = raw.lines().next().unwrap();
        assert!(request_line.starts_with("GET /artworks/search?"));
        assert!(request_line.contains("q=Monet"));
        assert!(request_line.contains("limit=12"));
        assert!(request_line.contains("page=2"));
        assert!(request_line.contains("is_public_domain=true"));
    }

    #[tokio::test]
    async fn test_search_agents() {
        let (base, request) =
            serve_once("200 OK", r#"{"data": [{"id": 35809, "title": "Claude Monet"}]}"#).await;
        let client = ArticClient::with_base_url(base).unwrap();

        let agents = client.search_agents("Monet", 5).await.unwrap();
        assert_eq!(agents, vec![ArticAgent { id: 35809, title: "Claude Monet".to_string() }]);

        let raw = request.await.unwrap();
        assert!(raw.starts_with("GET /agents/search?"));
        assert!(!raw.lines().next().unwrap().contains("is_public_domain"));
    }

    #[tokio::test]
    async fn test_get_artwork() {
        let (base, request) =
            serve_once("200 OK", r#"{"data": {"id": 16568, "title": "Water Lilies", "image_id": "3c27"}}"#).await;
        let client = ArticClient::with_base_url(base).unwrap();

        let artwork = client.get_artwork(16568).await.unwrap();
        assert_eq!(artwork.id, 16568);

        let raw = request.await.unwrap();
        assert!(raw.starts_with("GET /artworks/16568?"));
    }

    #[tokio::test]
    async fn test_server_error_is_http_error() {
        let (base, _request) = serve_once("500 Internal Server Error", r#"{"error": "boom"}"#).await;
        let client = ArticClient::with_base_url(base).unwrap();

        match client.search_artworks("cubism", 12, None).await {
            Err(ApiError::Http { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("expected HTTP error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload_is_parse_error() {
        let (base, _request) = serve_once("200 OK", "{not json").await;
        let client = ArticClient::with_base_url(base).unwrap();

        let result = client.search_agents("Monet", 5).await;
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ArticClient::with_base_url(format!("http://{}", addr)).unwrap();
        let result = client.search_artworks("Monet", 12, None).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
