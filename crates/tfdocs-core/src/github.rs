use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use crate::{Endpoints, Error, ProviderRef, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One entry of a `contents` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    /// Object hash; for directories, the subtree hash.
    #[serde(default)]
    pub sha: String,
    /// `file`, `dir`, `symlink` or `submodule`
    #[serde(rename = "type", default = "default_content_type")]
    pub entry_type: String,
    /// Direct raw link; `null` for directories.
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    /// Whether this entry is a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.entry_type == "file"
    }
}

fn default_content_type() -> String {
    "file".to_string()
}

/// Response of the git trees endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeResponse {
    pub tree: Vec<TreeEntry>,
    /// Set when GitHub cut the listing short.
    #[serde(default)]
    pub truncated: bool,
}

/// One entry of a git tree.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    /// `blob` or `tree`
    #[serde(rename = "type", default = "default_tree_type")]
    pub entry_type: String,
}

impl TreeEntry {
    /// Whether this entry is a file.
    #[must_use]
    pub fn is_blob(&self) -> bool {
        self.entry_type == "blob"
    }
}

fn default_tree_type() -> String {
    "blob".to_string()
}

/// One entry of the tag list.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// Read-only client for the handful of GitHub endpoints the pipeline uses.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    endpoints: Endpoints,
}

impl GitHubClient {
    /// Creates a client with the default timeout and no token.
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        Self::with_options(endpoints, DEFAULT_TIMEOUT, None)
    }

    /// Creates a client with a custom timeout and optional API token.
    pub fn with_options(
        endpoints: Endpoints,
        timeout: Duration,
        token: Option<&str>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| Error::Config(format!("Invalid GitHub token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tfdocs/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            client,
            endpoints: endpoints.normalized(),
        })
    }

    /// Hosts this client builds URLs against.
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Lists the repository root. A missing repository maps to [`Error::NotFound`].
    pub async fn root_listing(&self, provider: &ProviderRef) -> Result<Vec<ContentEntry>> {
        let url = self.endpoints.root_listing_url(provider);
        match self.get_json(&url).await {
            Err(Error::NotFound(_)) => Err(Error::NotFound(format!("{provider} is not found"))),
            other => other,
        }
    }

    /// Fetches the tag list (newest first, as returned by the API).
    pub async fn tags(&self, provider: &ProviderRef) -> Result<Vec<Tag>> {
        let url = self.endpoints.tags_url(provider);
        self.get_json(&url).await
    }

    /// Fetches a `contents` directory listing.
    pub async fn directory_listing(&self, url: &str) -> Result<Vec<ContentEntry>> {
        self.get_json(url).await
    }

    /// Fetches a git tree.
    pub async fn tree(&self, url: &str) -> Result<TreeResponse> {
        self.get_json(url).await
    }

    /// Fetches a URL as text, typically a raw documentation file.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.send(url).await?;
        let content = response.text().await?;
        info!("Fetched {} bytes from {}", content.len(), url);
        Ok(content)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(url).await?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Serialization(format!("Unexpected response from {url}: {e}")))
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("Resource not found at '{url}'")));
        }
        if !status.is_success() {
            return Err(Error::FetchFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

// Note: Default is not implemented as GitHubClient::new() can fail.

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    fn endpoints_for(server: &MockServer) -> Endpoints {
        Endpoints {
            api: server.uri(),
            raw: server.uri(),
            registry: "https://registry.terraform.io".to_string(),
        }
    }

    fn aws() -> ProviderRef {
        ProviderRef::parse("hashicorp/aws").unwrap()
    }

    #[test]
    fn test_client_creation() {
        assert!(GitHubClient::new(Endpoints::default()).is_ok());
    }

    #[test]
    fn test_content_entry_defaults() {
        let entries: Vec<ContentEntry> =
            serde_json::from_str(r#"[{"name":"instance.md","download_url":null}]"#).unwrap();
        assert!(entries[0].is_file());
        assert!(entries[0].download_url.is_none());
    }

    #[test]
    fn test_tree_truncated_flag() {
        let tree: TreeResponse = serde_json::from_str(r#"{"tree":[]}"#).unwrap();
        assert!(!tree.truncated);
        let tree: TreeResponse =
            serde_json::from_str(r#"{"sha":"abc","tree":[],"truncated":true}"#).unwrap();
        assert!(tree.truncated);
    }

    #[tokio::test]
    async fn test_root_listing_404_maps_to_not_found() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/hashicorp/terraform-provider-aws/contents/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = GitHubClient::new(endpoints_for(&server))?;
        match client.root_listing(&aws()).await {
            Err(Error::NotFound(msg)) => assert_eq!(msg, "hashicorp/aws is not found"),
            other => panic!("expected NotFound, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_non_success_maps_to_fetch_failed() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/hashicorp/terraform-provider-aws/tags"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = GitHubClient::new(endpoints_for(&server))?;
        match client.tags(&aws()).await {
            Err(Error::FetchFailed { status, url }) => {
                assert_eq!(status, 403);
                assert!(url.ends_with("/tags"));
            },
            other => panic!("expected FetchFailed, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_token_sent_as_bearer() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/hashicorp/terraform-provider-aws/tags"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"name":"v1.0.0"}]"#))
            .mount(&server)
            .await;

        let client =
            GitHubClient::with_options(endpoints_for(&server), DEFAULT_TIMEOUT, Some("secret"))?;
        let tags = client.tags(&aws()).await?;
        assert_eq!(tags[0].name, "v1.0.0");
        Ok(())
    }

    #[tokio::test]
    async fn test_unexpected_body_is_serialization_error() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/hashicorp/terraform-provider-aws/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"message":"odd"}"#))
            .mount(&server)
            .await;

        let client = GitHubClient::new(endpoints_for(&server))?;
        let err = client.tags(&aws()).await.unwrap_err();
        assert_eq!(err.category(), "serialization");
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_text() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# Doc"))
            .mount(&server)
            .await;

        let client = GitHubClient::new(endpoints_for(&server))?;
        let text = client.fetch_text(&format!("{}/doc.md", server.uri())).await?;
        assert_eq!(text, "# Doc");
        Ok(())
    }
}
