//! Twitter API HTTP client.

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::auth::OAuthSigner;
use crate::api::types::*;
use crate::config::CredentialsConfig;
use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("twitter-backup/", env!("CARGO_PKG_VERSION"));

/// Operations the backup needs from the remote API.
///
/// Every call is a single attempt. `Err` means the request never produced a
/// usable response (network failure, undecodable body); a response with a
/// non-success status comes back as `Fetched::Status`.
#[async_trait]
pub trait TwitterApi: Send + Sync {
    /// Check that the credentials identify a user.
    async fn verify_credentials(&self, params: &VerifyParams) -> Result<Account>;

    /// One page of liked tweets, newest first.
    async fn favorites(&self, params: &FavoritesParams) -> Result<Fetched<Vec<Tweet>>>;

    /// One page of followed accounts.
    async fn friends(&self, params: &FriendsParams) -> Result<Fetched<FriendsPage>>;

    /// Body of a media asset.
    async fn fetch_media(&self, url: &str) -> Result<Fetched<Vec<u8>>>;
}

/// `TwitterApi` over HTTPS with OAuth 1.0a signed requests.
pub struct TwitterClient {
    client: Client,
    base: Url,
    signer: OAuthSigner,
}

impl TwitterClient {
    /// Create a client for the API rooted at `api_base`.
    pub fn new(credentials: &CredentialsConfig, api_base: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        // Url::join drops the last segment unless the base ends with a slash.
        let base = if api_base.ends_with('/') {
            Url::parse(api_base)?
        } else {
            Url::parse(&format!("{}/", api_base))?
        };

        Ok(Self {
            client,
            base,
            signer: OAuthSigner::new(credentials),
        })
    }

    /// Build the full URL for an endpoint path and query.
    fn endpoint_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Make a signed GET request.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = self.endpoint_url(path, query)?;
        let authorization = self.signer.authorization_header("GET", &url);

        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, authorization)
            .send()
            .await?;

        tracing::debug!("Response status: {}", response.status());

        Ok(response)
    }

    /// Decode a successful JSON response, or hand back its status.
    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<Fetched<T>> {
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("{} error response: {}", what, body);
            return Ok(Fetched::Status(status));
        }

        let text = response.text().await?;
        parse_body(&text, what).map(Fetched::Ok)
    }
}

/// Longest body excerpt quoted in a parse error, in characters.
const BODY_PREVIEW_CHARS: usize = 500;

/// Parse a JSON body; the error quotes the start of the body.
fn parse_body<T: DeserializeOwned>(text: &str, what: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| {
        Error::Api(format!(
            "Failed to parse {}: {} - Response: {}",
            what,
            e,
            body_preview(text)
        ))
    })
}

/// Start of `text`, cut on a character boundary.
fn body_preview(text: &str) -> &str {
    match text.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[async_trait]
impl TwitterApi for TwitterClient {
    async fn verify_credentials(&self, params: &VerifyParams) -> Result<Account> {
        let query = [
            ("skip_status", params.skip_status.to_string()),
            ("include_email", params.include_email.to_string()),
        ];
        let response = self.get("account/verify_credentials.json", &query).await?;

        match Self::decode(response, "account").await? {
            Fetched::Ok(account) => Ok(account),
            Fetched::Status(status) => Err(Error::Authentication(format!(
                "identity verification rejected: HTTP {}",
                status
            ))),
        }
    }

    async fn favorites(&self, params: &FavoritesParams) -> Result<Fetched<Vec<Tweet>>> {
        let mut query = vec![
            ("count", params.count.to_string()),
            ("tweet_mode", params.tweet_mode.clone()),
            ("include_entities", params.include_entities.to_string()),
        ];
        if let Some(max_id) = params.max_id {
            query.push(("max_id", max_id.to_string()));
        }

        let response = self.get("favorites/list.json", &query).await?;
        Self::decode(response, "favorites").await
    }

    async fn friends(&self, params: &FriendsParams) -> Result<Fetched<FriendsPage>> {
        let query = [
            ("count", params.count.to_string()),
            (
                "include_user_entities",
                params.include_user_entities.to_string(),
            ),
            ("cursor", params.cursor.to_string()),
        ];

        let response = self.get("friends/list.json", &query).await?;
        Self::decode(response, "friends").await
    }

    async fn fetch_media(&self, url: &str) -> Result<Fetched<Vec<u8>>> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Ok(Fetched::Status(status));
        }

        let bytes = response.bytes().await?;
        Ok(Fetched::Ok(bytes.to_vec()))
    }
}
