use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value as JsonValue;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid zodiac url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response status {status} for {url}")]
    UnexpectedResponse { url: Url, status: StatusCode },
}

/// Downstream package/event API.
///
/// Reads decode the JSON body, writes only confirm a 2xx status.
#[async_trait]
pub trait ZodiacClient: Sync + Send {
    async fn read(&self, path: &str) -> Result<JsonValue, Error>;
    async fn write(&self, path: &str, body: &JsonValue) -> Result<(), Error>;
}

#[derive(Clone, Debug)]
pub struct ZodiacHttpClient {
    http: Client,
    base_url: String,
}

impl ZodiacHttpClient {
    /// `http` is expected to be the process-wide client so connections are reused
    /// between invocations.
    pub fn new(http: Client, base_url: &str) -> Result<Self, Error> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        parse_url(&base_url)?;

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        parse_url(&format!("{}{}", self.base_url, path))
    }
}

fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|err| Error::InvalidUrl {
        url: url.to_owned(),
        reason: err.to_string(),
    })
}

#[async_trait]
impl ZodiacClient for ZodiacHttpClient {
    async fn read(&self, path: &str) -> Result<JsonValue, Error> {
        let url = self.url(path)?;
        tracing::debug!(%url, "Sending GET request");

        let r = self.http.get(url.clone()).send().await?;

        match r.status() {
            status if status.is_success() => Ok(r.json::<JsonValue>().await?),
            status => Err(Error::UnexpectedResponse { url, status }),
        }
    }

    async fn write(&self, path: &str, body: &JsonValue) -> Result<(), Error> {
        let url = self.url(path)?;
        tracing::debug!(%url, %body, "Sending POST request");

        let r = self.http.post(url.clone()).json(body).send().await?;

        match r.status() {
            status if status.is_success() => Ok(()),
            status => Err(Error::UnexpectedResponse { url, status }),
        }
    }
}
