use crate::domain::{ListId, PageSize};

use std::time::Duration;

use {
    reqwest::{Client, StatusCode, Url},
    secrecy::{ExposeSecret, Secret},
    serde::Deserialize,
};

#[derive(Debug, thiserror::Error)]
pub enum MoosendError {
    #[error("Moosend API returned HTTP {0}")]
    Transport(StatusCode),
    #[error("Moosend API reported an error: {0}")]
    Application(String),
    #[error("Failed to reach the Moosend API")]
    Request(#[source] reqwest::Error),
    #[error("Failed to construct the Moosend request URL")]
    Url(#[from] url::ParseError),
}

impl MoosendError {
    /// Only failures that stand a chance of succeeding on a fresh attempt:
    /// connection-level errors, timeouts, and upstream 5xx responses.
    fn is_transient(&self) -> bool {
        match self {
            MoosendError::Transport(status) => status.is_server_error(),
            MoosendError::Request(e) => e.is_timeout() || e.is_connect(),
            MoosendError::Application(_) | MoosendError::Url(_) => false,
        }
    }
}

/// Client for the Moosend v3 API, scoped to the single endpoint this service
/// needs: listing the subscribed members of a mailing list one page at a time.
pub struct MoosendClient {
    http_client: Client,
    base_url: Url,
    max_retries: u32,
}

impl MoosendClient {
    pub fn new(
        base_url: String,
        timeout: Option<Duration>,
        max_retries: u32,
    ) -> Result<Self, String> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http_client: builder.build().unwrap(),
            base_url: Url::parse(&base_url).map_err(|_| "Invalid base url")?,
            max_retries,
        })
    }

    /// Fetches one page of subscribed members. Transient failures are retried
    /// up to the configured budget; application errors never are.
    pub async fn fetch_subscribed_page(
        &self,
        list_id: &ListId,
        api_key: &Secret<String>,
        page: u32,
        page_size: PageSize,
    ) -> Result<SubscriberPage, MoosendError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(list_id, api_key, page, page_size).await {
                Ok(fetched) => return Ok(fetched),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        error = %e,
                        attempt = attempt,
                        max_retries = self.max_retries,
                        "Retrying a transient Moosend failure"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(
        &self,
        list_id: &ListId,
        api_key: &Secret<String>,
        page: u32,
        page_size: PageSize,
    ) -> Result<SubscriberPage, MoosendError> {
        let url = self.base_url.join(&format!(
            "lists/{}/subscribers/subscribed.json",
            list_id.as_ref()
        ))?;

        let page = page.to_string();
        let page_size = page_size.to_string();
        let response = self
            .http_client
            .get(url)
            .query(&[
                ("apikey", api_key.expose_secret().as_str()),
                ("page", page.as_str()),
                ("pagesize", page_size.as_str()),
            ])
            .send()
            .await
            // The URL carries the API key as a query parameter; strip it
            // before the error can reach a log line.
            .map_err(|e| MoosendError::Request(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MoosendError::Transport(status));
        }

        let envelope: PageEnvelope = response
            .json()
            .await
            .map_err(|e| MoosendError::Request(e.without_url()))?;

        if envelope.code != 0 || envelope.error.is_some() {
            let message = envelope
                .error
                .unwrap_or_else(|| "Unknown error occurred".into());
            return Err(MoosendError::Application(message));
        }

        envelope
            .context
            .ok_or_else(|| MoosendError::Application("Unknown error occurred".into()))
    }
}

/// One page of the upstream listing: the subscriber records plus the paging
/// envelope that drives the fetch loop.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubscriberPage {
    pub paging: Paging,
    pub subscribers: Vec<Subscriber>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Paging {
    pub page_size: u32,
    pub current_page: u32,
    pub total_results: u32,
    pub total_page_count: u32,
}

/// The two fields retained from Moosend's subscriber records. Everything else
/// the API returns is dropped on deserialization.
#[derive(Debug, Deserialize)]
pub struct Subscriber {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Email")]
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PageEnvelope {
    code: i32,
    error: Option<String>,
    context: Option<SubscriberPage>,
}
