use std::time::Duration;

use saldo_core::ClientInfo;
use tracing::{debug, info};

use crate::{ProviderError, ProviderResult};

/// Header carrying the personal API token.
const TOKEN_HEADER: &str = "X-Token";

/// REST client for the monobank personal API. Cheap to clone; the inner
/// connection pool is shared.
#[derive(Clone, Debug)]
pub struct MonobankClient {
    http: reqwest::Client,
    base: String,
    token: String,
}

impl MonobankClient {
    /// Build a client rooted at `base`. Every request is bounded by
    /// `timeout`; expiry surfaces as a transport error.
    pub fn new(
        base: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> ProviderResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base: base.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        })
    }

    /// Fetch the full client profile: accounts, jars, and the currently
    /// registered webhook URL.
    pub async fn client_info(&self) -> ProviderResult<ClientInfo> {
        let url = format!("{}/personal/client-info", self.base);
        let response = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                endpoint: "personal/client-info",
                status: response.status(),
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Register `url` as the webhook target. Fire-and-forget: the response
    /// body is not inspected, only the status.
    pub async fn register_webhook(&self, url: &str) -> ProviderResult<()> {
        let endpoint = format!("{}/personal/webhook", self.base);
        let response = self
            .http
            .get(&endpoint)
            .query(&[("url", url)])
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                endpoint: "personal/webhook",
                status: response.status(),
            });
        }
        Ok(())
    }

    /// Re-register the webhook when the provider reports a different target.
    /// Idempotent: nothing is sent when `reported` already equals `desired`,
    /// so a restart does not burn a registration call.
    pub async fn ensure_webhook(&self, reported: &str, desired: &str) -> ProviderResult<()> {
        if reported == desired {
            debug!(url = desired, "webhook registration already current");
            return Ok(());
        }
        info!(reported, desired, "re-registering webhook target");
        self.register_webhook(desired).await
    }
}
