use std::time::Duration;

use anyhow::Context as _;
use reqwest::Client;
use serde::de::DeserializeOwned;

use shop_domain::id::{ProductId, UserId};
use shop_domain::peer::Dependency;
use shop_domain::product::ProductSummary;
use shop_domain::user::UserSummary;

use crate::domain::repository::EnrichmentPort;
use crate::error::FetchError;

/// HTTP client implementing `EnrichmentPort` against the user and product services.
///
/// Each lookup is a single `GET <base>/<id>` bounded by the client timeout.
#[derive(Clone)]
pub struct HttpEnrichmentClient {
    client: Client,
    user_base_url: String,
    product_base_url: String,
}

impl HttpEnrichmentClient {
    pub fn new(
        user_base_url: &str,
        product_base_url: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("build peer HTTP client")?;
        Ok(Self {
            client,
            user_base_url: user_base_url.trim_end_matches('/').to_owned(),
            product_base_url: product_base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn lookup_url(&self, dependency: Dependency, id: i32) -> String {
        let base = match dependency {
            Dependency::User => &self.user_base_url,
            Dependency::Product => &self.product_base_url,
        };
        format!("{base}/{id}")
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        dependency: Dependency,
        id: i32,
    ) -> Result<T, FetchError> {
        let url = self.lookup_url(dependency, id);
        tracing::debug!(%dependency, %url, "peer lookup");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        resp.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Decode(e.to_string())
            }
        })
    }
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(e.to_string())
    }
}

impl EnrichmentPort for HttpEnrichmentClient {
    async fn fetch_user(&self, id: UserId) -> Result<UserSummary, FetchError> {
        self.get_json(Dependency::User, id.get()).await
    }

    async fn fetch_product(&self, id: ProductId) -> Result<ProductSummary, FetchError> {
        self.get_json(Dependency::Product, id.get()).await
    }
}
