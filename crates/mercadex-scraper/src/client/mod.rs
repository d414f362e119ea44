//! HTTP client for the catalog proxy.

use std::time::Duration;

use mercadex_core::CatalogId;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::ScraperError;
use crate::types::{CategoriesResponse, Category, CategoryDetail};

/// Language requested from the catalog API.
const CATALOG_LANG: &str = "es";

/// HTTP client for the catalog proxy's category endpoints.
///
/// Requests are issued one at a time and never retried. A failing category
/// listing is fatal to the caller; a failing category detail page is soft
/// (`Ok(None)`).
pub struct CatalogClient {
    client: Client,
    /// Proxy base URL without trailing slash, e.g. `http://host/api/mercadona`.
    base_url: String,
}

impl CatalogClient {
    /// Creates a `CatalogClient` for `base_url`.
    ///
    /// When `request_timeout` is `None` no timeout is configured and the
    /// transport default applies.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ScraperError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        user_agent: &str,
        request_timeout: Option<Duration>,
    ) -> Result<Self, ScraperError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        reqwest::Url::parse(&base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Fetches the top-level category tree for `region`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::FetchCategories`] for any non-2xx status.
    /// - [`ScraperError::Http`] on network failure.
    /// - [`ScraperError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_categories(&self, region: &str) -> Result<Vec<Category>, ScraperError> {
        let url = self.categories_url(region)?;
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScraperError::FetchCategories {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed: CategoriesResponse = decode(&body, "category listing")?;
        tracing::debug!(region, count = parsed.results.len(), "fetched categories");
        Ok(parsed.results)
    }

    /// Fetches the product page of one category.
    ///
    /// A non-2xx status is logged and reported as `Ok(None)` so the caller can
    /// skip the branch.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on network failure.
    /// - [`ScraperError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_category_products(
        &self,
        category_id: &CatalogId,
        region: &str,
    ) -> Result<Option<CategoryDetail>, ScraperError> {
        let url = self.category_url(category_id, region)?;
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(
                category_id = %category_id,
                status = status.as_u16(),
                "could not fetch category"
            );
            return Ok(None);
        }

        let body = response.text().await?;
        let detail: CategoryDetail = decode(&body, &format!("category {category_id}"))?;
        tracing::debug!(
            category_id = %category_id,
            products = detail.product_count(),
            "fetched category"
        );
        Ok(Some(detail))
    }

    /// Builds `{base}/categories/?lang=es&wh={region}`.
    fn categories_url(&self, region: &str) -> Result<String, ScraperError> {
        self.build_url("categories/", region)
    }

    /// Builds `{base}/categories/{id}?lang=es&wh={region}`.
    fn category_url(&self, category_id: &CatalogId, region: &str) -> Result<String, ScraperError> {
        self.build_url(&format!("categories/{category_id}"), region)
    }

    fn build_url(&self, path: &str, region: &str) -> Result<String, ScraperError> {
        let raw = format!("{}/{path}", self.base_url);
        let mut url = reqwest::Url::parse(&raw).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("lang", CATALOG_LANG)
            .append_pair("wh", region);
        Ok(url.to_string())
    }
}

/// Suspends the caller for `duration`; the crawl's fixed throttle.
pub async fn delay(duration: Duration) {
    tokio::time::sleep(duration).await;
}

fn decode<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, ScraperError> {
    serde_json::from_str(body).map_err(|e| ScraperError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
