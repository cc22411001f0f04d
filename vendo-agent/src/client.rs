use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use vendo_core::cart::{Cart, CartItem};
use vendo_core::product::Product;

/// A rejected operation carries the service's message so the agent can tell
/// "product not found" from "not enough stock"; a transport failure is the
/// signal for the fallback read path.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the storefront operations the agent is allowed to use.
pub struct StorefrontClient {
    http: Client,
    base_url: String,
}

impl StorefrontClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub async fn list_products(&self, filter: Option<&str>) -> Result<Vec<Product>, ClientError> {
        let mut request = self.http.get(format!("{}/products", self.base_url));
        if let Some(q) = filter {
            request = request.query(&[("q", q)]);
        }
        Self::decode(request.send().await?).await
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, ClientError> {
        let request = self.http.get(format!("{}/products/{}", self.base_url, id));
        Self::decode(request.send().await?).await
    }

    pub async fn create_cart(&self, items: &[CartItem]) -> Result<Cart, ClientError> {
        let request = self
            .http
            .post(format!("{}/carts", self.base_url))
            .json(&serde_json::json!({ "items": items }));
        Self::decode(request.send().await?).await
    }

    pub async fn get_cart(&self, id: i64) -> Result<Cart, ClientError> {
        let request = self.http.get(format!("{}/carts/{}", self.base_url, id));
        Self::decode(request.send().await?).await
    }

    pub async fn update_cart(&self, id: i64, items: &[CartItem]) -> Result<Cart, ClientError> {
        let request = self
            .http
            .patch(format!("{}/carts/{}", self.base_url, id))
            .json(&serde_json::json!({ "items": items }));
        Self::decode(request.send().await?).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("service returned {}", status),
        };
        Err(ClientError::Api { status, message })
    }
}
