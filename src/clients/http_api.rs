use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::clients::{ApiError, ReservationApi};
use crate::domain::{ActionRequest, ProductFlat, ProductId, ReservationId, SimilarReservation};

/// `ReservationApi` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpReservationApi {
    client: Client,
    base_url: Url,
}

impl HttpReservationApi {
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::InvalidToken(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))
    }
}

#[async_trait]
impl ReservationApi for HttpReservationApi {
    #[instrument(skip(self))]
    async fn get_reservations_similar(
        &self,
        id: ReservationId,
    ) -> Result<Option<Vec<SimilarReservation>>, ApiError> {
        let url = self.endpoint(&format!("api/Reservation/similar/{id}"))?;
        debug!(%url, "Sending request");
        let response = self.client.get(url).send().await?;
        read_optional_body(response).await
    }

    #[instrument(skip(self))]
    async fn get_product_flat_by_id(
        &self,
        product_id: ProductId,
    ) -> Result<Option<ProductFlat>, ApiError> {
        let url = self.endpoint(&format!("api/Product/flat/{product_id}"))?;
        debug!(%url, "Sending request");
        let response = self.client.get(url).send().await?;
        read_optional_body(response).await
    }

    #[instrument(skip(self))]
    async fn reservation_action(&self, request: ActionRequest) -> Result<(), ApiError> {
        let url = self.endpoint("api/Reservation/action")?;
        debug!(%url, "Sending request");
        let response = self.client.post(url).json(&request).send().await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(backend_error(response).await)
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ApiError::InvalidBaseUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidBaseUrl(raw.to_string()));
    }
    // Url::join replaces the last segment unless the path ends in a slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn read_optional_body<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(backend_error(response).await);
    }
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    let body = response.bytes().await?;
    parse_optional_body(&body)
}

fn parse_optional_body<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice::<Option<T>>(body)?)
}

async fn backend_error(response: Response) -> ApiError {
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Could not read error body");
            String::new()
        }
    };
    ApiError::backend(status.as_u16(), error_message(status, &body))
}

/// Pulls the display text out of an error body. The backend answers with
/// either plain text or a JSON string literal.
fn error_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(message)) => message,
        _ => trimmed.to_string(),
    }
}
