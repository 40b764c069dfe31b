//! API utilities for frontend-backend communication
//!
//! Provides the base URL resolution, a typed error and a small bearer-token
//! client on top of `gloo-net`.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::shared::config::ApiConfig;

/// Get the base URL for API requests
///
/// Uses `api.base_url` when configured, otherwise the current window
/// location with the configured backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if window is not available
pub fn api_base(config: &ApiConfig) -> String {
    if let Some(base) = config.base_url.as_deref() {
        return base.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, config.port)
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Rejected locally before sending
    #[error("{0}")]
    Validation(String),

    #[error("No se pudo preparar la petición: {0}")]
    Encode(String),

    #[error("Error de red: {0}")]
    Network(String),

    #[error("La sesión expiró, vuelva a iniciar sesión")]
    Unauthorized,

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Respuesta inesperada del servidor: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Pull a human readable message out of an error body.
///
/// The backend answers `{"error": "..."}` or `{"message": "..."}`; anything
/// else is passed through as text.
pub fn error_message_from_body(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorResponse {
        error: Option<String>,
        message: Option<String>,
    }
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            error: Some(msg), ..
        })
        | Ok(ErrorResponse {
            message: Some(msg), ..
        }) => msg,
        _ => body.trim().to_string(),
    }
}

/// Bearer-token JSON client
#[derive(Clone, Debug)]
pub struct ApiClient {
    base: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            base: base.into(),
            access_token,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match self.access_token.as_deref() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        if status == 401 {
            return Err(ApiError::Unauthorized);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status,
            message: error_message_from_body(&body),
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .authorize(Request::get(&self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize,
        T: DeserializeOwned,
    {
        let qs = serde_qs::to_string(query).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.get(&format!("{}?{}", path, qs)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .authorize(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    /// POST whose response body is irrelevant (may be empty)
    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self
            .authorize(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .authorize(Request::put(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .authorize(Request::delete(&self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_base_url_wins() {
        let config = ApiConfig {
            port: 3000,
            base_url: Some("https://pos.example.com/".into()),
        };
        assert_eq!(api_base(&config), "https://pos.example.com");
    }

    #[test]
    fn test_url_joins_path() {
        let client = ApiClient::new("http://localhost:3000", None);
        assert_eq!(client.url("/api/brands"), "http://localhost:3000/api/brands");
    }

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(error_message_from_body(r#"{"error": "Duplicado"}"#), "Duplicado");
        assert_eq!(error_message_from_body(r#"{"message": "Sin stock"}"#), "Sin stock");
        assert_eq!(error_message_from_body(" Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn test_error_display() {
        let e = ApiError::Status {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(e.to_string(), "HTTP 500: boom");
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(!e.is_unauthorized());
    }
}
