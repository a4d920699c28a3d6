//! HTTP client for the Nexus API.
//!
//! Thin typed wrapper over `reqwest`. Error display strings are shown
//! verbatim in the UI: a transport failure renders as "Connection error",
//! a rejected request renders the server's own message.

use nexus_core::{AuthSession, NewProduct, Product, Role};
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Errors surfaced to the UI layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server could not be reached, or the response was not JSON.
    #[error("Connection error")]
    Connection(#[source] reqwest::Error),

    /// The server answered with an error status and a message.
    #[error("{message}")]
    Api {
        /// HTTP status of the rejection.
        status: StatusCode,
        /// The server's single-field error message, for inline display.
        message: String,
    },
}

/// Registration request body.
#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
    role: Role,
}

/// Login request body.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Client for the Nexus HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Client against the given server base URL.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// `ClientError::Api` carries the server's message (for example
    /// "Username already exists") on a rejected registration.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<AuthSession, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/register", self.base))
            .json(&RegisterRequest {
                username,
                password,
                role,
            })
            .send()
            .await
            .map_err(ClientError::Connection)?;

        parse(response).await
    }

    /// Sign in with username and password.
    ///
    /// # Errors
    ///
    /// `ClientError::Api` with "Invalid credentials" on a rejected login.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/login", self.base))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(ClientError::Connection)?;

        parse(response).await
    }

    /// Revoke the session server-side.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the server cannot be reached or rejects the
    /// request. The local session should be cleared regardless.
    pub async fn logout(&self, token: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/api/logout", self.base))
            .bearer_auth(token)
            .send()
            .await
            .map_err(ClientError::Connection)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    /// Fetch the complete product list.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the server cannot be reached or the list
    /// cannot be read.
    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/products", self.base))
            .send()
            .await
            .map_err(ClientError::Connection)?;

        parse(response).await
    }

    /// Create a product and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// `ClientError::Api` with status 401 when the token is missing or
    /// stale.
    pub async fn create_product(
        &self,
        token: &str,
        product: &NewProduct,
    ) -> Result<Product, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/products", self.base))
            .bearer_auth(token)
            .json(product)
            .send()
            .await
            .map_err(ClientError::Connection)?;

        parse(response).await
    }
}

/// Decode a success body, or surface the server's error message.
async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    if response.status().is_success() {
        response.json::<T>().await.map_err(ClientError::Connection)
    } else {
        Err(api_error(response).await)
    }
}

/// Build the `Api` error for a non-success response.
async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    match response.json::<Value>().await {
        Ok(body) => ClientError::Api {
            status,
            message: error_message(&body),
        },
        // A non-JSON error body reads as a failed connection, like a fetch
        // whose res.json() threw.
        Err(e) => ClientError::Connection(e),
    }
}

/// The display message for an error body.
fn error_message(body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .map_or_else(|| "Something went wrong".to_string(), ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_error_message_prefers_the_error_field() {
        assert_eq!(
            error_message(&json!({"error": "Username already exists"})),
            "Username already exists"
        );
    }

    #[test]
    fn test_error_message_falls_back_when_missing_or_wrong_type() {
        assert_eq!(error_message(&json!({})), "Something went wrong");
        assert_eq!(error_message(&json!({"error": 500})), "Something went wrong");
    }

    #[test]
    fn test_api_error_displays_the_server_message() {
        let err = ClientError::Api {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_connection_error_displays_exactly() {
        // Nothing listens on port 1, so the request fails at connect time.
        let base = Url::parse("http://127.0.0.1:1").unwrap();
        let err = ApiClient::new(&base).list_products().await.unwrap_err();
        assert_eq!(err.to_string(), "Connection error");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let base = Url::parse("http://localhost:3000/").unwrap();
        let client = ApiClient::new(&base);
        assert_eq!(client.base, "http://localhost:3000");
    }
}
