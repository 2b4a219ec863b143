//! OAuth token exchange with the Spotify accounts service.
//!
//! [`TokenClient`] implements the two grants a Web API session needs:
//! - `authorization_code`, to turn the code of the login redirect into a
//!   [`Token`];
//! - `refresh_token`, used by [`TokenClient::ensure_fresh`] once a token has
//!   expired.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{DEFAULT_TOKEN_URL, Error, HttpClient, HyperClient, Method, Request, Response, Result};

/// An access token with its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Bearer token for Web API calls.
    pub access_token: String,
    /// Token used to obtain a new access token.
    pub refresh_token: Option<String>,
    /// Token type, `Bearer` in practice.
    pub token_type: String,
    /// Granted scopes, space separated.
    pub scope: Option<String>,
    /// Instant the access token stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl Token {
    /// Whether the access token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the access token is expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    fn from_raw(raw: RawToken, now: DateTime<Utc>) -> Self {
        let lifetime = TimeDelta::try_seconds(raw.expires_in).unwrap_or(TimeDelta::MAX);
        Self {
            access_token: raw.access_token,
            refresh_token: raw.refresh_token,
            token_type: raw.token_type,
            scope: raw.scope,
            expires_at: now.checked_add_signed(lifetime).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

/// Token response of the accounts service.
#[derive(Debug, Deserialize)]
struct RawToken {
    access_token: String,
    #[serde(default = "bearer")]
    token_type: String,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    expires_in: i64,
    #[serde(default)]
    refresh_token: Option<String>,
}

fn bearer() -> String {
    "Bearer".to_string()
}

/// Error response of the accounts service.
#[derive(Debug, Deserialize)]
struct TokenError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Serialize)]
#[serde(tag = "grant_type", rename_all = "snake_case")]
enum Grant<'a> {
    AuthorizationCode { code: &'a str, redirect_uri: &'a str },
    RefreshToken { refresh_token: &'a str },
}

/// Client of the accounts service token endpoint.
///
/// # Example
///
/// ```ignore
/// use riff::{HyperClient, TokenClient};
///
/// let tokens = TokenClient::builder()
///     .client_id("my-client-id")
///     .client_secret("my-client-secret")
///     .redirect_uri("http://localhost:8888/callback")
///     .build(HyperClient::new())?;
///
/// let token = tokens.exchange_code(&code).await?;
/// let token = tokens.ensure_fresh(token).await?;
/// ```
#[derive(Clone)]
pub struct TokenClient<C = HyperClient> {
    client: C,
    authorization: String,
    redirect_uri: Option<String>,
    token_url: Url,
}

impl<C> std::fmt::Debug for TokenClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenClient")
            .field("redirect_uri", &self.redirect_uri)
            .field("token_url", &self.token_url.as_str())
            .finish_non_exhaustive()
    }
}

impl TokenClient {
    /// Create a new token client builder.
    #[must_use]
    pub fn builder() -> TokenClientBuilder {
        TokenClientBuilder::default()
    }
}

impl<C: HttpClient> TokenClient<C> {
    /// Exchange the code of an authorization redirect for a token.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] if the client has no redirect URI;
    /// - [`Error::RemoteApi`] if the accounts service rejects the code;
    /// - transport and decoding errors.
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        let redirect_uri = self
            .redirect_uri
            .as_deref()
            .ok_or_else(|| Error::invalid_request("a redirect URI is required to exchange a code"))?;

        debug!("exchanging authorization code");
        self.grant(&Grant::AuthorizationCode { code, redirect_uri })
            .await
    }

    /// Get a new access token from a refresh token.
    ///
    /// The returned token keeps `refresh_token` when the service does not
    /// rotate it.
    ///
    /// # Errors
    ///
    /// - [`Error::RemoteApi`] if the accounts service rejects the refresh token;
    /// - transport and decoding errors.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Token> {
        debug!("refreshing access token");
        let mut token = self.grant(&Grant::RefreshToken { refresh_token }).await?;
        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token.to_string());
        }
        Ok(token)
    }

    /// Return `token` if still valid, a refreshed token otherwise.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] if the token expired and has no refresh token;
    /// - errors of [`TokenClient::refresh`].
    pub async fn ensure_fresh(&self, token: Token) -> Result<Token> {
        if !token.is_expired() {
            return Ok(token);
        }

        let refresh_token = token
            .refresh_token
            .as_deref()
            .ok_or_else(|| Error::invalid_request("token expired and has no refresh token"))?;
        self.refresh(refresh_token).await
    }

    async fn grant(&self, grant: &Grant<'_>) -> Result<Token> {
        let request = Request::<Bytes>::builder(Method::Post, self.token_url.clone())
            .header("Authorization", self.authorization.as_str())
            .header("Accept", "application/json")
            .form(grant)?
            .build();

        let response = self.client.execute(request).await?;
        if !response.is_success() {
            return Err(token_error(response));
        }

        let raw: RawToken = response.json()?;
        let token = Token::from_raw(raw, Utc::now());
        debug!(expires_at = %token.expires_at, "token granted");
        Ok(token)
    }
}

fn token_error(response: Response<Bytes>) -> Error {
    match response.json::<TokenError>() {
        Ok(err) => {
            let message = err.error_description.unwrap_or(err.error);
            Error::remote_api_with_body(response.status(), message, response.into_body())
        }
        Err(_) => response.into_remote_error(),
    }
}

/// Builder for [`TokenClient`].
#[derive(Debug, Default)]
pub struct TokenClientBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    token_url: Option<String>,
}

impl TokenClientBuilder {
    /// Set the application client id.
    #[must_use]
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the application client secret.
    #[must_use]
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set the redirect URI registered for the application.
    #[must_use]
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Override the token endpoint, [`DEFAULT_TOKEN_URL`] by default.
    #[must_use]
    pub fn token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = Some(token_url.into());
        self
    }

    /// Build the client on top of `client`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] if the client id or secret is missing;
    /// - [`Error::InvalidUrl`] if the token URL cannot be parsed.
    pub fn build<C>(self, client: C) -> Result<TokenClient<C>> {
        let client_id = self
            .client_id
            .ok_or_else(|| Error::invalid_request("client id is required"))?;
        let client_secret = self
            .client_secret
            .ok_or_else(|| Error::invalid_request("client secret is required"))?;
        let token_url = Url::parse(self.token_url.as_deref().unwrap_or(DEFAULT_TOKEN_URL))?;

        Ok(TokenClient {
            client,
            authorization: format!("Basic {}", STANDARD.encode(format!("{client_id}:{client_secret}"))),
            redirect_uri: self.redirect_uri,
            token_url,
        })
    }
}
