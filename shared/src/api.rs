//! Request builders and response decoding for the Mesto REST API.
//!
//! Builders only describe requests; the [`Http`](crate::capabilities::Http)
//! capability hands them to the shell. Every call is a single attempt.

use crux_http::http::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::capabilities::{Http, HttpError, HttpResult, RequestBuilder, ValidatedUrl};
use crate::event::Event;
use crate::forms::{AvatarForm, PlaceForm, ProfileForm};
use crate::model::CardId;

pub const DEFAULT_BASE_URL: &str = "https://mesto.nomoreparties.co/v1/cohort-42";
pub const AUTHORIZATION_HEADER: &str = "authorization";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Connection settings supplied by the shell.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: Option<SecretString>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Url(#[from] HttpError),

    #[error("request failed: {0}")]
    Http(#[from] crux_http::Error),

    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response body: {reason}")]
    Decode { reason: String },
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: String,
}

/// Builds requests for the Mesto endpoints on top of the `crux_http`
/// capability. Nothing is sent until the caller invokes `send`.
pub struct Api<'a> {
    config: &'a ApiConfig,
    http: &'a Http<Event>,
}

impl<'a> Api<'a> {
    pub fn new(config: &'a ApiConfig, http: &'a Http<Event>) -> Self {
        Self { config, http }
    }

    pub fn user_info(&self) -> Result<RequestBuilder<Event>, ApiError> {
        self.request(Method::Get, "users/me")
    }

    pub fn initial_cards(&self) -> Result<RequestBuilder<Event>, ApiError> {
        self.request(Method::Get, "cards")
    }

    pub fn edit_user_info(&self, form: &ProfileForm) -> Result<RequestBuilder<Event>, ApiError> {
        Ok(self.request(Method::Patch, "users/me")?.body_json(form)?)
    }

    pub fn edit_user_avatar(&self, form: &AvatarForm) -> Result<RequestBuilder<Event>, ApiError> {
        Ok(self.request(Method::Patch, "users/me/avatar")?.body_json(form)?)
    }

    pub fn add_card(&self, form: &PlaceForm) -> Result<RequestBuilder<Event>, ApiError> {
        Ok(self.request(Method::Post, "cards")?.body_json(form)?)
    }

    /// `PUT` to like, `DELETE` to unlike.
    pub fn change_like_status(
        &self,
        card_id: &CardId,
        like: bool,
    ) -> Result<RequestBuilder<Event>, ApiError> {
        let method = if like { Method::Put } else { Method::Delete };
        self.request(method, &format!("cards/{card_id}/likes"))
    }

    pub fn remove_card(&self, card_id: &CardId) -> Result<RequestBuilder<Event>, ApiError> {
        self.request(Method::Delete, &format!("cards/{card_id}"))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder<Event>, ApiError> {
        let url = ValidatedUrl::new(self.config.endpoint(path))?;
        let request = self.http.request(method, url.into_url());
        Ok(match &self.config.token {
            Some(token) => request.header(AUTHORIZATION_HEADER, token.expose_secret().as_str()),
            None => request,
        })
    }
}

/// Decodes the entity carried by a successful response.
pub fn decode<T: DeserializeOwned>(result: HttpResult) -> Result<T, ApiError> {
    let body = check_status(result)?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
        reason: e.to_string(),
    })
}

/// For endpoints whose success body is irrelevant.
pub fn expect_success(result: HttpResult) -> Result<(), ApiError> {
    check_status(result).map(|_| ())
}

fn check_status(result: HttpResult) -> Result<Vec<u8>, ApiError> {
    let mut response = result?;
    let status = response.status();
    let body = response.take_body().unwrap_or_default();
    if status.is_success() {
        return Ok(body);
    }

    let status = status as u16;
    let message = serde_json::from_slice::<ApiErrorResponse>(&body)
        .ok()
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP error: {status}"));

    Err(ApiError::Status { status, message })
}
