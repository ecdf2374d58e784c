use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::authorization_endpoint;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Token returned by the client-credentials exchange. Not cached between runs.
#[derive(Debug, Deserialize)]
pub struct Access {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
}

impl Access {
    pub fn authorize(&self, request_builder: RequestBuilder) -> RequestBuilder {
        request_builder.bearer_auth(self.token())
    }

    pub fn token(&self) -> &str {
        &self.access_token
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to get access token: {status} - {body}")]
    Auth { status: StatusCode, body: String },
    #[error("Failed to get playlist tracks: {status} - {body}")]
    Fetch { status: StatusCode, body: String },
    #[error("Missing Spotify client id or client secret")]
    MissingCredentials,
    #[error("Request error: {0}")]
    RequestError(reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::RequestError(err)
    }
}

/// Splits a response into its status and body text when the status is not a success.
pub(crate) fn error_parts(resp: Response) -> Result<Response, (StatusCode, String)> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err((status, body))
}

pub fn get_access_token(
    client: &Client,
    accounts_url: &str,
    credentials: &Credentials,
) -> Result<Access, ApiError> {
    let request = client
        .post(authorization_endpoint!(accounts_url, "/api/token"))
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ])
        .build()?;
    log::debug!("Requesting access token from {}", request.url());
    let resp = client.execute(request)?;
    let resp = error_parts(resp).map_err(|(status, body)| ApiError::Auth { status, body })?;
    let access = resp.json::<Access>()?;
    log::info!("Obtained access token, expires in {}s", access.expires_in);
    Ok(access)
}
