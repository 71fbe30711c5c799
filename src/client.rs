use reqwest::{
    header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT},
    Body, Method, Request, Response, StatusCode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::{
    path::Endpoint,
    services::{starred::StarredClient, watched::WatchedClient},
};

/// Base URL of the public GitHub REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";

const MEDIA_TYPE: &str = "application/vnd.github+json";
const AGENT: &str = concat!("hubclient/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),
    #[error("Invalid token received")]
    InvalidTokenValue,
    #[error("Invalid URL")]
    InvalidURL(#[from] url::ParseError),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Error response: [{0}] {1}")]
    ErrorResponse(u16, String),
    #[error("HTTP Client error")]
    HttpClient(#[from] reqwest::Error),
    #[error("Failed to parse json")]
    ParseError(#[from] serde_json::Error),
}

/// A caller-supplied argument was rejected before any request was sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("`{0}` must not be null")]
    Null(&'static str),
    #[error("`{0}` must not be empty")]
    Empty(&'static str),
    #[error("`{0}` must not be `.` or `..`")]
    DotSegment(&'static str),
    #[error("`{0}` must be a positive integer")]
    NotPositive(&'static str),
    #[error("no value bound for placeholder `{0}`")]
    Unbound(String),
}

/// The four classes every [`Error`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input, detected locally. No request was made.
    Validation,
    /// The server answered 404.
    NotFound,
    /// The server answered with any other non-success status.
    Http,
    /// No usable response: connection failure or an unreadable body.
    Transport,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) | Error::InvalidTokenValue | Error::InvalidURL(_) => {
                ErrorKind::Validation
            }
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::ErrorResponse(..) => ErrorKind::Http,
            Error::HttpClient(_) | Error::ParseError(_) => ErrorKind::Transport,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Connection to a GitHub-style REST API.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    token: Option<String>,
    http_client: reqwest::Client,
}

impl Client {
    /// Creates a client for the API rooted at `base_url`, authenticating with
    /// `token` when one is given.
    pub async fn new(base_url: &str, token: Option<&str>) -> Result<Self, Error> {
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };

        Ok(Client {
            base_url,
            token: token.map(str::to_owned),
            http_client: reqwest::Client::new(),
        })
    }

    /// Creates a client for [`DEFAULT_BASE_URL`].
    pub async fn github(token: Option<&str>) -> Result<Self, Error> {
        Self::new(DEFAULT_BASE_URL, token).await
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Repository watching operations.
    pub fn watched(&self) -> WatchedClient<'_, Client> {
        WatchedClient::new(self)
    }

    /// Repository starring operations.
    pub fn starred(&self) -> StarredClient<'_, Client> {
        StarredClient::new(self)
    }

    pub async fn request(&self, req: reqwest::Request) -> Result<reqwest::Response, Error> {
        log::debug!("{} {}", req.method(), req.url());
        Ok(self.http_client.execute(req).await?)
    }

    pub(crate) fn url_for(&self, endpoint: &Endpoint) -> Result<Url, Error> {
        Ok(self.base_url.join(endpoint.as_str())?)
    }

    pub(crate) fn new_request(
        &self,
        method: reqwest::Method,
        url: Url,
        body: Option<Body>,
    ) -> Result<reqwest::Request, Error> {
        let is_put = method == Method::PUT;
        let mut req = Request::new(method, url);
        let headers = req.headers_mut();

        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
        headers.insert(USER_AGENT, HeaderValue::from_static(AGENT));

        if let Some(token) = self.token.as_ref() {
            let mut header_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::InvalidTokenValue)?;
            header_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, header_value);
        }

        match body {
            Some(body) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                *req.body_mut() = Some(body);
            }
            None if is_put => {
                headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
            }
            None => {}
        }

        Ok(req)
    }

    pub(crate) fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<Body, Error> {
        Ok(Body::from(serde_json::to_vec(body)?))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

/// convert HTTP Response with status < 200 and >= 300 to Error
pub(crate) async fn status_unwrap(resp: Response) -> Result<Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let err_body = resp.text().await?;
    let err_msg: ErrorMessage =
        serde_json::from_str(&err_body).unwrap_or(ErrorMessage { message: err_body });

    match status {
        StatusCode::NOT_FOUND => Err(Error::NotFound(err_msg.message)),
        code => Err(Error::ErrorResponse(code.as_u16(), err_msg.message)),
    }
}
