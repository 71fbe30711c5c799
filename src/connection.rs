//! Typed requests over a [`Client`].
use async_trait::async_trait;
use reqwest::{Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    client::{status_unwrap, Client, Error},
    pagination::{next_page_link, ApiOptions},
    path::Endpoint,
};

/// Typed access to API endpoints.
///
/// Non-success responses surface as [`Error::NotFound`] (404) or
/// [`Error::ErrorResponse`] (everything else). `put_empty` and `delete` hand
/// the success status back so callers can tell "applied" from "no-op".
#[async_trait]
pub trait ApiConnection: Send + Sync {
    /// Fetches a single resource.
    async fn get<T>(&self, endpoint: &Endpoint) -> Result<T, Error>
    where
        T: DeserializeOwned + Send;

    /// Fetches every page of a listing, within the limits of `options`.
    async fn get_all<T>(
        &self,
        endpoint: &Endpoint,
        options: ApiOptions,
    ) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned + Send;

    /// Creates or replaces a resource with `body`.
    async fn put<T, B>(&self, endpoint: &Endpoint, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync + ?Sized;

    /// Sends a PUT without a body.
    async fn put_empty(&self, endpoint: &Endpoint) -> Result<StatusCode, Error>;

    /// Creates a resource with `body`.
    async fn post<T, B>(&self, endpoint: &Endpoint, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync + ?Sized;

    async fn delete(&self, endpoint: &Endpoint) -> Result<StatusCode, Error>;
}

struct Page<T> {
    items: Vec<T>,
    next: Option<Url>,
}

/// Reads the body as JSON; an empty body reads as `null`.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let body = resp.bytes().await?;
    if body.is_empty() {
        return Ok(serde_json::from_slice(b"null")?);
    }

    Ok(serde_json::from_slice(&body)?)
}

impl Client {
    /// Keeps `url` only when it points at the API host; the token is never
    /// sent anywhere else.
    fn same_origin(&self, url: Url) -> Option<Url> {
        if url.origin() == self.base_url().origin() {
            Some(url)
        } else {
            log::warn!("not following next page link to foreign origin {}", url);
            None
        }
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<reqwest::Body>,
    ) -> Result<Response, Error> {
        let req = self.new_request(method, url, body)?;
        let resp = self.request(req).await?;

        status_unwrap(resp).await
    }

    async fn fetch_page<T: DeserializeOwned>(&self, url: Url) -> Result<Page<T>, Error> {
        let ok_resp = self.send(Method::GET, url, None).await?;
        let next = match next_page_link(ok_resp.headers()) {
            Some(link) => self.same_origin(self.base_url().join(&link)?),
            None => None,
        };
        // An empty body is an empty page.
        let items: Option<Vec<T>> = read_json(ok_resp).await?;

        Ok(Page {
            items: items.unwrap_or_default(),
            next,
        })
    }
}

#[async_trait]
impl ApiConnection for Client {
    async fn get<T>(&self, endpoint: &Endpoint) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
    {
        let ok_resp = self.send(Method::GET, self.url_for(endpoint)?, None).await?;

        read_json(ok_resp).await
    }

    async fn get_all<T>(
        &self,
        endpoint: &Endpoint,
        options: ApiOptions,
    ) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned + Send,
    {
        let mut first = self.url_for(endpoint)?;
        options.apply(&mut first);

        let mut all = Vec::new();
        let mut next = Some(first);
        let mut fetched = 0;
        while let Some(url) = next.take() {
            if options.reached_page_count(fetched) {
                break;
            }

            let page: Page<T> = self.fetch_page(url).await?;
            fetched += 1;
            log::trace!(
                "{}: page {} returned {} items",
                endpoint,
                fetched,
                page.items.len()
            );

            if !options.is_short_page(page.items.len()) {
                next = page.next;
            }
            all.extend(page.items);
        }

        Ok(all)
    }

    async fn put<T, B>(&self, endpoint: &Endpoint, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync + ?Sized,
    {
        let body = Client::json_body(body)?;
        let ok_resp = self
            .send(Method::PUT, self.url_for(endpoint)?, Some(body))
            .await?;

        read_json(ok_resp).await
    }

    async fn put_empty(&self, endpoint: &Endpoint) -> Result<StatusCode, Error> {
        let ok_resp = self.send(Method::PUT, self.url_for(endpoint)?, None).await?;

        Ok(ok_resp.status())
    }

    async fn post<T, B>(&self, endpoint: &Endpoint, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync + ?Sized,
    {
        let body = Client::json_body(body)?;
        let ok_resp = self
            .send(Method::POST, self.url_for(endpoint)?, Some(body))
            .await?;

        read_json(ok_resp).await
    }

    async fn delete(&self, endpoint: &Endpoint) -> Result<StatusCode, Error> {
        let ok_resp = self
            .send(Method::DELETE, self.url_for(endpoint)?, None)
            .await?;

        Ok(ok_resp.status())
    }
}
