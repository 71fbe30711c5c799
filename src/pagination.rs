//! Page limits for listing calls and the `Link` header that drives them.
use std::num::NonZeroU32;

use reqwest::header::{HeaderMap, LINK};
use url::Url;

use crate::client::{ArgumentError, Error};

mod params {
    pub const PAGE: &str = "page";
    pub const PER_PAGE: &str = "per_page";
}

/// Limits applied to a paginated listing.
///
/// Unset fields defer to the server: its first page, its page size, and as
/// many pages as it is willing to link to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApiOptions {
    /// 1-based page to start from.
    pub start_page: Option<NonZeroU32>,
    /// Maximum number of pages to fetch.
    pub page_count: Option<NonZeroU32>,
    /// Number of items requested per page.
    pub page_size: Option<NonZeroU32>,
}

impl ApiOptions {
    /// No page limit.
    pub const NONE: ApiOptions = ApiOptions {
        start_page: None,
        page_count: None,
        page_size: None,
    };

    /// Options with every limit set. Each value must be positive.
    pub fn new(start_page: u32, page_count: u32, page_size: u32) -> Result<Self, Error> {
        Ok(ApiOptions {
            start_page: Some(positive("start_page", start_page)?),
            page_count: Some(positive("page_count", page_count)?),
            page_size: Some(positive("page_size", page_size)?),
        })
    }

    pub fn is_unlimited(&self) -> bool {
        *self == Self::NONE
    }

    /// Whether `fetched` pages already exhaust `page_count`.
    pub(crate) fn reached_page_count(&self, fetched: u32) -> bool {
        self.page_count.map_or(false, |c| fetched >= c.get())
    }

    /// Whether a page of `len` items is shorter than the requested size.
    pub(crate) fn is_short_page(&self, len: usize) -> bool {
        self.page_size.map_or(false, |s| len < s.get() as usize)
    }

    /// Appends `per_page` and `page` to `url`, leaving out unset limits.
    pub(crate) fn apply(&self, url: &mut Url) {
        if self.page_size.is_none() && self.start_page.is_none() {
            return;
        }

        let mut s = form_urlencoded::Serializer::new(url.query().unwrap_or_default().to_owned());
        if let Some(size) = self.page_size {
            s.append_pair(params::PER_PAGE, &size.to_string());
        }
        if let Some(page) = self.start_page {
            s.append_pair(params::PAGE, &page.to_string());
        }

        url.set_query(Some(&s.finish()));
    }
}

fn positive(name: &'static str, value: u32) -> Result<NonZeroU32, Error> {
    NonZeroU32::new(value).ok_or_else(|| ArgumentError::NotPositive(name).into())
}

/// Returns the `rel="next"` target of a `Link` header, if any.
///
/// `<https://api.github.com/user/subscriptions?page=2>; rel="next", <…>; rel="last"`
pub(crate) fn next_page_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .find_map(|link| {
            let mut parts = link.split(';');
            let target = parts.next()?.trim();
            let is_next = parts.any(|p| {
                let p = p.trim();
                p == r#"rel="next""# || p == "rel=next"
            });
            if !is_next {
                return None;
            }

            target
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
                .map(str::to_owned)
        })
}
