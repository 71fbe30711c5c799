//! Turning request outcomes into yes/no answers.
//!
//! A 404 is the only failure ever folded into `false`; every other error is
//! returned untouched.
use reqwest::StatusCode;

use crate::client::Error;

/// `true` if the resource was fetched, `false` if the server answered 404.
pub fn is_present<T>(result: Result<T, Error>) -> Result<bool, Error> {
    match result {
        Ok(_) => Ok(true),
        Err(Error::NotFound(message)) => {
            log::debug!("treating not found as absent: {}", message);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// `true` only when a toggle request answered 204.
///
/// A 404 means the state was already as requested. Any other success
/// status, 200 included, carries no change signal and maps to `false`.
pub fn applied(result: Result<StatusCode, Error>) -> Result<bool, Error> {
    match result {
        Ok(status) => Ok(is_no_content(status)),
        Err(Error::NotFound(message)) => {
            log::debug!("toggle target already absent: {}", message);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

pub fn is_no_content(status: StatusCode) -> bool {
    status == StatusCode::NO_CONTENT
}
