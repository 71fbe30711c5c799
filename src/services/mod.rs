pub mod starred;
pub mod watched;

use crate::pagination::ApiOptions;

/// Options of a listing call, or no page limit when none were given.
pub(crate) fn options_or_default(options: Option<ApiOptions>) -> ApiOptions {
    options.unwrap_or(ApiOptions::NONE)
}
