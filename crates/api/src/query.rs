//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Name search parameters (`?q=`). A missing `q` is the empty query.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}
