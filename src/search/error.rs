// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

use crate::query::QueryError;

#[derive(Error, Debug)]
pub enum SearchError {
    /// Search is administratively disabled; callers should fail fast.
    #[error("analytics search is disabled")]
    Disabled,

    /// The query itself is invalid. This is a client-input error, distinct
    /// from backend availability.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The backend could not be reached or returned an unusable response.
    #[error("search backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
