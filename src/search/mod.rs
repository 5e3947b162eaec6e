// SPDX-License-Identifier: Apache-2.0

//! Search execution: assembles full backend search requests from compiled
//! queries and maps raw backend responses into result hits.

pub mod error;
pub mod executor;
pub mod request;
pub mod response;

pub use error::{Result, SearchError};
pub use executor::{SearchExecutor, SearchSink};
pub use request::SearchRequest;
pub use response::{SearchHit, SearchResponse};
