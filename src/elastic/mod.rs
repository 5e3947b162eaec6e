// SPDX-License-Identifier: Apache-2.0

//! Elasticsearch-compatible backend: configuration and the HTTP client
//! shared by the bulk shipping and search paths.

pub mod client;
pub mod config;

pub use client::{init_crypto_provider, ElasticClient};
pub use config::ElasticConfig;
