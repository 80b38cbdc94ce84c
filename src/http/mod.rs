//! HTTP page source
//!
//! Fetches pages from a JSON HTTP endpoint.
//!
//! # Features
//!
//! - **GET**: request parameters become query-string pairs
//! - **POST**: request parameters are sent as a JSON body
//! - **Headers**: default headers applied to every request
//!
//! Each fetch is a single request. Non-2xx responses, transport errors and
//! non-object bodies fail the fetch; there are no retries.

mod source;

pub use source::{
    query_pairs, HttpMethod, HttpPageSource, HttpSourceConfig, HttpSourceConfigBuilder,
};
