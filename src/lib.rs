//! Network-traffic upload summaries.
//!
//! A CSV of traffic records is uploaded, parsed into a [`parser::Table`], and
//! reduced to protocol counts, normal/abnormal label counts and head-of-column
//! metric samples. The latest result is kept in a [`store::PredictionStore`]
//! and served back over HTTP.

pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod parser;
pub mod server;
pub mod store;
