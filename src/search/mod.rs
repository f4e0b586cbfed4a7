//! File-search API client

pub mod client;

pub use client::{SearchApi, SearchClient};
