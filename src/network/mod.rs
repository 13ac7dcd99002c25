//! Outbound HTTP for the search API

mod client;

pub use client::{ApiResponse, HttpClient};
