//! API Layer
//!
//! HTTP client for the ApiPulse REST API.

pub mod client;

pub use client::*;
