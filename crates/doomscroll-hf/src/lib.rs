//! Hugging Face client for doomscroll.
//!
//! Implements [`doomscroll_core::HfDatasetPort`]: repository listing and row
//! paging go through a retrying HTTP backend, file downloads go through the
//! `hf-hub` cache.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultHfClient is meant to be used through the HfDatasetPort trait,
// not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod hub;
mod models;
mod parsing;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultHfClient;

// Configuration
pub use config::HfClientConfig;
