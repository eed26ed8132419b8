//! Aptos outbound adapters.
//!
//! This module provides a thin REST implementation of the `ChainClient` port
//! plus the local signing account it submits with.

mod dto;
mod http_client;
mod signer;

pub use http_client::{AptosRestClient, SubmissionSettings};
pub use signer::{AccountKeyError, LocalAccount};
