//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **aptos**: REST client that signs, submits, and polls contract calls
//!   against an Aptos fullnode.
//!
//! Adapters are thin translators between domain types and wire formats. They
//! contain no classification or routing logic.

pub mod aptos;
