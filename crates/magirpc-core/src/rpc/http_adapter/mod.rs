//! Native JSON-RPC client for Magi (bitcoind-derived) wallet endpoints.
//!
//! Implements [`NodeRpc`](super::NodeRpc) over JSON-RPC using `reqwest`, with
//! basic or cookie-file auth and optional request rate limiting.

mod client;
mod connection;
mod parsing;
mod protocol;

pub use client::HttpRpcClient;
