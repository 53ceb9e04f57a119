//! Network layer for the browser client.
//!
//! ARCHITECTURE
//! ============
//! `api` implements the shared `EntityTransport` over `gloo-net` so the
//! table core stays unaware of the browser fetch API.

pub mod api;
