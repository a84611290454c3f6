//! Shared helpers for ura-server integration tests.

pub mod server;

pub use server::TestServer;
