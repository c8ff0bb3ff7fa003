//! `wamock` Server
//!
//! Mock of a WhatsApp-style Business messaging API for integration tests.
//! Applications send messages and contact checks to it as they would to the
//! real provider; an operator decides through `/mock` whether requests
//! succeed and where simulated webhook callbacks are posted.

pub mod api;
pub mod config;
pub mod mock;
pub mod provider;
pub mod util;
pub mod webhooks;
