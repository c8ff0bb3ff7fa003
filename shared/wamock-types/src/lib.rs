//! Wamock Wire Types
//!
//! Request, response and webhook payload shapes of the messaging provider API.
//! Field names and omission rules follow the provider's JSON format exactly,
//! since client harnesses assert on them.

pub mod types;

pub use types::*;
