//! Provider API types.

pub mod contacts;
pub mod message;
pub mod response;
pub mod webhook;

pub use contacts::*;
pub use message::*;
pub use response::*;
pub use webhook::*;
