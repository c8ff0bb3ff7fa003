//! Shared utility functions

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated message IDs, matching the provider's format.
pub const MESSAGE_ID_LEN: usize = 27;

/// Generate an opaque alphanumeric identifier of `len` characters.
///
/// Uses the thread-local RNG, so concurrent callers never share state.
/// Uniqueness is best-effort; IDs only correlate test traffic.
///
/// # Examples
///
/// ```
/// use wamock_server::util::random_id;
///
/// let id = random_id(27);
/// assert_eq!(id.len(), 27);
/// assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn random_id(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate a provider-style message ID.
pub fn message_id() -> String {
    random_id(MESSAGE_ID_LEN)
}
