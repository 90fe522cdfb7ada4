/// Identity Library
///
/// Owns everything Feedline knows about users: the registered user list, the
/// session pointer naming the signed-in user, and the follow graph stored on
/// each user record.
///
/// ## Modules
///
/// - `error`: Error types
/// - `models`: User record and request types
/// - `security`: Credential digests
/// - `services`: Session pointer and user directory
/// - `validators`: Input validation
pub mod error;
pub mod models;
pub mod security;
pub mod services;
pub mod validators;

// Re-export commonly used types
pub use error::{IdentityError, Result};
pub use models::{ProfileUpdate, SignupRequest, User};
pub use services::{SessionStore, UserDirectory};
