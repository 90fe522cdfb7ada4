pub mod user;

pub use user::{ProfileUpdate, SignupRequest, User};
