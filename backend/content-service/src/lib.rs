/// Content Library
///
/// Owns the post collection: creating, editing and deleting posts, likes,
/// comments, text search, hashtag extraction and sort modes. Every mutation
/// is a read-modify-write of the whole collection followed by exactly one
/// `postsUpdated` broadcast.
///
/// # Modules
///
/// - `models`: Post and comment records
/// - `services`: Post repository, comment operations, hashtag parser, sorting
/// - `validation`: Post text and image URL checks
/// - `error`: Error types and handling
pub mod error;
pub mod models;
pub mod services;
pub mod validation;

pub use error::{ContentError, Result};
pub use models::{Comment, Post};
pub use services::hashtag_parser::extract_hashtags;
pub use services::posts::PostRepository;
pub use services::sorting::{sort_posts, SortMode};
