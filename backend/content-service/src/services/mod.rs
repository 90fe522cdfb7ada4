/// Business logic layer for content-service
///
/// - Post repository: post CRUD, likes and search over the stored collection
/// - Comments: comment add/delete on the same repository
/// - Hashtag parser: `#tag` extraction
/// - Sorting: latest / oldest / mostLiked
pub mod comments;
pub mod hashtag_parser;
pub mod posts;
pub mod sorting;

pub use hashtag_parser::extract_hashtags;
pub use posts::PostRepository;
pub use sorting::{sort_posts, SortMode};
