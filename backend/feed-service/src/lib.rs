/// Feed Library
///
/// Derives what the feed shows from the post collection, the signed-in
/// user's follow graph and the addressable view state (hashtag, search, sort).
///
/// # Modules
///
/// - `query`: Addressable view state parsed from a query string
/// - `services`: Feed composer, trending hashtags, live feed view
/// - `models`: Rendering state for post and comment cards
/// - `utils`: Relative timestamps
/// - `error`: Error types
pub mod error;
pub mod models;
pub mod query;
pub mod services;
pub mod utils;

pub use error::{FeedError, Result};
pub use models::{CommentCard, PostCard, TrendingHashtag};
pub use query::FeedQuery;
pub use services::composer::{compose_feed, FeedComposer};
pub use services::trending::{trending_hashtags, DEFAULT_TRENDING_LIMIT};
pub use services::view::FeedView;
pub use utils::format_relative;
