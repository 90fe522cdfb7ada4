/// Feed services
///
/// - Composer: filter and order the post collection for one viewer
/// - Trending: most used hashtags
/// - View: live subscriber that recomposes on every change
pub mod composer;
pub mod trending;
pub mod view;

pub use composer::{compose_feed, FeedComposer};
pub use trending::trending_hashtags;
pub use view::FeedView;
