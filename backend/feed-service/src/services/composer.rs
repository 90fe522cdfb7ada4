/// Feed composition
///
/// Pure derivation of the visible post list. Nothing here writes to the store.
use content_service::services::hashtag_parser::has_hashtag;
use content_service::services::posts::filter_by_query;
use content_service::{sort_posts, Post, PostRepository};
use identity_service::{SessionStore, User};
use tracing::debug;

use crate::error::Result;
use crate::models::TrendingHashtag;
use crate::query::FeedQuery;
use crate::services::trending::trending_hashtags;

/// Filter and order `posts` for `session` under `query`.
///
/// A hashtag filter replaces the follow-graph filter, and search only applies
/// when no hashtag is active. Sorting runs last.
pub fn compose_feed(posts: Vec<Post>, session: Option<&User>, query: &FeedQuery) -> Vec<Post> {
    let total = posts.len();

    let filtered: Vec<Post> = if let Some(tag) = query.hashtag.as_deref() {
        posts
            .into_iter()
            .filter(|p| has_hashtag(&p.text, tag))
            .collect()
    } else {
        let followed = follow_filter(posts, session);
        match query.active_search() {
            Some(search) => filter_by_query(followed, search),
            None => followed,
        }
    };

    let sorted = sort_posts(&filtered, query.sort);
    debug!(
        total,
        visible = sorted.len(),
        hashtag = query.hashtag.as_deref().unwrap_or(""),
        sort = %query.sort,
        "Feed composed"
    );
    sorted
}

/// Followed authors plus self; no restriction while `following` is empty
fn follow_filter(posts: Vec<Post>, session: Option<&User>) -> Vec<Post> {
    match session {
        Some(user) if !user.following.is_empty() => posts
            .into_iter()
            .filter(|p| p.author_id == user.id || user.is_following(&p.author_id))
            .collect(),
        _ => posts,
    }
}

/// Loads the collection and session, then composes
#[derive(Clone)]
pub struct FeedComposer {
    posts: PostRepository,
    session: SessionStore,
}

impl FeedComposer {
    pub fn new(posts: PostRepository, session: SessionStore) -> Self {
        Self { posts, session }
    }

    pub fn posts(&self) -> &PostRepository {
        &self.posts
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Compose for whoever is signed in right now
    pub fn compose(&self, query: &FeedQuery) -> Result<Vec<Post>> {
        let viewer = self.session.current_user()?;
        self.compose_for(viewer.as_ref(), query)
    }

    pub fn compose_for(&self, viewer: Option<&User>, query: &FeedQuery) -> Result<Vec<Post>> {
        let posts = self.posts.all_posts()?;
        Ok(compose_feed(posts, viewer, query))
    }

    /// Posts authored by one user, newest first
    pub fn profile_posts(&self, author_id: &str) -> Result<Vec<Post>> {
        Ok(self
            .posts
            .all_posts()?
            .into_iter()
            .filter(|p| p.author_id == author_id)
            .collect())
    }

    pub fn trending(&self, limit: usize) -> Result<Vec<TrendingHashtag>> {
        Ok(trending_hashtags(&self.posts.all_posts()?, limit))
    }
}
